use super::*;

/// Static text.
pub struct Label {
    control: ControlState,
    text: String,
}

impl core::ops::Deref for Label {
    type Target = ControlState;
    fn deref(&self) -> &ControlState {
        &self.control
    }
}

impl core::ops::DerefMut for Label {
    fn deref_mut(&mut self) -> &mut ControlState {
        &mut self.control
    }
}

impl Label {
    pub fn new(name: &str, text: &str) -> Label {
        Label {
            control: ControlState {
                name: name.to_string(),
                ..Default::default()
            },
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// `Text` plus the style keys.
    pub fn kind() -> ControlKind {
        let mut kind = ControlKind::new("Label", |name| Label::new(name, ""));
        kind.with_style_attributes()
            .on_key("Text", |label: &mut Label, value, _, _| {
                match loader::expect_str(value, "Text") {
                    Some(text) => {
                        label.set_text(text);
                        true
                    }
                    None => false,
                }
            });
        kind
    }
}

impl Control for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
