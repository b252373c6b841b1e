use super::*;

/// Editable text. Keeps a caret as a char index into `text`.
pub struct TextBox {
    control: ControlState,
    text: String,
    placeholder: String,
    options: TextBoxOptions,
    caret: usize,
}

impl core::ops::Deref for TextBox {
    type Target = ControlState;
    fn deref(&self) -> &ControlState {
        &self.control
    }
}

impl core::ops::DerefMut for TextBox {
    fn deref_mut(&mut self) -> &mut ControlState {
        &mut self.control
    }
}

#[derive(Default, Clone, Debug)]
pub struct TextBoxOptions {
    pub multiline: bool,
    pub readonly: bool,
}

impl TextBox {
    pub fn new(name: &str) -> TextBox {
        Self::new_with_options(name, Default::default())
    }

    pub fn new_with_options(name: &str, options: TextBoxOptions) -> TextBox {
        TextBox {
            control: ControlState {
                name: name.to_string(),
                ..Default::default()
            },
            text: String::new(),
            placeholder: String::new(),
            options,
            caret: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and moves the caret to its end.
    pub fn set_text(&mut self, s: &str) {
        self.text = s.to_string();
        self.caret = self.text.chars().count();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, s: &str) {
        self.placeholder = s.to_string();
    }

    pub fn is_readonly(&self) -> bool {
        self.options.readonly
    }

    pub fn set_readonly(&mut self, value: bool) {
        self.options.readonly = value;
    }

    pub fn is_multiline(&self) -> bool {
        self.options.multiline
    }

    pub fn set_multiline(&mut self, value: bool) {
        self.options.multiline = value;
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    fn remove_at(&mut self, caret: usize) -> bool {
        if caret >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_offset(caret);
        self.text.remove(at);
        true
    }

    /// `Text`, `Placeholder`, `ReadOnly`, `Multiline` and the style keys.
    pub fn kind() -> ControlKind {
        let mut kind = ControlKind::new("TextBox", TextBox::new);
        kind.with_style_attributes()
            .on_key("Text", |text_box: &mut TextBox, value, _, _| {
                loader::expect_str(value, "Text")
                    .map(|s| text_box.set_text(s))
                    .is_some()
            })
            .on_key("Placeholder", |text_box: &mut TextBox, value, _, _| {
                loader::expect_str(value, "Placeholder")
                    .map(|s| text_box.set_placeholder(s))
                    .is_some()
            })
            .on_key("ReadOnly", |text_box: &mut TextBox, value, _, _| {
                loader::expect_bool(value, "ReadOnly")
                    .map(|b| text_box.set_readonly(b))
                    .is_some()
            })
            .on_key("Multiline", |text_box: &mut TextBox, value, _, _| {
                loader::expect_bool(value, "Multiline")
                    .map(|b| text_box.set_multiline(b))
                    .is_some()
            });
        kind
    }
}

impl Control for TextBox {
    fn type_name(&self) -> &'static str {
        "TextBox"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_input(&mut self, event: &WindowEvent) -> bool {
        let len = self.text.chars().count();
        match *event {
            WindowEvent::KeyDown { key, .. } => match key {
                Key::Left => {
                    self.caret = self.caret.saturating_sub(1);
                    true
                }
                Key::Right => {
                    self.caret = (self.caret + 1).min(len);
                    true
                }
                Key::Home => {
                    self.caret = 0;
                    true
                }
                Key::End => {
                    self.caret = len;
                    true
                }
                Key::Backspace if !self.options.readonly && self.caret > 0 => {
                    self.caret -= 1;
                    self.remove_at(self.caret)
                }
                Key::Delete if !self.options.readonly => self.remove_at(self.caret),
                Key::Enter if self.options.multiline && !self.options.readonly => {
                    self.insert('\n');
                    true
                }
                _ => false,
            },
            WindowEvent::Char(c) if !c.is_control() && !self.options.readonly => {
                self.insert(c);
                true
            }
            _ => false,
        }
    }
}
