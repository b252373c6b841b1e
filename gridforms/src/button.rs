use super::*;

pub struct Button {
    control: ControlState,
    text: String,
    kind: ButtonKind,
    enabled: bool,
    check_state: CheckState,
}

impl core::ops::Deref for Button {
    type Target = ControlState;
    fn deref(&self) -> &ControlState {
        &self.control
    }
}

impl core::ops::DerefMut for Button {
    fn deref_mut(&mut self) -> &mut ControlState {
        &mut self.control
    }
}

pub struct ButtonBuilder<'a> {
    name: &'a str,
    kind: Option<ButtonKind>,
    text: Option<String>,
    enabled: bool,
}

impl<'a> ButtonBuilder<'a> {
    #[must_use]
    pub fn kind(mut self, kind: ButtonKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn build(self) -> Button {
        Button::build(self)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ButtonKind {
    Command,
    CheckBox,
    ThreeState,
}

impl ButtonKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Command" => Some(Self::Command),
            "CheckBox" => Some(Self::CheckBox),
            "ThreeState" => Some(Self::ThreeState),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CheckState {
    Checked,
    Unchecked,
    Indeterminate,
}

impl Button {
    pub fn new(name: &str) -> Button {
        Self::builder(name).build()
    }

    pub fn builder(name: &str) -> ButtonBuilder<'_> {
        ButtonBuilder {
            name,
            kind: None,
            text: None,
            enabled: true,
        }
    }

    fn build(builder: ButtonBuilder) -> Button {
        Button {
            control: ControlState {
                name: builder.name.to_string(),
                ..Default::default()
            },
            text: builder.text.unwrap_or_default(),
            kind: builder.kind.unwrap_or(ButtonKind::Command),
            enabled: builder.enabled,
            check_state: CheckState::Unchecked,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn button_kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, value: bool) {
        self.enabled = value;
    }

    pub fn is_checked(&self) -> bool {
        self.check_state == CheckState::Checked
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    pub fn set_check_state(&mut self, value: CheckState) {
        self.check_state = value;
    }

    /// Activates the button as a click would. Check boxes advance their check
    /// state; three-state boxes pass through `Indeterminate`.
    pub fn press(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.check_state = match (self.kind, self.check_state) {
            (ButtonKind::Command, state) => state,
            (ButtonKind::CheckBox, CheckState::Checked) => CheckState::Unchecked,
            (ButtonKind::CheckBox, _) => CheckState::Checked,
            (ButtonKind::ThreeState, CheckState::Unchecked) => CheckState::Checked,
            (ButtonKind::ThreeState, CheckState::Checked) => CheckState::Indeterminate,
            (ButtonKind::ThreeState, CheckState::Indeterminate) => CheckState::Unchecked,
        };
        debug!("button {:?} pressed", self.name);
        true
    }

    /// `Text`, `Enabled`, `Kind`, `Brush` and the style keys.
    pub fn kind() -> ControlKind {
        let mut kind = ControlKind::new("Button", Button::new);
        kind.with_style_attributes()
            .with_brush()
            .on_key("Text", |button: &mut Button, value, _, _| {
                loader::expect_str(value, "Text")
                    .map(|text| button.set_text(text))
                    .is_some()
            })
            .on_key("Enabled", |button: &mut Button, value, _, _| {
                loader::expect_bool(value, "Enabled")
                    .map(|enabled| button.set_enabled(enabled))
                    .is_some()
            })
            .on_key("Kind", |button: &mut Button, value, _, _| {
                match loader::expect_str(value, "Kind").map(ButtonKind::from_name) {
                    Some(Some(kind)) => {
                        button.kind = kind;
                        true
                    }
                    Some(None) => {
                        error!("unknown button kind {value}");
                        false
                    }
                    None => false,
                }
            });
        kind
    }
}

impl Control for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyDown { key: Key::Enter, .. } | WindowEvent::Char(' ') => self.press(),
            _ => false,
        }
    }
}
