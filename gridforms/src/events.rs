//! Events delivered by the windowing layer.

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// The client area changed size.
    Resized { width: f32, height: f32 },

    /// The user asked to close the window.
    CloseRequested,

    MouseDown { x: f32, y: f32, modifiers: ModifierKeys },
    MouseMove { x: f32, y: f32, modifiers: ModifierKeys },
    MouseUp { x: f32, y: f32, modifiers: ModifierKeys },

    KeyDown { key: Key, modifiers: ModifierKeys },
    KeyUp { key: Key, modifiers: ModifierKeys },

    /// A translated character.
    Char(char),
}

impl WindowEvent {
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::MouseDown { x, y, .. } | Self::MouseMove { x, y, .. } | Self::MouseUp { x, y, .. } => {
                Some(Point::new(x, y))
            }
            _ => None,
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. } | Self::Char(_))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Key {
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Other(u32),
}

#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct ModifierKeys(pub u16);

impl ModifierKeys {
    pub const CONTROL: u16 = 1 << 0;
    pub const SHIFT: u16 = 1 << 1;
    pub const ALT: u16 = 1 << 2;
    pub const LBUTTON: u16 = 1 << 3;

    pub fn control(&self) -> bool {
        self.0 & Self::CONTROL != 0
    }

    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    pub fn alt(&self) -> bool {
        self.0 & Self::ALT != 0
    }

    pub fn lbutton(&self) -> bool {
        self.0 & Self::LBUTTON != 0
    }
}

impl std::fmt::Debug for ModifierKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.control() {
            write!(f, "CTRL ")?;
        }
        if self.shift() {
            write!(f, "SHIFT ")?;
        }
        if self.alt() {
            write!(f, "ALT ")?;
        }
        if self.lbutton() {
            write!(f, "LBUTTON ")?;
        }
        Ok(())
    }
}
