use super::*;

/// An sRGB color with straight alpha.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Bits 24..31 are ignored.
    /// Bits 16..23 are R
    /// Bits 8..15 are G
    /// Bits 0..7 are B
    pub const fn from_u32_rgb(u: u32) -> Self {
        Self::from_rgb((u >> 16) as u8, (u >> 8) as u8, u as u8)
    }

    /// Components scaled to `0.0..=1.0`, in RGBA order.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Parses `#rrggbb` / `#rrggbbaa`, a well-known name, or an array of three
    /// or four integers in `0..=255`.
    pub fn from_json(value: &Value) -> core::result::Result<Color, String> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Array(items) if items.len() == 3 || items.len() == 4 => {
                let mut c = [0xffu8; 4];
                for (slot, item) in c.iter_mut().zip(items) {
                    *slot = item
                        .as_u64()
                        .filter(|v| *v <= 255)
                        .ok_or_else(|| format!("color component {item} is not in 0..=255"))?
                        as u8;
                }
                Ok(Color::from_rgba(c[0], c[1], c[2], c[3]))
            }
            _ => Err("color must be a string or an array of 3 or 4 integers".to_string()),
        }
    }

    pub fn parse(text: &str) -> core::result::Result<Color, String> {
        let Some(hex) = text.strip_prefix('#') else {
            return Self::from_name(text).ok_or_else(|| format!("unknown color {text:?}"));
        };

        let bad = || format!("bad hex color {text:?}");
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let a = if hex.len() == 8 { byte(6)? } else { 0xff };
        Ok(Color::from_rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

macro_rules! well_known_colors {
    (
        $($name:ident = $text:literal $hex:expr,)*
    ) => {
        impl Color {
            $(
                pub const $name: Color = Color::from_u32_rgb($hex);
            )*

            /// Looks up a well-known color by name, ignoring case.
            pub fn from_name(name: &str) -> Option<Color> {
                $(
                    if name.eq_ignore_ascii_case($text) {
                        return Some(Self::$name);
                    }
                )*
                if name.eq_ignore_ascii_case("Transparent") {
                    return Some(Self::TRANSPARENT);
                }
                None
            }
        }
    }
}

well_known_colors! {
    BLACK = "Black" 0x00_00_00,
    WHITE = "White" 0xff_ff_ff,
    RED = "Red" 0xff_00_00,
    GREEN = "Green" 0x00_ff_00,
    BLUE = "Blue" 0x00_00_ff,
    GRAY = "Gray" 0x80_80_80,
    LIGHT_GRAY = "LightGray" 0xd3_d3_d3,
    DARK_GRAY = "DarkGray" 0x40_40_40,
    YELLOW = "Yellow" 0xff_ff_00,
    ORANGE = "Orange" 0xff_a5_00,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba(0, 0, 0, 0);
}
