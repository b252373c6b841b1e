use super::*;

/// A font request. Resolving it to an actual face is the renderer's job.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub italic: bool,
    pub underline: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Segoe UI", 14.0)
    }
}

impl Font {
    pub fn new(family: &str, size: f32) -> Font {
        Self::builder(family, size).build()
    }

    pub fn builder(family: &str, size: f32) -> FontBuilder<'_> {
        FontBuilder {
            size,
            family,
            weight: FontWeight::Normal,
            italic: false,
            underline: false,
        }
    }
}

pub struct FontBuilder<'a> {
    size: f32,
    family: &'a str,
    weight: FontWeight,
    italic: bool,
    underline: bool,
}

impl<'a> FontBuilder<'a> {
    pub fn build(&self) -> Font {
        Font {
            family: self.family.to_string(),
            size: self.size,
            weight: self.weight,
            italic: self.italic,
            underline: self.underline,
        }
    }

    pub fn italic(&mut self) -> &mut Self {
        self.italic = true;
        self
    }

    pub fn underline(&mut self) -> &mut Self {
        self.underline = true;
        self
    }

    pub fn weight(&mut self, weight: FontWeight) -> &mut Self {
        self.weight = weight;
        self
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FontWeight {
    Thin,
    Light,
    Normal,
    Medium,
    SemiBold,
    Bold,
    Black,
}

impl FontWeight {
    pub fn from_name(name: &str) -> Option<FontWeight> {
        Some(match name {
            "Thin" => Self::Thin,
            "Light" => Self::Light,
            "Normal" | "Regular" => Self::Normal,
            "Medium" => Self::Medium,
            "SemiBold" => Self::SemiBold,
            "Bold" => Self::Bold,
            "Black" => Self::Black,
            _ => return None,
        })
    }

    /// The CSS / DirectWrite numeric weight.
    pub fn to_numeric(self) -> u16 {
        match self {
            Self::Thin => 100,
            Self::Light => 300,
            Self::Normal => 400,
            Self::Medium => 500,
            Self::SemiBold => 600,
            Self::Bold => 700,
            Self::Black => 900,
        }
    }
}
