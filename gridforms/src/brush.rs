use super::*;
use std::path::PathBuf;

/// Describes how an area is filled. The renderer turns these into device
/// resources; the layout engine only carries them around.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    SolidColor(Color),
    /// Start and end points are relative to the filled rectangle, in
    /// `0.0..=1.0`.
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        stops: Vec<GradientStop>,
    },
    Bitmap {
        path: PathBuf,
        opacity: f32,
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl Brush {
    pub fn solid(color: Color) -> Rc<Brush> {
        Rc::new(Brush::SolidColor(color))
    }

    /// The color to use where a single color is needed (e.g. hit-test
    /// highlights). Gradients report their first stop.
    pub fn primary_color(&self) -> Option<Color> {
        match self {
            Brush::SolidColor(c) => Some(*c),
            Brush::LinearGradient { stops, .. } | Brush::RadialGradient { stops, .. } => {
                stops.first().map(|s| s.color)
            }
            Brush::Bitmap { .. } => None,
        }
    }
}
