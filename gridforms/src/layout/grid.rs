use super::*;

/// Sizing policy and resolved geometry of one grid line. Shared by [`Row`]
/// and [`Column`], which deref to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub sizing: SizingValue,
    pub min: Option<SizingValue>,
    pub max: Option<SizingValue>,
    pub(crate) offset: f32,
    pub(crate) size: f32,
    // min/max in pixels, as of the last resolve
    pub(crate) min_px: f32,
    pub(crate) max_px: f32,
}

impl Default for Track {
    fn default() -> Self {
        Self::new(SizingValue::default())
    }
}

impl Track {
    pub fn new(sizing: SizingValue) -> Self {
        Self {
            sizing,
            min: None,
            max: None,
            offset: 0.0,
            size: 0.0,
            min_px: 0.0,
            max_px: f32::INFINITY,
        }
    }

    /// Resolved start, in window pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Resolved size, in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn end(&self) -> f32 {
        self.offset + self.size
    }

    /// Clamps a drag result to the limits computed by the last resolve.
    /// The minimum wins over the maximum, and nothing goes below one pixel.
    pub(crate) fn clamp_drag(&self, size: f32) -> f32 {
        size.min(self.max_px).max(self.min_px).max(1.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    track: Track,
    pub top_adjustable: bool,
    pub bottom_adjustable: bool,
}

impl Row {
    pub fn new(height: SizingValue) -> Self {
        Self {
            track: Track::new(height),
            top_adjustable: false,
            bottom_adjustable: false,
        }
    }
}

impl core::ops::Deref for Row {
    type Target = Track;
    fn deref(&self) -> &Track {
        &self.track
    }
}

impl core::ops::DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Track {
        &mut self.track
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Column {
    track: Track,
    pub left_adjustable: bool,
    pub right_adjustable: bool,
}

impl Column {
    pub fn new(width: SizingValue) -> Self {
        Self {
            track: Track::new(width),
            left_adjustable: false,
            right_adjustable: false,
        }
    }
}

impl core::ops::Deref for Column {
    type Target = Track;
    fn deref(&self) -> &Track {
        &self.track
    }
}

impl core::ops::DerefMut for Column {
    fn deref_mut(&mut self) -> &mut Track {
        &mut self.track
    }
}

/// Resolves one axis of a grid: sizes in two passes (fixed and percent
/// lines first, then star lines share what is left), then each line is
/// clamped on its own and offsets are accumulated from `start`.
///
/// Clamping does not hand the difference back to the other star lines, so
/// with active clamps the sizes need not add up to `extent`.
pub(crate) fn resolve_axis<'a, I>(tracks: I, start: f32, extent: f32)
where
    I: IntoIterator<Item = &'a mut Track>,
{
    let mut tracks: Vec<&'a mut Track> = tracks.into_iter().collect();

    let mut used = 0.0;
    let mut star_weight = 0.0;
    for track in tracks.iter() {
        if track.sizing.is_star() {
            star_weight += track.sizing.value;
        } else {
            used += track.sizing.resolve(extent, 0.0, 0.0);
        }
    }
    let remaining = (extent - used).max(0.0);

    let mut offset = start;
    for track in tracks.iter_mut() {
        track.min_px = match track.min {
            Some(min) => min.resolve(extent, star_weight, remaining),
            None => 0.0,
        };
        track.max_px = match track.max {
            Some(max) => max.resolve(extent, star_weight, remaining),
            None => f32::INFINITY,
        };

        let size = track.sizing.resolve(extent, star_weight, remaining);
        track.size = size.min(track.max_px).max(track.min_px);
        track.offset = offset;
        offset += track.size;
    }

    trace!(
        "resolved axis: extent {}, fixed {}, star weight {}, end {}",
        extent,
        used,
        star_weight,
        offset
    );
}
