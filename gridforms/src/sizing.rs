use super::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SizeKind {
    /// Absolute size in pixels.
    Fixed,
    /// Fraction of the parent's extent along the same axis, in (0, 1].
    Percent,
    /// Weighted share of whatever the fixed and percent lines left over.
    Star,
}

/// How a row or column (or one of its clamps) is sized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizingValue {
    pub kind: SizeKind,
    pub value: f32,
}

impl Default for SizingValue {
    fn default() -> Self {
        Self::star(1.0)
    }
}

impl SizingValue {
    pub const fn fixed(pixels: f32) -> Self {
        Self {
            kind: SizeKind::Fixed,
            value: pixels,
        }
    }

    /// `fraction` is already divided by 100.
    pub const fn percent(fraction: f32) -> Self {
        Self {
            kind: SizeKind::Percent,
            value: fraction,
        }
    }

    pub const fn star(weight: f32) -> Self {
        Self {
            kind: SizeKind::Star,
            value: weight,
        }
    }

    pub fn is_star(&self) -> bool {
        self.kind == SizeKind::Star
    }

    /// Converts to pixels. `star_total_weight` and `star_remaining` describe
    /// the star pass of the axis being resolved; they are ignored for fixed
    /// and percent values.
    pub fn resolve(&self, parent_extent: f32, star_total_weight: f32, star_remaining: f32) -> f32 {
        match self.kind {
            SizeKind::Fixed => self.value,
            SizeKind::Percent => self.value * parent_extent,
            SizeKind::Star => {
                if star_total_weight > 0.0 {
                    self.value / star_total_weight * star_remaining
                } else {
                    0.0
                }
            }
        }
    }

    /// Parses a `Height`/`Width`-style JSON value.
    ///
    /// A number is fixed pixels. A string is a numeral followed by an
    /// optional unit: `%` for percent, `*` for star, anything else for pixels.
    #[track_caller]
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                let v = n.as_f64().unwrap_or(f64::NAN) as f32;
                if v.is_finite() && v > 0.0 {
                    Ok(Self::fixed(v))
                } else {
                    Err(Error::malformed("pixel size must be a number greater than 0", value))
                }
            }
            Value::String(s) => Self::parse(s).map_err(|msg| Error::malformed(msg, value)),
            _ => Err(Error::malformed("size must be a number or a string", value)),
        }
    }

    /// Parses the string form, e.g. `"120"`, `"50%"`, `"2*"`.
    pub fn parse(text: &str) -> core::result::Result<Self, String> {
        let (numeral, unit) = split_numeral(text.trim());
        let v: f32 = numeral
            .parse()
            .map_err(|_| format!("{text:?} does not start with a number"))?;
        if !v.is_finite() {
            return Err(format!("{text:?} is not a finite number"));
        }

        match unit.trim_start().chars().next() {
            Some('%') => {
                if v > 0.0 && v <= 100.0 {
                    Ok(Self::percent(v / 100.0))
                } else {
                    Err(format!("percentage {text:?} must be in (0, 100]"))
                }
            }
            Some('*') => {
                if v > 0.0 {
                    Ok(Self::star(v))
                } else {
                    Err(format!("star weight {text:?} must be greater than 0"))
                }
            }
            _ => {
                if v > 0.0 {
                    Ok(Self::fixed(v))
                } else {
                    Err(format!("pixel size {text:?} must be greater than 0"))
                }
            }
        }
    }
}

/// Splits `text` into its leading numeral and whatever follows. The numeral
/// may carry an exponent (`5e2`) only if digits follow the `e`.
fn split_numeral(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    end += bytes[end..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .count();

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'-' | b'+')) {
            exponent += 1;
        }
        let digits = bytes[exponent..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exponent + digits;
        }
    }
    text.split_at(end)
}
