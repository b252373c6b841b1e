//! Typed readers for individual JSON fields. All of these are fatal on bad
//! input: they return `Error::Malformed` carrying the offending node.

use super::*;

#[track_caller]
pub(crate) fn uint(value: &Value, what: &str) -> Result<u32> {
    match value.as_u64() {
        Some(v) if v <= u32::MAX as u64 => Ok(v as u32),
        _ => Err(Error::malformed(
            format!("{what} must be a non-negative integer"),
            value,
        )),
    }
}

#[track_caller]
pub(crate) fn boolean(value: &Value, what: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::malformed(format!("{what} must be true or false"), value))
}

#[track_caller]
pub(crate) fn non_negative(value: &Value, what: &str) -> Result<f32> {
    match value.as_f64() {
        Some(v) if v >= 0.0 && v.is_finite() => Ok(v as f32),
        _ => Err(Error::malformed(
            format!("{what} must be a number >= 0"),
            value,
        )),
    }
}

#[track_caller]
pub(crate) fn string<'v>(value: &'v Value, what: &str) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| Error::malformed(format!("{what} must be a string"), value))
}

/// `[all]`, `[horizontal, vertical]` or `[left, top, right, bottom]`.
pub(crate) fn margin(value: &Value) -> Result<Margin> {
    let Some(items) = value.as_array() else {
        return Err(Error::malformed("Margin must be an array of 1, 2 or 4 numbers", value));
    };
    let v = items
        .iter()
        .map(|item| non_negative(item, "Margin"))
        .collect::<Result<Vec<f32>>>()?;
    match v[..] {
        [all] => Ok(Margin::all(all)),
        [horizontal, vertical] => Ok(Margin::symmetric(horizontal, vertical)),
        [left, top, right, bottom] => Ok(Margin::new(left, top, right, bottom)),
        _ => Err(Error::malformed(
            format!("Margin must have 1, 2 or 4 elements, not {}", v.len()),
            value,
        )),
    }
}

/// A number for all four edges, or `[left, top, right, bottom]`.
pub(crate) fn border_widths(value: &Value) -> Result<BorderWidths> {
    if value.is_number() {
        return Ok(BorderWidths::all(non_negative(value, "BorderWidth")?));
    }
    match value.as_array().map(|a| &a[..]) {
        Some([left, top, right, bottom]) => Ok(BorderWidths {
            left: non_negative(left, "BorderWidth")?,
            top: non_negative(top, "BorderWidth")?,
            right: non_negative(right, "BorderWidth")?,
            bottom: non_negative(bottom, "BorderWidth")?,
        }),
        _ => Err(Error::malformed(
            "BorderWidth must be a number or an array of 4 numbers",
            value,
        )),
    }
}

pub(crate) const BORDER_OFFSET_KEYS: [&str; 8] = [
    "BorderTopLeftOffsetX",
    "BorderTopLeftOffsetY",
    "BorderTopRightOffsetX",
    "BorderTopRightOffsetY",
    "BorderBottomLeftOffsetX",
    "BorderBottomLeftOffsetY",
    "BorderBottomRightOffsetX",
    "BorderBottomRightOffsetY",
];

pub(crate) fn border_offsets(obj: &Map<String, Value>) -> Result<BorderOffsets> {
    let mut v = [0.0f32; 8];
    for (slot, key) in v.iter_mut().zip(BORDER_OFFSET_KEYS) {
        if let Some(value) = obj.get(key) {
            *slot = non_negative(value, key)?;
        }
    }
    Ok(BorderOffsets {
        top_left_x: v[0],
        top_left_y: v[1],
        top_right_x: v[2],
        top_right_y: v[3],
        bottom_left_x: v[4],
        bottom_left_y: v[5],
        bottom_right_x: v[6],
        bottom_right_y: v[7],
    })
}

/// Reads `Row`, `Column`, `RowSpan` and `ColumnSpan`. Missing keys take the
/// default `{0, 0, 1, 1}`; zero spans are left for the layout to fix up.
pub(crate) fn position(obj: &Map<String, Value>) -> Result<RowColumnPosition> {
    let get = |key: &str, default: u32| match obj.get(key) {
        Some(v) => uint(v, key),
        None => Ok(default),
    };
    Ok(RowColumnPosition {
        row: get("Row", 0)?,
        column: get("Column", 0)?,
        row_span: get("RowSpan", 1)?,
        column_span: get("ColumnSpan", 1)?,
    })
}

/// `[x, y]`.
pub(crate) fn point(value: &Value, what: &str) -> Result<Point> {
    match value.as_array().map(|a| &a[..]) {
        Some([x, y]) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Point::new(x as f32, y as f32)),
            _ => Err(Error::malformed(format!("{what} must hold two numbers"), value)),
        },
        _ => Err(Error::malformed(format!("{what} must be an [x, y] array"), value)),
    }
}
