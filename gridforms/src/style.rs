use super::*;

/// Text appearance shared by text-bearing controls. Named styles are shared
/// through `Rc`; inline styles belong to a single control.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub font: Font,
    pub color: Color,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: Font::default(),
            color: Color::BLACK,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

pub(crate) type StyleAttribute = fn(&mut Style, &Value) -> core::result::Result<(), String>;

/// JSON keys that set a style attribute, both in named style definitions and
/// inline on a control.
pub(crate) const STYLE_ATTRIBUTES: &[(&str, StyleAttribute)] = &[
    ("FontFamily", set_font_family),
    ("FontSize", set_font_size),
    ("FontWeight", set_font_weight),
    ("FontStyle", set_font_style),
    ("Color", set_color),
    ("TextAlignment", set_text_alignment),
    ("ParagraphAlignment", set_paragraph_alignment),
];

pub(crate) fn style_attribute(key: &str) -> Option<StyleAttribute> {
    STYLE_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, f)| *f)
}

fn as_str(value: &Value) -> core::result::Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, found {value}"))
}

fn set_font_family(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    let family = as_str(value)?;
    if family.is_empty() {
        return Err("font family is empty".to_string());
    }
    style.font.family = family.to_string();
    Ok(())
}

fn set_font_size(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    match value.as_f64() {
        Some(size) if size > 0.0 && size.is_finite() => {
            style.font.size = size as f32;
            Ok(())
        }
        _ => Err(format!("font size must be a number greater than 0, found {value}")),
    }
}

fn set_font_weight(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    let name = as_str(value)?;
    style.font.weight =
        FontWeight::from_name(name).ok_or_else(|| format!("unknown font weight {name:?}"))?;
    Ok(())
}

fn set_font_style(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    style.font.italic = match as_str(value)? {
        "Normal" => false,
        "Italic" | "Oblique" => true,
        other => return Err(format!("unknown font style {other:?}")),
    };
    Ok(())
}

fn set_color(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    style.color = Color::from_json(value)?;
    Ok(())
}

fn set_text_alignment(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    style.horizontal_alignment = match as_str(value)? {
        "Left" | "Leading" => HorizontalAlignment::Left,
        "Center" => HorizontalAlignment::Center,
        "Right" | "Trailing" => HorizontalAlignment::Right,
        "Justified" => HorizontalAlignment::Justified,
        other => return Err(format!("unknown text alignment {other:?}")),
    };
    Ok(())
}

fn set_paragraph_alignment(style: &mut Style, value: &Value) -> core::result::Result<(), String> {
    style.vertical_alignment = match as_str(value)? {
        "Top" | "Near" => VerticalAlignment::Top,
        "Center" => VerticalAlignment::Center,
        "Bottom" | "Far" => VerticalAlignment::Bottom,
        other => return Err(format!("unknown paragraph alignment {other:?}")),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_apply() {
        let mut style = Style::default();
        for (key, value) in [
            ("FontFamily", json!("Consolas")),
            ("FontSize", json!(18)),
            ("FontWeight", json!("Bold")),
            ("FontStyle", json!("Italic")),
            ("Color", json!("#ff0000")),
            ("TextAlignment", json!("Center")),
            ("ParagraphAlignment", json!("Far")),
        ] {
            style_attribute(key).unwrap()(&mut style, &value).unwrap();
        }
        assert_eq!(style.font.family, "Consolas");
        assert_eq!(style.font.size, 18.0);
        assert_eq!(style.font.weight, FontWeight::Bold);
        assert!(style.font.italic);
        assert_eq!(style.color, Color::RED);
        assert_eq!(style.horizontal_alignment, HorizontalAlignment::Center);
        assert_eq!(style.vertical_alignment, VerticalAlignment::Bottom);
    }

    #[test]
    fn bad_values_are_reported() {
        let mut style = Style::default();
        assert!(set_font_size(&mut style, &json!(-2)).is_err());
        assert!(set_font_weight(&mut style, &json!("Heavyish")).is_err());
        assert!(set_text_alignment(&mut style, &json!(3)).is_err());
        assert!(style_attribute("Padding").is_none());
        assert_eq!(style, Style::default());
    }
}
