use super::*;

/// Loads a `TextStyle` definition. `BasedOn` names an earlier style to start
/// from; every other key must be a style attribute.
pub(crate) fn text_style(obj: &Map<String, Value>, global: &mut GlobalJsonData<'_>) -> Result<Style> {
    let mut style = match obj.get("BasedOn") {
        Some(value) => {
            let name = fields::string(value, "BasedOn")?;
            match global.styles.get(name) {
                Some(base) => Style::clone(base),
                None => {
                    return Err(Error::malformed(
                        format!("BasedOn names unknown style {name:?}"),
                        value,
                    ))
                }
            }
        }
        None => Style::default(),
    };

    for (key, value) in obj.iter() {
        if matches!(key.as_str(), "Type" | "import" | "BasedOn") {
            continue;
        }
        let Some(attribute) = style_attribute(key) else {
            return Err(Error::malformed(
                format!("{key:?} is not a style attribute"),
                &Value::Object(obj.clone()),
            ));
        };
        attribute(&mut style, value).map_err(|msg| Error::malformed(format!("{key}: {msg}"), value))?;
    }
    Ok(style)
}
