use super::*;

impl GlobalJsonData<'_> {
    /// Loads a brush from a brush object (dispatched on its `Type`) or from a
    /// color string, which is shorthand for a solid color brush.
    pub fn load_brush(&mut self, value: &Value) -> Result<Rc<Brush>> {
        if let Some(text) = value.as_str() {
            return Color::parse(text)
                .map(Brush::solid)
                .map_err(|msg| Error::malformed(msg, value));
        }
        self.with_imports(value, |session, obj| {
            let ctx = session.ctx;
            let Some(type_name) = obj.get("Type").and_then(Value::as_str) else {
                return Err(Error::malformed("brush needs a \"Type\" string", value));
            };
            let Some(loader) = ctx.brushes.get(type_name) else {
                return Err(Error::malformed(
                    format!("unknown brush type {type_name:?}"),
                    value,
                ));
            };
            let brush = loader(obj, session)?;
            trace!("loaded {type_name} brush");
            Ok(Rc::new(brush))
        })
    }
}

fn warn_unknown_keys(obj: &Map<String, Value>, known: &[&str]) {
    for key in obj.keys() {
        if key != "Type" && key != "import" && !known.contains(&key.as_str()) {
            warn!("ignoring unknown brush key {key:?}");
        }
    }
}

#[track_caller]
fn required<'v>(obj: &'v Map<String, Value>, key: &str) -> Result<&'v Value> {
    obj.get(key).ok_or_else(|| {
        Error::malformed(format!("brush needs {key:?}"), &Value::Object(obj.clone()))
    })
}

#[track_caller]
fn color(value: &Value) -> Result<Color> {
    Color::from_json(value).map_err(|msg| Error::malformed(msg, value))
}

#[track_caller]
fn unit_interval(value: &Value, what: &str) -> Result<f32> {
    match value.as_f64() {
        Some(v) if (0.0..=1.0).contains(&v) => Ok(v as f32),
        _ => Err(Error::malformed(format!("{what} must be a number in [0, 1]"), value)),
    }
}

fn gradient_stops(value: &Value) -> Result<Vec<GradientStop>> {
    let Some(items) = value.as_array().filter(|items| !items.is_empty()) else {
        return Err(Error::malformed("Stops must be a non-empty array", value));
    };
    items
        .iter()
        .map(|item| {
            let Some(stop) = item.as_object() else {
                return Err(Error::malformed("a gradient stop must be an object", item));
            };
            Ok(GradientStop {
                position: unit_interval(required(stop, "Position")?, "Position")?,
                color: color(required(stop, "Color")?)?,
            })
        })
        .collect()
}

pub(crate) fn solid_color(obj: &Map<String, Value>, _: &mut GlobalJsonData<'_>) -> Result<Brush> {
    warn_unknown_keys(obj, &["Color"]);
    Ok(Brush::SolidColor(color(required(obj, "Color")?)?))
}

/// `Start` and `End` are relative to the filled area.
pub(crate) fn linear_gradient(
    obj: &Map<String, Value>,
    _: &mut GlobalJsonData<'_>,
) -> Result<Brush> {
    warn_unknown_keys(obj, &["Start", "End", "Stops"]);
    Ok(Brush::LinearGradient {
        start: fields::point(required(obj, "Start")?, "Start")?,
        end: fields::point(required(obj, "End")?, "End")?,
        stops: gradient_stops(required(obj, "Stops")?)?,
    })
}

/// `Center` defaults to the middle of the filled area.
pub(crate) fn radial_gradient(
    obj: &Map<String, Value>,
    _: &mut GlobalJsonData<'_>,
) -> Result<Brush> {
    warn_unknown_keys(obj, &["Center", "RadiusX", "RadiusY", "Stops"]);
    let center = match obj.get("Center") {
        Some(v) => fields::point(v, "Center")?,
        None => Point::new(0.5, 0.5),
    };
    Ok(Brush::RadialGradient {
        center,
        radius_x: fields::non_negative(required(obj, "RadiusX")?, "RadiusX")?,
        radius_y: fields::non_negative(required(obj, "RadiusY")?, "RadiusY")?,
        stops: gradient_stops(required(obj, "Stops")?)?,
    })
}

/// `Path` is relative to the UI root. The image itself is not read here.
pub(crate) fn bitmap(obj: &Map<String, Value>, global: &mut GlobalJsonData<'_>) -> Result<Brush> {
    warn_unknown_keys(obj, &["Path", "Opacity"]);
    let path = fields::string(required(obj, "Path")?, "Path")?;
    let opacity = match obj.get("Opacity") {
        Some(v) => unit_interval(v, "Opacity")?,
        None => 1.0,
    };
    Ok(Brush::Bitmap {
        path: global.context().ui_root().join(path),
        opacity,
    })
}
