use super::*;

/// Layout keys that configure the layout itself. Every other key names a
/// child.
const RESERVED_KEYS: &[&str] = &[
    "import",
    "id",
    "Type",
    "Brush",
    "Row",
    "Column",
    "RowSpan",
    "ColumnSpan",
    "RowDefinitions",
    "ColumnDefinitions",
    "Margin",
    "BorderBrush",
    "BorderWidth",
    "OnResize",
];

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key) || fields::BORDER_OFFSET_KEYS.contains(&key)
}

/// JSON key names for one axis of line definitions.
struct LineKeys {
    list: &'static str,
    size: &'static str,
    leading: &'static str,
    trailing: &'static str,
    min: &'static str,
    max: &'static str,
}

const ROW_KEYS: LineKeys = LineKeys {
    list: "RowDefinitions",
    size: "Height",
    leading: "TopAdjustable",
    trailing: "BottomAdjustable",
    min: "MinHeight",
    max: "MaxHeight",
};

const COLUMN_KEYS: LineKeys = LineKeys {
    list: "ColumnDefinitions",
    size: "Width",
    leading: "LeftAdjustable",
    trailing: "RightAdjustable",
    min: "MinWidth",
    max: "MaxWidth",
};

/// A parsed row or column definition, before it becomes a [`Row`] or
/// [`Column`].
struct LineDefinition {
    track: Track,
    leading: bool,
    trailing: bool,
}

fn line_definition(obj: &Map<String, Value>, keys: &LineKeys) -> Result<LineDefinition> {
    let Some(size) = obj.get(keys.size) else {
        return Err(Error::malformed(
            format!("{} entry needs {:?}", keys.list, keys.size),
            &Value::Object(obj.clone()),
        ));
    };
    let mut line = LineDefinition {
        track: Track::new(SizingValue::from_json(size)?),
        leading: false,
        trailing: false,
    };

    for (key, value) in obj.iter() {
        let key = key.as_str();
        if key == keys.leading {
            line.leading = fields::boolean(value, key)?;
        } else if key == keys.trailing {
            line.trailing = fields::boolean(value, key)?;
        } else if key == keys.min {
            line.track.min = Some(SizingValue::from_json(value)?);
        } else if key == keys.max {
            line.track.max = Some(SizingValue::from_json(value)?);
        } else if key != keys.size && key != "import" {
            warn!("ignoring unknown {} key {key:?}", keys.list);
        }
    }
    Ok(line)
}

impl GlobalJsonData<'_> {
    /// Reads one `RowDefinitions` or `ColumnDefinitions` array, resolving
    /// imports per entry.
    fn line_definitions(&mut self, value: &Value, keys: &LineKeys) -> Result<Vec<LineDefinition>> {
        let Some(entries) = value.as_array() else {
            return Err(Error::malformed(format!("{} must be an array", keys.list), value));
        };
        entries
            .iter()
            .map(|entry| self.with_imports(entry, |_, obj| line_definition(obj, keys)))
            .collect()
    }

    /// Loads the top-level object of a UI description. Its `Type`, if any,
    /// must name a layout kind.
    pub(crate) fn load_root(&mut self, value: &Value) -> Result<Layout> {
        self.with_imports(value, |session, obj| {
            let ctx = session.ctx;
            let mut layout = match obj.get("Type") {
                None => Layout::new("root"),
                Some(t) => match t.as_str() {
                    Some(type_name) if ctx.is_layout_kind(type_name) => {
                        ctx.new_layout(type_name, "root")
                    }
                    _ => return Err(Error::malformed("the root must be a layout", value)),
                },
            };
            session.load_layout(&mut layout, obj)?;
            debug!(
                "loaded UI: {} controls, {} named styles",
                session.controls.len(),
                session.styles.len()
            );
            Ok(layout)
        })
    }

    /// Applies a layout object to `layout`, in order: background brush,
    /// row and column definitions, margin, border, id, resize handler, and
    /// finally the children.
    pub(crate) fn load_layout(&mut self, layout: &mut Layout, obj: &Map<String, Value>) -> Result<()> {
        if let Some(brush) = obj.get("Brush") {
            layout.background = Some(self.load_brush(brush)?);
        }

        if let Some(value) = obj.get(ROW_KEYS.list) {
            for line in self.line_definitions(value, &ROW_KEYS)? {
                let mut row = Row::new(line.track.sizing);
                *row = line.track;
                row.top_adjustable = line.leading;
                row.bottom_adjustable = line.trailing;
                layout.add_row(row);
            }
        }
        if let Some(value) = obj.get(COLUMN_KEYS.list) {
            for line in self.line_definitions(value, &COLUMN_KEYS)? {
                let mut column = Column::new(line.track.sizing);
                *column = line.track;
                column.left_adjustable = line.leading;
                column.right_adjustable = line.trailing;
                layout.add_column(column);
            }
        }
        layout.fill_default_lines();

        if let Some(margin) = obj.get("Margin") {
            layout.margin = fields::margin(margin)?;
        }

        match (obj.get("BorderWidth"), obj.get("BorderBrush")) {
            (Some(width), None) => {
                return Err(Error::malformed(
                    "BorderWidth requires a BorderBrush",
                    width,
                ))
            }
            (width, Some(brush)) => {
                layout.border_brush = Some(self.load_brush(brush)?);
                if let Some(width) = width {
                    layout.border_widths = fields::border_widths(width)?;
                }
            }
            (None, None) => {}
        }
        layout.border_offsets = fields::border_offsets(obj)?;

        if let Some(id) = obj.get("id") {
            layout.id = Some(fields::uint(id, "id")?);
        }
        if let Some(handler) = obj.get("OnResize") {
            layout.on_resize = Some(fields::string(handler, "OnResize")?.to_string());
        }

        for (name, child) in obj.iter() {
            if !is_reserved(name) {
                self.load_child(layout, name, child)?;
            }
        }
        Ok(())
    }

    /// Loads one child entry of a layout object, dispatching on its `Type`.
    fn load_child(&mut self, parent: &mut Layout, name: &str, node: &Value) -> Result<()> {
        if !node.is_object() {
            return Err(Error::malformed(
                format!("{name:?} is not a layout key, so it must be a child object"),
                node,
            ));
        }
        self.with_imports(node, |session, obj| {
            let ctx = session.ctx;
            let Some(type_name) = obj.get("Type").and_then(Value::as_str) else {
                return Err(Error::malformed(
                    format!("child {name:?} needs a \"Type\" string"),
                    node,
                ));
            };

            if ctx.is_layout_kind(type_name) {
                let position = fields::position(obj)?;
                let mut layout = ctx.new_layout(type_name, name);
                session.load_layout(&mut layout, obj)?;
                parent.add_sub_layout(position, layout)?;
            } else if let Some(kind) = ctx.control_kind(type_name) {
                let position = fields::position(obj)?;
                let Some(control) = kind.load(name, obj, parent, session) else {
                    return Err(Error::control_load(
                        name,
                        type_name,
                        &Value::Object(obj.clone()),
                    ));
                };
                session.record_control(name, type_name);
                parent.add_control(position, control)?;
            } else if let Some(loader) = ctx.styles.get(type_name) {
                let style = loader(obj, session)?;
                if session.styles.insert(name.to_string(), Rc::new(style)).is_some() {
                    warn!("style {name:?} redefined");
                }
            } else {
                warn!("{}: skipping {name:?} of unknown type {type_name:?}", parent.name);
            }
            Ok(())
        })
    }
}

impl LoaderContext {
    fn new_layout(&self, type_name: &str, name: &str) -> Layout {
        match self.layouts.get(type_name) {
            Some(factory) => {
                let mut layout = factory(name);
                layout.name = name.to_string();
                layout
            }
            None => Layout::new(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: Value) -> Result<Layout> {
        LoaderContext::builder().build().load_ui_value(&value)
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn span_fixups_warn_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let root = tracing::subscriber::with_default(subscriber, || {
            load(json!({ "a": { "Type": "Label", "RowSpan": 0, "ColumnSpan": 4 } }))
        })
        .unwrap();

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(log.matches("row span of 0").count(), 1, "{log}");
        assert_eq!(log.matches("clipped").count(), 1, "{log}");
        assert_eq!(root.children()[0].position, RowColumnPosition::cell(0, 0));
    }

    #[test]
    fn definitions() {
        let root = load(json!({
            "RowDefinitions": [
                { "Height": 40, "BottomAdjustable": true, "MinHeight": "20", "MaxHeight": "25%" },
                { "Height": "1*", "Comment": "ignored" }
            ],
            "ColumnDefinitions": [{ "Width": "30%", "LeftAdjustable": true }]
        }))
        .unwrap();
        let rows = root.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sizing, SizingValue::fixed(40.0));
        assert!(rows[0].bottom_adjustable && !rows[0].top_adjustable);
        assert_eq!(rows[0].min, Some(SizingValue::fixed(20.0)));
        assert_eq!(rows[0].max, Some(SizingValue::percent(0.25)));
        assert_eq!(rows[1].sizing, SizingValue::star(1.0));
        assert_eq!(root.columns()[0].sizing, SizingValue::percent(0.3));
        assert!(root.columns()[0].left_adjustable);
    }

    #[test]
    fn bad_definitions_are_fatal() {
        assert!(load(json!({ "RowDefinitions": { "Height": 1 } })).is_err());
        assert!(load(json!({ "RowDefinitions": [{ "Width": 10 }] })).is_err());
        assert!(load(json!({ "ColumnDefinitions": [{ "Width": "abc" }] })).is_err());
        assert!(load(json!({ "ColumnDefinitions": [{ "Width": 0 }] })).is_err());
        assert!(load(json!({ "RowDefinitions": [{ "Height": 5, "TopAdjustable": "yes" }] })).is_err());
        assert!(load(json!({ "RowDefinitions": [7] })).is_err());
    }

    #[test]
    fn layout_attributes() {
        let root = load(json!({
            "Brush": "White",
            "Margin": [4, 8],
            "BorderBrush": { "Type": "SolidColor", "Color": "Black" },
            "BorderWidth": 2,
            "BorderTopLeftOffsetX": 6,
            "id": 3,
            "OnResize": "relayout"
        }))
        .unwrap();
        assert_eq!(root.margin, Margin::symmetric(4.0, 8.0));
        assert_eq!(root.border_widths, BorderWidths::all(2.0));
        assert_eq!(root.border_offsets.top_left_x, 6.0);
        assert_eq!(root.background.as_deref(), Some(&Brush::SolidColor(Color::WHITE)));
        assert_eq!(root.id(), Some(3));
        assert_eq!(root.on_resize.as_deref(), Some("relayout"));
        assert!(root.children().is_empty());
    }

    #[test]
    fn root_type_must_be_a_layout() {
        assert!(load(json!({ "Type": "Layout" })).is_ok());
        assert!(load(json!({ "Type": "Label" })).is_err());
        assert!(load(json!([])).is_err());
    }

    #[test]
    fn children_are_typed_objects() {
        assert!(load(json!({ "title": "hello" })).is_err());
        assert!(load(json!({ "title": { "Text": "hello" } })).is_err());
        assert!(load(json!({ "title": { "Type": 3 } })).is_err());
    }

    #[test]
    fn child_dispatch() {
        let root = load(json!({
            "ColumnDefinitions": [{ "Width": "1*" }, { "Width": "1*" }],
            "Heading": { "Type": "TextStyle", "FontSize": 24 },
            "title": { "Type": "Label", "Text": "hi", "Style": "Heading" },
            "side": {
                "Type": "Layout",
                "Column": 1,
                "inner": { "Type": "Button", "Text": "Go" }
            },
            "later": { "Type": "Sparkline" }
        }))
        .unwrap();

        let names: Vec<&str> = root.children().iter().map(|c| c.item.name()).collect();
        assert_eq!(names, ["title", "side"]);
        let title = root.find_control("title").unwrap();
        assert_eq!(title.style().unwrap().font.size, 24.0);
        assert_eq!(root.find_layout("side").unwrap().rows().len(), 1);
        assert_eq!(root.find_control("inner").unwrap().type_name(), "Button");
    }

    #[test]
    fn registered_layout_kinds() {
        let mut ctx = LoaderContext::builder().build();
        ctx.register_layout("Toolbar", |name| {
            let mut layout = Layout::new(name);
            layout.add_row(Row::new(SizingValue::fixed(32.0)));
            layout
        });
        let root = ctx
            .load_ui_value(&json!({ "bar": { "Type": "Toolbar", "ColumnDefinitions": [{ "Width": 10 }] } }))
            .unwrap();
        let bar = root.find_layout("bar").unwrap();
        assert_eq!(bar.rows()[0].sizing, SizingValue::fixed(32.0));
        assert_eq!(bar.columns().len(), 1);
    }

    #[test]
    fn failed_controls_fail_the_load() {
        let err = load(json!({ "b": { "Type": "Button", "Enabled": "sometimes" } })).unwrap_err();
        match err {
            Error::ControlLoad { name, type_name, fragment, .. } => {
                assert_eq!(name, "b");
                assert_eq!(type_name, "Button");
                assert!(fragment.contains("sometimes"));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
