use gridforms::*;
use serde_json::{json, Value};

fn context(files: &[(&str, Value)]) -> LoaderContext {
    let mut fragments = MemoryFragments::new();
    for (path, value) in files {
        fragments.insert(path, value.to_string());
    }
    LoaderContext::builder().fragment_source(fragments).build()
}

fn load(value: Value) -> Result<Layout> {
    context(&[]).load_ui_value(&value)
}

fn resolved(value: Value, width: f32, height: f32) -> Layout {
    let mut root = load(value).unwrap();
    root.resolve(Rect::from_size(width, height));
    root
}

fn viewport(root: &Layout, name: &str) -> Rect {
    root.find_control(name).unwrap().viewport()
}

#[test]
fn rows_and_columns_tile_the_inner_rect() {
    let root = resolved(
        json!({
            "Margin": [10],
            "RowDefinitions": [{ "Height": 50 }, { "Height": "25%" }, { "Height": "1*" }, { "Height": "3*" }],
            "ColumnDefinitions": [{ "Width": "120" }, { "Width": "3*" }, { "Width": "1*" }]
        }),
        400.0,
        820.0,
    );

    let inner = root.inner_rect();
    let mut top = inner.top;
    for row in root.rows() {
        assert_eq!(row.offset(), top);
        top = row.end();
    }
    assert_eq!(top, inner.bottom);
    let heights: Vec<f32> = root.rows().iter().map(|r| r.size()).collect();
    assert_eq!(heights, [50.0, 200.0, 137.5, 412.5]);

    let mut left = inner.left;
    for column in root.columns() {
        assert_eq!(column.offset(), left);
        left = column.end();
    }
    assert_eq!(left, inner.right);
    assert_eq!(root.columns()[1].size(), 195.0);
}

#[test]
fn missing_definitions_give_one_star_line() {
    let root = resolved(json!({ "only": { "Type": "Label", "Text": "x" } }), 300.0, 200.0);
    assert_eq!(root.rows().len(), 1);
    assert_eq!(root.columns().len(), 1);
    assert_eq!(root.rows()[0].sizing, SizingValue::star(1.0));
    assert_eq!(viewport(&root, "only"), Rect::new(0.0, 0.0, 300.0, 200.0));
}

#[test]
fn star_lines_collapse_when_fixed_lines_overflow() {
    let root = resolved(
        json!({ "RowDefinitions": [{ "Height": 300 }, { "Height": "1*" }] }),
        100.0,
        200.0,
    );
    assert_eq!(root.rows()[0].size(), 300.0);
    assert_eq!(root.rows()[1].size(), 0.0);
}

#[test]
fn spans_are_fitted_to_the_grid() {
    let root = resolved(
        json!({
            "RowDefinitions": [{ "Height": "1*" }, { "Height": "1*" }],
            "ColumnDefinitions": [{ "Width": "1*" }, { "Width": "1*" }],
            "zero": { "Type": "Label", "RowSpan": 0, "ColumnSpan": 0 },
            "long": { "Type": "Label", "Row": 1, "ColumnSpan": 5 }
        }),
        200.0,
        100.0,
    );
    assert_eq!(viewport(&root, "zero"), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(viewport(&root, "long"), Rect::new(0.0, 50.0, 200.0, 100.0));

    let err = load(json!({ "far": { "Type": "Label", "Column": 1 } })).unwrap_err();
    assert!(matches!(err, Error::OutOfGrid { column: 1, columns: 1, .. }));
}

#[test]
fn margins() {
    for (margin, expected) in [
        (json!([5]), Margin::all(5.0)),
        (json!([5, 10]), Margin::new(5.0, 10.0, 5.0, 10.0)),
        (json!([1, 2, 3, 4]), Margin::new(1.0, 2.0, 3.0, 4.0)),
    ] {
        assert_eq!(load(json!({ "Margin": margin })).unwrap().margin, expected);
    }
    assert!(load(json!({ "Margin": [1, 2, 3] })).unwrap_err().is_malformed());
    assert!(load(json!({ "Margin": [-1] })).unwrap_err().is_malformed());
}

#[test]
fn border_width_needs_a_brush() {
    let err = load(json!({ "BorderWidth": 2 })).unwrap_err();
    assert!(err.to_string().contains("BorderBrush"));

    let root = resolved(
        json!({
            "BorderWidth": [1, 2, 3, 4],
            "BorderBrush": "Black",
            "BorderBottomLeftOffsetY": 5,
            "cell": { "Type": "Label" }
        }),
        100.0,
        100.0,
    );
    assert_eq!(root.inner_rect(), Rect::new(1.0, 2.0, 97.0, 96.0));
    assert_eq!(viewport(&root, "cell"), root.inner_rect());
    assert_eq!(root.border_polygon()[6], Point::new(0.0, 95.0));

    assert!(load(json!({ "BorderBrush": "Black", "BorderTopLeftOffsetX": -2 })).is_err());
}

#[test]
fn size_strings() {
    let root = load(json!({
        "RowDefinitions": [
            { "Height": "50%" },
            { "Height": "2*" },
            { "Height": "120" },
            { "Height": "120px" },
            { "Height": 7.5 }
        ]
    }))
    .unwrap();
    let sizing: Vec<SizingValue> = root.rows().iter().map(|r| r.sizing).collect();
    assert_eq!(
        sizing,
        [
            SizingValue::percent(0.5),
            SizingValue::star(2.0),
            SizingValue::fixed(120.0),
            SizingValue::fixed(120.0),
            SizingValue::fixed(7.5),
        ]
    );

    for bad in ["150%", "0*", "-3", "wide", ""] {
        let err = load(json!({ "RowDefinitions": [{ "Height": bad }] })).unwrap_err();
        assert!(err.is_malformed(), "{bad:?} should be rejected");
    }
}

#[test]
fn imports_merge_with_local_keys() {
    let ctx = context(&[
        ("main.json", json!({ "import": "base.json", "Margin": [2], "body": { "import": "label.json", "Row": 1 } })),
        ("base.json", json!({ "Margin": [9], "RowDefinitions": [{ "Height": 10 }, { "Height": "1*" }] })),
        ("label.json", json!({ "Type": "Label", "Text": "imported", "Row": 0 })),
    ]);
    let mut root = ctx.load_ui("main.json").unwrap();
    root.resolve(Rect::from_size(100.0, 100.0));
    assert_eq!(root.margin, Margin::all(2.0));
    assert_eq!(root.rows().len(), 2);
    let body = root.find_control("body").unwrap();
    assert_eq!(body.downcast_ref::<Label>().unwrap().text(), "imported");
    assert_eq!(body.viewport(), Rect::new(2.0, 12.0, 98.0, 98.0));
}

#[test]
fn import_cycles_are_fatal() {
    let ctx = context(&[
        ("main.json", json!({ "panel": { "import": "panel.json" } })),
        ("panel.json", json!({ "Type": "Layout", "inner": { "import": "inner.json" } })),
        ("inner.json", json!({ "Type": "Layout", "again": { "import": "panel.json" } })),
    ]);
    match ctx.load_ui("main.json").unwrap_err() {
        Error::ImportCycle { chain } => {
            assert_eq!(chain, ["main.json", "panel.json", "inner.json", "panel.json"]);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn sibling_imports_of_one_fragment_are_not_cycles() {
    let ctx = context(&[
        ("main.json", json!({
            "ColumnDefinitions": [{ "Width": "1*" }, { "Width": "1*" }],
            "a": { "import": "button.json" },
            "b": { "import": "button.json", "Column": 1 }
        })),
        ("button.json", json!({ "Type": "Button", "Text": "Same" })),
    ]);
    let root = ctx.load_ui("main.json").unwrap();
    assert_eq!(root.children().len(), 2);
}

#[test]
fn nested_layout_may_import_what_its_parent_imports() {
    let ctx = context(&[
        ("main.json", json!({
            "import": "defaults.json",
            "panel": { "Type": "Layout", "import": "defaults.json" }
        })),
        ("defaults.json", json!({ "Margin": [4], "Brush": "White" })),
    ]);
    let root = ctx.load_ui("main.json").unwrap();
    let panel = root.find_layout("panel").unwrap();
    assert_eq!(root.margin, Margin::all(4.0));
    assert_eq!(panel.margin, Margin::all(4.0));
    assert_eq!(panel.background.as_deref(), Some(&Brush::SolidColor(Color::WHITE)));
}

#[test]
fn unknown_types_are_skipped() {
    let root = load(json!({
        "chart": { "Type": "Chart", "Series": [1, 2, 3] },
        "ok": { "Type": "Label" }
    }))
    .unwrap();
    assert_eq!(root.children().len(), 1);
    assert!(root.find_control("chart").is_none());
}

#[test]
fn style_and_inline_attributes_do_not_mix() {
    let err = load(json!({
        "Heading": { "Type": "TextStyle", "FontSize": 30 },
        "title": { "Type": "Label", "Style": "Heading", "Color": "Red" }
    }))
    .unwrap_err();
    assert!(matches!(err, Error::ControlLoad { ref name, .. } if name == "title"));
}

#[test]
fn inline_attributes_build_one_private_style() {
    let root = load(json!({
        "title": {
            "Type": "Label",
            "FontFamily": "Georgia",
            "FontSize": 22,
            "FontStyle": "Italic",
            "TextAlignment": "Center",
            "ParagraphAlignment": "Center"
        }
    }))
    .unwrap();
    let style = root.find_control("title").unwrap().style().unwrap();
    assert_eq!(style.font.family, "Georgia");
    assert_eq!(style.font.size, 22.0);
    assert!(style.font.italic);
    assert_eq!(style.horizontal_alignment, HorizontalAlignment::Center);
    assert_eq!(style.vertical_alignment, VerticalAlignment::Center);
    assert_eq!(style.color, Style::default().color);
}

#[test]
fn named_styles_are_shared_between_controls() {
    let root = load(json!({
        "ColumnDefinitions": [{ "Width": "1*" }, { "Width": "1*" }],
        "Body": { "Type": "TextStyle", "FontSize": 11 },
        "a": { "Type": "Label", "Style": "Body" },
        "b": { "Type": "TextBox", "Column": 1, "Style": "Body" }
    }))
    .unwrap();
    let a = root.find_control("a").unwrap().style().unwrap();
    let b = root.find_control("b").unwrap().style().unwrap();
    assert!(std::rc::Rc::ptr_eq(a, b));
}

#[test]
fn styles_must_be_defined_before_use() {
    let err = load(json!({
        "a": { "Type": "Label", "Style": "Body" },
        "Body": { "Type": "TextStyle", "FontSize": 11 }
    }))
    .unwrap_err();
    assert!(matches!(err, Error::ControlLoad { .. }));
}

#[test]
fn unknown_control_keys_fail_the_load() {
    let err = load(json!({ "b": { "Type": "Button", "Txet": "Go" } })).unwrap_err();
    match err {
        Error::ControlLoad { type_name, fragment, .. } => {
            assert_eq!(type_name, "Button");
            assert!(fragment.contains("Txet"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn builtin_control_keys() {
    let root = load(json!({
        "RowDefinitions": [{ "Height": 30 }, { "Height": "1*" }],
        "go": { "Type": "Button", "Text": "Go", "Enabled": false, "Kind": "CheckBox", "Brush": "Yellow", "id": 4 },
        "notes": { "Type": "TextBox", "Row": 1, "Text": "hi", "Placeholder": "...", "ReadOnly": true, "Multiline": true }
    }))
    .unwrap();

    let go = root.find_control("go").unwrap();
    let button = go.downcast_ref::<Button>().unwrap();
    assert_eq!(button.text(), "Go");
    assert!(!button.is_enabled());
    assert_eq!(button.button_kind(), ButtonKind::CheckBox);
    assert_eq!(go.brush().unwrap().primary_color(), Some(Color::YELLOW));
    assert_eq!(root.find_by_id(4).unwrap().name(), "go");

    let notes = root.find_control("notes").unwrap().downcast_ref::<TextBox>().unwrap();
    assert_eq!(notes.text(), "hi");
    assert_eq!(notes.placeholder(), "...");
    assert!(notes.is_readonly() && notes.is_multiline());
}

#[test]
fn custom_control_kinds() {
    struct Gauge {
        control: ControlState,
        value: f64,
    }
    impl std::ops::Deref for Gauge {
        type Target = ControlState;
        fn deref(&self) -> &ControlState {
            &self.control
        }
    }
    impl std::ops::DerefMut for Gauge {
        fn deref_mut(&mut self) -> &mut ControlState {
            &mut self.control
        }
    }
    impl Control for Gauge {
        fn type_name(&self) -> &'static str {
            "Gauge"
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    let mut ctx = LoaderContext::builder().no_builtin_controls().build();
    let mut kind = ControlKind::new("Gauge", |_| Gauge {
        control: ControlState::default(),
        value: 0.0,
    });
    kind.on_key("Value", |gauge: &mut Gauge, value, _, _| match value.as_f64() {
        Some(v) => {
            gauge.value = v;
            true
        }
        None => false,
    });
    ctx.register_control(kind);

    let root = ctx
        .load_ui_value(&json!({ "g": { "Type": "Gauge", "Value": 0.75 } }))
        .unwrap();
    let gauge = root.find_control("g").unwrap();
    assert_eq!(gauge.name(), "g");
    assert_eq!(gauge.downcast_ref::<Gauge>().unwrap().value, 0.75);

    // Without the builtin kinds, a Label is just an unknown type.
    let root = ctx.load_ui_value(&json!({ "l": { "Type": "Label" } })).unwrap();
    assert!(root.children().is_empty());
}

#[test]
fn resize_and_drag_through_the_app() {
    let root = load(json!({
        "ColumnDefinitions": [
            { "Width": 100, "RightAdjustable": true, "MinWidth": 50, "MaxWidth": "50%" },
            { "Width": "1*" }
        ],
        "left": { "Type": "Label" },
        "right": { "Type": "Label", "Column": 1 }
    }))
    .unwrap();
    let mut app = App::builder().size(400.0, 300.0).build(root);
    assert_eq!(viewport(app.root(), "right"), Rect::new(100.0, 0.0, 400.0, 300.0));

    let m = ModifierKeys(ModifierKeys::LBUTTON);
    app.post(WindowEvent::MouseDown { x: 99.0, y: 150.0, modifiers: m });
    app.post(WindowEvent::MouseMove { x: 400.0, y: 150.0, modifiers: m });
    app.post(WindowEvent::MouseUp { x: 400.0, y: 150.0, modifiers: m });
    app.pump();
    // Clamped to MaxWidth, 50% of 400.
    assert_eq!(app.root().columns()[0].size(), 200.0);
    assert_eq!(viewport(app.root(), "right"), Rect::new(200.0, 0.0, 400.0, 300.0));

    app.post(WindowEvent::Resized { width: 600.0, height: 300.0 });
    app.pump();
    assert_eq!(app.root().columns()[0].sizing, SizingValue::fixed(200.0));
    assert_eq!(viewport(app.root(), "right"), Rect::new(200.0, 0.0, 600.0, 300.0));
}

#[test]
fn ui_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("main.json"),
        r#"{ "bg": { "Type": "Label", "Text": "disk" }, "Brush": { "Type": "Bitmap", "Path": "bg.png" } }"#,
    )
    .unwrap();
    let ctx = LoaderContext::builder().ui_root(dir.path()).build();
    let root = ctx.load_ui("main.json").unwrap();
    assert_eq!(
        root.background.as_deref(),
        Some(&Brush::Bitmap { path: dir.path().join("bg.png"), opacity: 1.0 })
    );
    assert!(matches!(ctx.load_ui("missing.json"), Err(Error::Io { .. })));

    std::fs::write(dir.path().join("broken.json"), "{ \"a\": ").unwrap();
    assert!(matches!(ctx.load_ui("broken.json"), Err(Error::Parse { .. })));
}
