use gridforms::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // gridforms-hello [path/to/ui.json]
    let ui_file = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => Path::new(env!("CARGO_MANIFEST_DIR")).join("ui/main.json"),
    };
    let (Some(ui_root), Some(file_name)) = (ui_file.parent(), ui_file.file_name()) else {
        eprintln!("not a file path: {}", ui_file.display());
        return ExitCode::FAILURE;
    };

    let ctx = LoaderContext::builder().ui_root(ui_root).build();
    let root = match ctx.load_ui(&file_name.to_string_lossy()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::builder().size(800.0, 600.0).build(root);
    app.on_resize_handler("output-resized", |layout| {
        tracing::info!("output area is now {:?}", layout.available_rect());
    });
    print_tree(app.root());

    // Stand in for a window: shrink it, then drag the first column's splitter.
    app.post(WindowEvent::Resized {
        width: 640.0,
        height: 480.0,
    });
    app.pump();

    let splitter_x = app.root().columns()[0].end();
    let y = 200.0;
    let lbutton = ModifierKeys(ModifierKeys::LBUTTON);
    app.post(WindowEvent::MouseDown { x: splitter_x, y, modifiers: lbutton });
    app.post(WindowEvent::MouseMove { x: splitter_x + 60.0, y, modifiers: lbutton });
    app.post(WindowEvent::MouseUp { x: splitter_x + 60.0, y, modifiers: lbutton });
    app.post(WindowEvent::CloseRequested);
    while app.pump() {}

    println!();
    print_tree(app.root());
    ExitCode::SUCCESS
}

fn print_tree(root: &Layout) {
    root.visit_layouts(&mut |layout| {
        println!("layout {:<10} {:?}", layout.name(), layout.inner_rect());
    });
    root.visit_controls(&mut |control| {
        println!(
            "{:<8} {:<10} {:?}",
            control.type_name(),
            control.name(),
            control.viewport()
        );
    });
}
