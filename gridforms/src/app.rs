//! Drives a layout tree from window events.
//!
//! The windowing layer posts [`WindowEvent`]s and calls [`App::pump`] once per
//! turn of its own loop. `pump` never blocks: it drains what is queued, then
//! re-resolves the tree if the window size changed.

use super::*;
use std::collections::VecDeque;

/// Called with a layout whose `OnResize` names this handler, after that
/// layout's rectangle changed.
pub type ResizeHandler = Box<dyn FnMut(&Layout)>;

struct DragState {
    /// Child-index path from the root to the layout that owns the boundary.
    path: Vec<usize>,
    boundary: Boundary,
    /// Pointer coordinate along the drag axis when the drag began.
    origin: f32,
    /// Size of the line ending at the boundary when the drag began.
    origin_size: f32,
}

pub struct App {
    root: Layout,
    size: Size,
    events: VecDeque<WindowEvent>,
    drag: Option<DragState>,
    focus: Option<Vec<usize>>,
    resize_handlers: HashMap<String, ResizeHandler>,
    boundary_tolerance: f32,
    needs_layout: bool,
    running: bool,
}

pub struct AppBuilder {
    size: Size,
    boundary_tolerance: f32,
}

impl AppBuilder {
    /// Initial client size. Defaults to 800 x 600.
    pub fn size(&mut self, width: f32, height: f32) -> &mut Self {
        self.size = Size { width, height };
        self
    }

    /// How close, in pixels, the pointer must be to an adjustable boundary to
    /// start a drag. Defaults to 3.
    pub fn boundary_tolerance(&mut self, tolerance: f32) -> &mut Self {
        self.boundary_tolerance = tolerance;
        self
    }

    /// Takes ownership of `root` and resolves it at the initial size.
    pub fn build(&self, root: Layout) -> App {
        let mut app = App {
            root,
            size: self.size,
            events: VecDeque::new(),
            drag: None,
            focus: None,
            resize_handlers: HashMap::new(),
            boundary_tolerance: self.boundary_tolerance,
            needs_layout: true,
            running: true,
        };
        app.update();
        app
    }
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder {
            size: Size {
                width: 800.0,
                height: 600.0,
            },
            boundary_tolerance: 3.0,
        }
    }

    pub fn root(&self) -> &Layout {
        &self.root
    }

    /// Direct access to the tree. Call [`App::invalidate`] after changing
    /// sizing so the next `pump` re-resolves.
    pub fn root_mut(&mut self) -> &mut Layout {
        &mut self.root
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn invalidate(&mut self) {
        self.needs_layout = true;
    }

    pub fn on_resize_handler<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&Layout) + 'static,
    {
        self.resize_handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn post(&mut self, event: WindowEvent) {
        self.events.push_back(event);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn focused_control(&self) -> Option<&dyn Control> {
        let path = self.focus.as_deref()?;
        let (last, parent) = path.split_last()?;
        self.root.layout_at_path(parent)?.children().get(*last)?.item.as_control()
    }

    /// Handles every queued event, then re-resolves if needed. Returns false
    /// once the window was asked to close.
    pub fn pump(&mut self) -> bool {
        while let Some(event) = self.events.pop_front() {
            self.dispatch(event);
        }
        self.update();
        self.running
    }

    fn dispatch(&mut self, event: WindowEvent) {
        trace!("dispatch {:?}", event);
        match event {
            WindowEvent::Resized { width, height } => {
                // Only the last size matters; the tree is resolved in update().
                self.size = Size { width, height };
                self.needs_layout = true;
            }
            WindowEvent::CloseRequested => {
                debug!("close requested");
                self.running = false;
            }
            WindowEvent::MouseDown { x, y, .. } => self.mouse_down(Point::new(x, y)),
            WindowEvent::MouseMove { x, y, .. } => self.mouse_drag(Point::new(x, y)),
            WindowEvent::MouseUp { x, y, .. } => {
                self.mouse_drag(Point::new(x, y));
                if self.drag.take().is_some() {
                    debug!("drag ended");
                }
            }
            WindowEvent::KeyDown { .. } | WindowEvent::KeyUp { .. } | WindowEvent::Char(_) => {
                let Some(path) = self.focus.as_deref() else {
                    return;
                };
                if let Some(control) = self.root.control_at_path_mut(path) {
                    if !control.on_input(&event) {
                        trace!("{} ignored {:?}", control.name(), event);
                    }
                }
            }
        }
    }

    fn mouse_down(&mut self, pt: Point) {
        if let Some((path, boundary)) = self.root.boundary_at(pt, self.boundary_tolerance) {
            let Some(layout) = self.root.layout_at_path(&path) else {
                return;
            };
            let Some(origin_size) = layout.line_size(boundary) else {
                return;
            };
            debug!("drag started on {:?} of {}", boundary, layout.name());
            self.drag = Some(DragState {
                path,
                boundary,
                origin: along(boundary.axis, pt),
                origin_size,
            });
            return;
        }

        self.focus = self.root.control_path_at(pt);
        if let Some(control) = self.focused_control() {
            debug!("focus: {}", control.name());
        }
    }

    fn mouse_drag(&mut self, pt: Point) {
        let Some(drag) = &self.drag else {
            return;
        };
        let size = drag.origin_size + along(drag.boundary.axis, pt) - drag.origin;

        let before = layout_rects(&self.root);
        if let Some(layout) = self.root.layout_at_path_mut(&drag.path) {
            layout.set_line_size(drag.boundary, size);
        }
        self.run_resize_handlers(&before);
    }

    fn update(&mut self) {
        if !self.needs_layout {
            return;
        }
        self.needs_layout = false;
        let before = layout_rects(&self.root);
        self.root
            .resolve(Rect::from_size(self.size.width, self.size.height));
        self.run_resize_handlers(&before);
    }

    /// Calls the `OnResize` handler of every layout whose rectangle differs
    /// from `before`, which must come from the same tree.
    fn run_resize_handlers(&mut self, before: &[Rect]) {
        let handlers = &mut self.resize_handlers;
        let mut index = 0;
        self.root.visit_layouts(&mut |layout| {
            let changed = before.get(index) != Some(&layout.available_rect());
            index += 1;
            let Some(name) = layout.on_resize.as_deref() else {
                return;
            };
            if !changed {
                return;
            }
            match handlers.get_mut(name) {
                Some(handler) => handler(layout),
                None => warn!("{}: no resize handler named {name:?}", layout.name()),
            }
        });
    }
}

fn along(axis: Axis, pt: Point) -> f32 {
    match axis {
        Axis::Rows => pt.y,
        Axis::Columns => pt.x,
    }
}

fn layout_rects(root: &Layout) -> Vec<Rect> {
    let mut rects = Vec::new();
    root.visit_layouts(&mut |layout| rects.push(layout.available_rect()));
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const LBUTTON: ModifierKeys = ModifierKeys(ModifierKeys::LBUTTON);

    fn split_app() -> App {
        let mut root = Layout::new("root");
        root.add_row(with(Row::new(SizingValue::star(1.0)), |r| {
            r.bottom_adjustable = true;
        }));
        root.add_row(Row::new(SizingValue::star(1.0)));
        root.add_column(Column::new(SizingValue::star(1.0)));
        root.add_control(RowColumnPosition::cell(0, 0), Box::new(TextBox::new("top")))
            .unwrap();
        let bottom = root
            .add_sub_layout(RowColumnPosition::cell(1, 0), Layout::single_cell("bottom"))
            .unwrap();
        bottom.on_resize = Some("bottom-resized".to_string());
        App::builder().size(100.0, 200.0).build(root)
    }

    #[test]
    fn resizes_are_coalesced() {
        let mut app = split_app();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        app.on_resize_handler("bottom-resized", move |layout| {
            seen.borrow_mut().push(layout.available_rect());
        });

        app.post(WindowEvent::Resized { width: 300.0, height: 400.0 });
        app.post(WindowEvent::Resized { width: 120.0, height: 100.0 });
        assert!(app.pump());
        assert_eq!(*calls.borrow(), [Rect::new(0.0, 50.0, 120.0, 100.0)]);

        // Same size again: nothing moved, so no handler call.
        app.post(WindowEvent::Resized { width: 120.0, height: 100.0 });
        app.pump();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn drag_moves_the_boundary() {
        let mut app = split_app();
        let m = LBUTTON;
        app.post(WindowEvent::MouseDown { x: 50.0, y: 101.0, modifiers: m });
        app.post(WindowEvent::MouseMove { x: 50.0, y: 131.0, modifiers: m });
        app.pump();
        assert!(app.is_dragging());
        assert_eq!(app.root().rows()[0].size(), 130.0);

        app.post(WindowEvent::MouseUp { x: 50.0, y: 141.0, modifiers: m });
        app.pump();
        assert!(!app.is_dragging());
        assert_eq!(app.root().rows()[0].sizing, SizingValue::fixed(140.0));
        assert_eq!(
            app.root().find_layout("bottom").unwrap().available_rect(),
            Rect::new(0.0, 140.0, 100.0, 200.0)
        );
    }

    #[test]
    fn drag_a_column_by_its_left_edge() {
        let mut root = Layout::new("root");
        root.add_row(Row::new(SizingValue::star(1.0)));
        root.add_column(Column::new(SizingValue::fixed(40.0)));
        root.add_column(with(Column::new(SizingValue::star(1.0)), |c| {
            c.left_adjustable = true;
        }));
        let mut app = App::builder().size(200.0, 100.0).build(root);

        let m = LBUTTON;
        app.post(WindowEvent::MouseDown { x: 41.0, y: 50.0, modifiers: m });
        app.post(WindowEvent::MouseMove { x: 56.0, y: 50.0, modifiers: m });
        app.post(WindowEvent::MouseUp { x: 61.0, y: 50.0, modifiers: m });
        app.pump();

        let columns = app.root().columns();
        assert_eq!(columns[0].sizing, SizingValue::fixed(60.0));
        assert_eq!(columns[1].offset(), 60.0);
        assert_eq!(columns[1].size(), 140.0);
    }

    #[test]
    fn keyboard_goes_to_the_focused_control() {
        let mut app = split_app();
        app.post(WindowEvent::Char('x'));
        app.post(WindowEvent::MouseDown { x: 10.0, y: 10.0, modifiers: ModifierKeys::default() });
        app.post(WindowEvent::Char('a'));
        app.post(WindowEvent::Char('b'));
        app.pump();

        assert_eq!(app.focused_control().unwrap().name(), "top");
        let text_box = app.root().find_control("top").unwrap().downcast_ref::<TextBox>().unwrap();
        assert_eq!(text_box.text(), "ab");
    }

    #[test]
    fn close_stops_the_app() {
        let mut app = split_app();
        assert!(app.pump());
        app.post(WindowEvent::CloseRequested);
        assert!(!app.pump());
        assert!(!app.is_running());
    }
}
