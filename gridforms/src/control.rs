use super::*;

/// State common to every control. Concrete controls deref to it.
#[derive(Clone, Debug, Default)]
pub struct ControlState {
    pub(crate) name: String,
    pub(crate) id: Option<u32>,
    pub(crate) viewport: Rect,
    pub(crate) style: Option<Rc<Style>>,
    pub(crate) brush: Option<Rc<Brush>>,
}

impl ControlState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    /// The rectangle the renderer should draw this control into, as of the
    /// last layout resolve.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn style(&self) -> Option<&Rc<Style>> {
        self.style.as_ref()
    }

    pub fn set_style(&mut self, style: Option<Rc<Style>>) {
        self.style = style;
    }

    /// Returns this control's private style, creating it on first use.
    /// A shared style is copied so edits stay local to this control.
    pub fn style_mut(&mut self) -> &mut Style {
        Rc::make_mut(self.style.get_or_insert_with(Default::default))
    }

    pub fn brush(&self) -> Option<&Rc<Brush>> {
        self.brush.as_ref()
    }

    pub fn set_brush(&mut self, brush: Option<Rc<Brush>>) {
        self.brush = brush;
    }
}

/// A leaf in the layout tree. The layout engine only positions controls; what
/// they draw and how they react to input is up to each implementation.
pub trait Control: core::ops::DerefMut<Target = ControlState> + 'static {
    /// The `Type` string this control is registered under.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Called by the layout after the viewport changed.
    fn on_resize(&mut self, viewport: Rect) {}

    /// Keyboard input for the focused control. Returns true if handled.
    fn on_input(&mut self, event: &WindowEvent) -> bool {
        false
    }
}

impl dyn Control {
    pub fn downcast_ref<T: Control>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Control>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.on_resize(viewport);
        }
    }
}

impl core::fmt::Debug for dyn Control {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct(self.type_name())
            .field("name", &self.name)
            .field("viewport", &self.viewport)
            .finish()
    }
}
