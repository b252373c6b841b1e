//! Builds layout trees from JSON UI descriptions.
//!
//! A [`LoaderContext`] holds the dispatch tables: which `Type` strings name
//! controls, layouts, named styles and brushes. It is configured once at
//! startup and only read while loading. Each [`LoaderContext::load_ui`] call
//! gets its own [`GlobalJsonData`] session for cross-references (named styles,
//! control names) and import tracking.

use super::*;
use std::path::{Path, PathBuf};

mod brush;
mod control;
mod fields;
mod import;
mod layout;
mod style;

pub use control::{expect_bool, expect_str, ControlKind, KeyHandler, Validator};
pub use import::{FragmentSource, FsFragments, MemoryFragments};

/// Creates an empty layout for a registered layout kind. The argument is the
/// layout's name.
pub type LayoutFactory = Box<dyn Fn(&str) -> Layout>;

/// Builds a named style from its JSON object.
pub type StyleLoader = Box<dyn Fn(&Map<String, Value>, &mut GlobalJsonData<'_>) -> Result<Style>>;

/// Builds a brush from its JSON object.
pub type BrushLoader = Box<dyn Fn(&Map<String, Value>, &mut GlobalJsonData<'_>) -> Result<Brush>>;

pub struct LoaderContext {
    ui_root: PathBuf,
    fragments: Box<dyn FragmentSource>,
    controls: HashMap<String, ControlKind>,
    layouts: HashMap<String, LayoutFactory>,
    styles: HashMap<String, StyleLoader>,
    brushes: HashMap<String, BrushLoader>,
}

pub struct LoaderContextBuilder {
    ui_root: Option<PathBuf>,
    fragments: Option<Box<dyn FragmentSource>>,
    builtin_controls: bool,
}

impl Default for LoaderContextBuilder {
    fn default() -> Self {
        Self {
            ui_root: None,
            fragments: None,
            builtin_controls: true,
        }
    }
}

impl LoaderContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that `load_ui` paths, `import` paths and bitmap paths are
    /// relative to. Defaults to the current directory.
    pub fn ui_root(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.ui_root = Some(path.into());
        self
    }

    /// Replaces the on-disk fragment source, e.g. with [`MemoryFragments`].
    pub fn fragment_source(&mut self, source: impl FragmentSource + 'static) -> &mut Self {
        self.fragments = Some(Box::new(source));
        self
    }

    /// Leaves the control registry empty instead of registering `Label`,
    /// `Button` and `TextBox`.
    pub fn no_builtin_controls(&mut self) -> &mut Self {
        self.builtin_controls = false;
        self
    }

    pub fn build(&mut self) -> LoaderContext {
        let ui_root = self.ui_root.take().unwrap_or_else(|| PathBuf::from("."));
        let fragments = self
            .fragments
            .take()
            .unwrap_or_else(|| Box::new(FsFragments::new(&ui_root)));

        let mut ctx = LoaderContext {
            ui_root,
            fragments,
            controls: HashMap::new(),
            layouts: HashMap::new(),
            styles: HashMap::new(),
            brushes: HashMap::new(),
        };

        ctx.register_brush("SolidColor", brush::solid_color);
        ctx.register_brush("LinearGradient", brush::linear_gradient);
        ctx.register_brush("RadialGradient", brush::radial_gradient);
        ctx.register_brush("Bitmap", brush::bitmap);
        ctx.register_style("TextStyle", style::text_style);

        if self.builtin_controls {
            ctx.register_control(Label::kind());
            ctx.register_control(Button::kind());
            ctx.register_control(TextBox::kind());
        }
        ctx
    }
}

impl LoaderContext {
    pub fn builder() -> LoaderContextBuilder {
        LoaderContextBuilder::default()
    }

    pub fn ui_root(&self) -> &Path {
        &self.ui_root
    }

    pub fn register_control(&mut self, kind: ControlKind) {
        debug!("registering control kind {:?}", kind.type_name());
        self.controls.insert(kind.type_name().to_string(), kind);
    }

    pub fn register_layout<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn(&str) -> Layout + 'static,
    {
        self.layouts.insert(type_name.to_string(), Box::new(factory));
    }

    pub fn register_style<F>(&mut self, type_name: &str, loader: F)
    where
        F: Fn(&Map<String, Value>, &mut GlobalJsonData<'_>) -> Result<Style> + 'static,
    {
        self.styles.insert(type_name.to_string(), Box::new(loader));
    }

    pub fn register_brush<F>(&mut self, type_name: &str, loader: F)
    where
        F: Fn(&Map<String, Value>, &mut GlobalJsonData<'_>) -> Result<Brush> + 'static,
    {
        self.brushes.insert(type_name.to_string(), Box::new(loader));
    }

    pub fn control_kind(&self, type_name: &str) -> Option<&ControlKind> {
        self.controls.get(type_name)
    }

    pub fn is_layout_kind(&self, type_name: &str) -> bool {
        type_name == "Layout" || self.layouts.contains_key(type_name)
    }

    /// Loads the UI description at `path` (relative to the UI root). Errors
    /// are logged here and returned; nothing of a failed load is kept.
    pub fn load_ui(&self, path: &str) -> Result<Layout> {
        debug!("loading UI {path:?}");
        let result = self.fragments.fetch(path).and_then(|(key, text)| {
            let value: Value =
                serde_json::from_str(&text).map_err(|source| Error::Parse {
                    origin: key.clone(),
                    source,
                })?;
            let mut session = GlobalJsonData::new(self);
            session.import_chain.push(key);
            session.load_root(&value)
        });
        if let Err(e) = &result {
            error!("failed to load UI {path:?}: {e}");
        }
        result
    }

    /// Loads a UI description given as JSON text. Imports still resolve
    /// against the configured fragment source.
    pub fn load_ui_str(&self, text: &str) -> Result<Layout> {
        let result = serde_json::from_str::<Value>(text)
            .map_err(|source| Error::Parse {
                origin: "<string>".to_string(),
                source,
            })
            .and_then(|value| GlobalJsonData::new(self).load_root(&value));
        if let Err(e) = &result {
            error!("failed to load UI: {e}");
        }
        result
    }

    /// Loads an already parsed UI description.
    pub fn load_ui_value(&self, value: &Value) -> Result<Layout> {
        let result = GlobalJsonData::new(self).load_root(value);
        if let Err(e) = &result {
            error!("failed to load UI: {e}");
        }
        result
    }
}

/// State shared across one `load_ui` call.
pub struct GlobalJsonData<'a> {
    /// Named styles defined so far, for `"Style": "<name>"` references.
    pub styles: HashMap<String, Rc<Style>>,
    /// Control name to control type, for every control loaded so far.
    pub controls: HashMap<String, String>,
    ctx: &'a LoaderContext,
    /// The file being loaded, if any. Every import chain starts here.
    import_chain: Vec<String>,
}

impl<'a> GlobalJsonData<'a> {
    pub fn new(ctx: &'a LoaderContext) -> Self {
        Self {
            styles: HashMap::new(),
            controls: HashMap::new(),
            ctx,
            import_chain: Vec::new(),
        }
    }

    pub fn context(&self) -> &'a LoaderContext {
        self.ctx
    }

    /// Records a loaded control's name. Duplicates are allowed but make
    /// lookups by name ambiguous.
    fn record_control(&mut self, name: &str, type_name: &str) {
        if let Some(previous) = self.controls.insert(name.to_string(), type_name.to_string()) {
            warn!("control name {name:?} used more than once (was a {previous})");
        }
    }
}
