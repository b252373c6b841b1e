//! Per-kind key dispatch for controls.
//!
//! A [`ControlKind`] maps each JSON key a control accepts to a handler. The
//! handlers report failure by logging and returning `false`; the layout
//! loader turns a failed control into a fatal [`Error::ControlLoad`].

use super::*;

/// Applies one JSON key to a freshly created control.
pub type KeyHandler =
    Box<dyn Fn(&mut dyn Control, &Value, &Layout, &mut GlobalJsonData<'_>) -> bool>;

/// Checks a control's JSON object before the control is created.
pub type Validator = Box<dyn Fn(&Map<String, Value>) -> bool>;

/// Keys consumed by the layout loader, never passed to a handler.
const SKIPPED_KEYS: &[&str] = &["Type", "Row", "Column", "RowSpan", "ColumnSpan", "import"];

pub struct ControlKind {
    type_name: String,
    factory: Box<dyn Fn(&str) -> Box<dyn Control>>,
    validators: Vec<Validator>,
    handlers: HashMap<String, KeyHandler>,
}

impl ControlKind {
    /// A kind whose controls are created by `factory`. Every kind accepts
    /// `id`.
    pub fn new<T, F>(type_name: &str, factory: F) -> Self
    where
        T: Control,
        F: Fn(&str) -> T + 'static,
    {
        let mut kind = Self {
            type_name: type_name.to_string(),
            factory: Box::new(move |name| Box::new(factory(name)) as Box<dyn Control>),
            validators: Vec::new(),
            handlers: HashMap::new(),
        };
        kind.on_any_key("id", |control, value, _, _| match value.as_u64() {
            Some(id) if id <= u32::MAX as u64 => {
                control.set_id(Some(id as u32));
                true
            }
            _ => {
                error!("id must be a non-negative integer, found {value}");
                false
            }
        });
        kind
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Adds a check run on the whole object before the control is created.
    pub fn validate<F>(&mut self, validator: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>) -> bool + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Registers a handler that receives the concrete control type.
    pub fn on_key<T, F>(&mut self, key: &str, handler: F) -> &mut Self
    where
        T: Control,
        F: Fn(&mut T, &Value, &Layout, &mut GlobalJsonData<'_>) -> bool + 'static,
    {
        let type_name = self.type_name.clone();
        self.on_any_key(key, move |control, value, parent, global| {
            match control.downcast_mut::<T>() {
                Some(control) => handler(control, value, parent, global),
                None => {
                    error!("{type_name}: handler registered for a different control type");
                    false
                }
            }
        })
    }

    pub fn on_any_key<F>(&mut self, key: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut dyn Control, &Value, &Layout, &mut GlobalJsonData<'_>) -> bool + 'static,
    {
        self.handlers.insert(key.to_string(), Box::new(handler));
        self
    }

    pub fn accepts_key(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Accepts `Style` (a named style) and the inline style attributes. The
    /// first inline attribute gives the control its own style; the rest
    /// update that same style. Mixing the two is rejected up front.
    pub fn with_style_attributes(&mut self) -> &mut Self {
        self.validate(|obj| {
            let inline = obj.keys().find(|key| style_attribute(key).is_some());
            match (obj.contains_key("Style"), inline) {
                (true, Some(key)) => {
                    error!("\"Style\" cannot be combined with inline style attribute {key:?}");
                    false
                }
                _ => true,
            }
        });

        self.on_any_key("Style", |control, value, _, global| {
            let Some(name) = expect_str(value, "Style") else {
                return false;
            };
            match global.styles.get(name) {
                Some(style) => {
                    control.set_style(Some(Rc::clone(style)));
                    true
                }
                None => {
                    error!("unknown style {name:?}");
                    false
                }
            }
        });

        for &(key, attribute) in STYLE_ATTRIBUTES {
            self.on_any_key(key, move |control, value, _, _| {
                match attribute(control.style_mut(), value) {
                    Ok(()) => true,
                    Err(msg) => {
                        error!("{key}: {msg}");
                        false
                    }
                }
            });
        }
        self
    }

    /// Accepts `Brush`, as a brush object or a color string.
    pub fn with_brush(&mut self) -> &mut Self {
        self.on_any_key("Brush", |control, value, _, global| {
            match global.load_brush(value) {
                Ok(brush) => {
                    control.set_brush(Some(brush));
                    true
                }
                Err(e) => {
                    error!("Brush: {e}");
                    false
                }
            }
        })
    }

    /// Creates a control named `name` and feeds it every key of `obj`.
    /// Returns `None` if validation, an unknown key or a handler fails.
    pub(crate) fn load(
        &self,
        name: &str,
        obj: &Map<String, Value>,
        parent: &Layout,
        global: &mut GlobalJsonData<'_>,
    ) -> Option<Box<dyn Control>> {
        if !self.validators.iter().all(|validate| validate(obj)) {
            error!("{name}: {} failed validation", self.type_name);
            return None;
        }

        let mut control = (self.factory)(name);
        control.name = name.to_string();

        for (key, value) in obj.iter() {
            if SKIPPED_KEYS.contains(&key.as_str()) {
                continue;
            }
            let Some(handler) = self.handlers.get(key) else {
                error!("{name}: {} does not accept key {key:?}", self.type_name);
                return None;
            };
            if !handler(&mut *control, value, parent, global) {
                error!("{name}: bad value for {key:?}");
                return None;
            }
        }
        trace!("loaded {} {name:?}", self.type_name);
        Some(control)
    }
}

impl core::fmt::Debug for ControlKind {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        fmt.debug_struct("ControlKind")
            .field("type_name", &self.type_name)
            .field("keys", &keys)
            .finish()
    }
}

/// Reads a string for a key handler, logging if it is something else.
pub fn expect_str<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    let s = value.as_str();
    if s.is_none() {
        error!("{key} must be a string, found {value}");
    }
    s
}

pub fn expect_bool(value: &Value, key: &str) -> Option<bool> {
    let b = value.as_bool();
    if b.is_none() {
        error!("{key} must be true or false, found {value}");
    }
    b
}
