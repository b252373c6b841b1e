use super::*;

/// Where `load_ui` and `import` paths are read from.
pub trait FragmentSource {
    /// Returns a key identifying the fragment (used to detect import cycles)
    /// and its JSON text.
    fn fetch(&self, path: &str) -> Result<(String, String)>;
}

/// Reads fragments from files under a root directory.
pub struct FsFragments {
    root: PathBuf,
}

impl FsFragments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FragmentSource for FsFragments {
    fn fetch(&self, path: &str) -> Result<(String, String)> {
        let full = self.root.join(path);
        let io_error = |source| Error::Io {
            path: full.clone(),
            source,
        };
        let canonical = std::fs::canonicalize(&full).map_err(io_error)?;
        let text = std::fs::read_to_string(&canonical).map_err(io_error)?;
        trace!("read fragment {}", canonical.display());
        Ok((canonical.display().to_string(), text))
    }
}

/// Fragments held in memory, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFragments {
    files: HashMap<String, String>,
}

impl MemoryFragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, text: impl Into<String>) -> &mut Self {
        self.files.insert(normalize(path).to_string(), text.into());
        self
    }
}

impl FragmentSource for MemoryFragments {
    fn fetch(&self, path: &str) -> Result<(String, String)> {
        let key = normalize(path);
        match self.files.get(key) {
            Some(text) => Ok((key.to_string(), text.clone())),
            None => Err(Error::Io {
                path: PathBuf::from(path),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such fragment"),
            }),
        }
    }
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches("./")
}

impl GlobalJsonData<'_> {
    /// Runs `f` on `node` with every `import` below it merged in. A node with
    /// no imports is passed through as is; nested calls on an already merged
    /// subtree therefore cost nothing.
    pub(crate) fn with_imports<T>(
        &mut self,
        node: &Value,
        f: impl FnOnce(&mut Self, &Map<String, Value>) -> Result<T>,
    ) -> Result<T> {
        let Some(obj) = node.as_object() else {
            return Err(Error::malformed("expected an object", node));
        };
        if !has_imports(node) {
            return f(self, obj);
        }
        let mut chain = self.import_chain.clone();
        let merged = self.merge_imports(obj, &mut chain)?;
        f(self, &merged)
    }

    /// Returns `obj` with its `import` (if any) replaced by the keys of the
    /// imported fragment, recursively. Keys defined on `obj` itself win over
    /// imported ones.
    ///
    /// `chain` lists the fragments the current value was reached through.
    /// Keys taken from a fragment are merged with that fragment on the chain;
    /// local keys are not, so two levels importing the same fragment is fine
    /// while a fragment reaching itself is a cycle.
    fn merge_imports(
        &self,
        obj: &Map<String, Value>,
        chain: &mut Vec<String>,
    ) -> Result<Map<String, Value>> {
        let mut merged = match obj.get("import") {
            None => Map::new(),
            Some(import) => {
                let Some(path) = import.as_str() else {
                    return Err(Error::malformed(
                        "\"import\" must be a path string",
                        &Value::Object(obj.clone()),
                    ));
                };
                let (key, text) = self.ctx.fragments.fetch(path)?;
                if chain.contains(&key) {
                    let mut cycle = chain.clone();
                    cycle.push(key);
                    return Err(Error::ImportCycle { chain: cycle });
                }
                let fragment: Value =
                    serde_json::from_str(&text).map_err(|source| Error::Parse {
                        origin: key.clone(),
                        source,
                    })?;
                let Some(fields) = fragment.as_object() else {
                    return Err(Error::malformed("an imported fragment must be an object", &fragment));
                };
                debug!("importing {key}");
                chain.push(key);
                let merged = self.merge_imports(fields, chain);
                chain.pop();
                merged?
            }
        };

        for (k, v) in obj.iter() {
            if k != "import" {
                merged.insert(k.clone(), self.merge_value(v, chain)?);
            }
        }
        Ok(merged)
    }

    fn merge_value(&self, value: &Value, chain: &mut Vec<String>) -> Result<Value> {
        if !has_imports(value) {
            return Ok(value.clone());
        }
        match value {
            Value::Object(obj) => self.merge_imports(obj, chain).map(Value::Object),
            Value::Array(items) => items
                .iter()
                .map(|item| self.merge_value(item, chain))
                .collect::<Result<_>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }
}

fn has_imports(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.contains_key("import") || obj.values().any(has_imports),
        Value::Array(items) => items.iter().any(has_imports),
        _ => false,
    }
}
