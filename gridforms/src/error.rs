use serde_json::Value;
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A JSON node has the wrong shape, type or range. `fragment` holds the
    /// pretty-printed node; `location` is the loader code that rejected it.
    #[error("{message} (at {location})\n{fragment}")]
    Malformed {
        message: String,
        fragment: String,
        location: &'static Location<'static>,
    },

    /// A control's key dispatch reported failure.
    #[error("control {name:?} of type {type_name:?} failed to load (at {location})\n{fragment}")]
    ControlLoad {
        name: String,
        type_name: String,
        fragment: String,
        location: &'static Location<'static>,
    },

    #[error("import cycle: {}", chain.join(" -> "))]
    ImportCycle { chain: Vec<String> },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cell ({row}, {column}) is outside a {rows}x{columns} grid")]
    OutOfGrid {
        row: u32,
        column: u32,
        rows: usize,
        columns: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

impl Error {
    #[track_caller]
    pub(crate) fn malformed(message: impl Into<String>, fragment: &Value) -> Self {
        Self::Malformed {
            message: message.into(),
            fragment: pretty(fragment),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn control_load(name: &str, type_name: &str, fragment: &Value) -> Self {
        Self::ControlLoad {
            name: name.to_string(),
            type_name: type_name.to_string(),
            fragment: pretty(fragment),
            location: Location::caller(),
        }
    }

    /// True for errors raised while validating JSON content, as opposed to
    /// I/O or cycle errors.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::ControlLoad { .. })
    }
}
