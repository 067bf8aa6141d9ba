use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::ElementId;

/// Result type for focus engine operations.
pub type Result<T> = StdResult<T, Error>;

/// Focus engine error type.
///
/// Every variant is locally recoverable. Navigation reports these as values
/// and callers are expected to log them rather than abort.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The registry was empty when a focus decision was needed.
    #[error("no focusable elements")]
    NoFocusableElements,

    /// A focus reference pointed at an element that is no longer present or
    /// visible.
    #[error("stale focus reference: {0:?}")]
    StaleFocus(ElementId),

    /// The platform refused a focus request. Visual focus state is retained.
    #[error("platform focus rejected: {0}")]
    FocusRejected(String),

    /// Configuration failed to parse or validate.
    #[error("config: {0}")]
    Config(String),

    /// I/O failure while loading configuration.
    #[error("io: {0}")]
    Io(String),

    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}
