//! Framework error type.
//!
//! One enum is shared by every `tr-*` crate.  Element ticks report their own
//! failures through [`TickError::Element`]; the registry never swallows them.

use thiserror::Error;

use crate::CategoryId;

/// The top-level error type for all `tr-*` crates.
#[derive(Debug, Error)]
pub enum TickError {
    /// An element's tick failed.  The pass that was running stops here and
    /// the error propagates to whoever drove the pass.
    #[error("element tick failed: {0}")]
    Element(String),

    /// `iterate()` was called from inside a tick of the same registry.
    #[error("registry pass started while another pass is running")]
    ReentrantPass,

    #[error("category {0} not found")]
    UnknownCategory(CategoryId),

    #[error("category `{0}` registered twice")]
    DuplicateCategory(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TickError {
    /// Shorthand for element implementations: `Err(TickError::element(e))?`.
    pub fn element(reason: impl std::fmt::Display) -> Self {
        TickError::Element(reason.to_string())
    }
}

/// Shorthand result type for all `tr-*` crates.
pub type TickResult<T> = Result<T, TickError>;
