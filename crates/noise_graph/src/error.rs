//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! graph wiring mistakes (unset, out-of-range or self-referencing source slots), invalid module
//! parameters, builder configuration and cancellation.
use thiserror::Error;

use crate::graph::ModuleId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("module {module} has no source in slot {slot}")]
    NoModule { module: ModuleId, slot: usize },

    #[error("slot {slot} is out of range for module {module} (arity {arity})")]
    SlotOutOfRange {
        module: ModuleId,
        slot: usize,
        arity: usize,
    },

    #[error("module {module} cannot be its own source")]
    SelfReference { module: ModuleId },

    #[error("unknown module {module}")]
    UnknownModule { module: ModuleId },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cycle detected through module {module}")]
    Cycle { module: ModuleId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("build cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
