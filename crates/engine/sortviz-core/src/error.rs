//! Error type for the few fallible edges of the core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown sorting algorithm '{0}' (expected one of bubble, selection, insertion, merge, quick, heap)")]
    UnknownAlgorithm(String),
    #[error("config json parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
