//! Error types for faultline operations.
//!
//! Lookup misses are not errors: unknown node and edge ids surface as
//! `Option`/empty returns from the engine, since predictions against
//! evicted entities are routine. The variants here cover configuration
//! and ingestion failures only.

use std::io;
use thiserror::Error;

/// The error type for faultline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Topology document could not be parsed.
    #[error("Topology error: {0}")]
    Topology(String),
}

/// A specialized Result type for faultline operations.
pub type Result<T> = std::result::Result<T, Error>;
