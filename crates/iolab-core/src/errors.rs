//! Cross-cutting error types for iolab.
//!
//! Syscall failures live in `iolab-io` (`IoError`); configuration failures in
//! `iolab-config`. Everything converges into `anyhow` in the CLI.

use thiserror::Error;

/// Errors that can be raised by any iolab crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (layout, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
