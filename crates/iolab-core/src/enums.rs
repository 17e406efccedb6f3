//! Mode enums shared between the I/O layer and the CLI.
//!
//! All enums use `snake_case` serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReadMode
// ---------------------------------------------------------------------------

/// How a file is opened before the fill-the-buffer read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// Plain `O_RDONLY`.
    Blocking,
    /// `O_RDONLY | O_NONBLOCK`.
    NonBlocking,
}

impl ReadMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::NonBlocking => "non_blocking",
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

/// Durability variant for an append-only write.
///
/// ```text
/// none       write() returns once the kernel has the data
/// fsync      write() + fsync(): data and all metadata on disk
/// fdatasync  write() + fdatasync(): data plus metadata needed to read it back
/// o_sync     open(O_SYNC): every write() is synchronous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    None,
    Fsync,
    Fdatasync,
    OSync,
}

impl Durability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fsync => "fsync",
            Self::Fdatasync => "fdatasync",
            Self::OSync => "o_sync",
        }
    }

    /// Message appended when the caller does not supply one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::None => "Hello, O_APPEND!\n",
            Self::Fsync | Self::Fdatasync => "Hello, with fsync!\n",
            Self::OSync => "Hello, with O_SYNC!\n",
        }
    }

    /// Whether the file must be opened with `O_SYNC`.
    #[must_use]
    pub const fn opens_synchronous(self) -> bool {
        matches!(self, Self::OSync)
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
