//! Sizes and timing for the zero-copy demo.

use serde::{Deserialize, Serialize};

const fn default_file_size() -> usize {
    4 * 1024
}

const fn default_writer_stagger_ms() -> u64 {
    100
}

const fn default_preview_len() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZeroCopyConfig {
    /// Length the mapped file is extended to before writing.
    #[serde(default = "default_file_size")]
    pub file_size: usize,

    /// Delay between spawning the two writer threads.
    #[serde(default = "default_writer_stagger_ms")]
    pub writer_stagger_ms: u64,

    /// Bytes each reader thread shows from its mapping.
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
}

impl Default for ZeroCopyConfig {
    fn default() -> Self {
        Self {
            file_size: default_file_size(),
            writer_stagger_ms: default_writer_stagger_ms(),
            preview_len: default_preview_len(),
        }
    }
}
