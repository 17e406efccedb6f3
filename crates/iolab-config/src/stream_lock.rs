//! Timing for the stream-lock thread demo.

use serde::{Deserialize, Serialize};

const fn default_messages() -> u32 {
    5
}

const fn default_write_delay_ms() -> u64 {
    100
}

const fn default_read_delay_ms() -> u64 {
    50
}

const fn default_startup_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamLockConfig {
    /// Lines each writer emits while holding the stream.
    #[serde(default = "default_messages")]
    pub messages: u32,

    /// Pause after each written line.
    #[serde(default = "default_write_delay_ms")]
    pub write_delay_ms: u64,

    /// Pause after each line the reader reports.
    #[serde(default = "default_read_delay_ms")]
    pub read_delay_ms: u64,

    /// Head start given to the first two writers before the reader spawns.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
}

impl Default for StreamLockConfig {
    fn default() -> Self {
        Self {
            messages: default_messages(),
            write_delay_ms: default_write_delay_ms(),
            read_delay_ms: default_read_delay_ms(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }
}
