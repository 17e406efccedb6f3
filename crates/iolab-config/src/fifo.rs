//! FIFO polling configuration.

use serde::{Deserialize, Serialize};

const fn default_mode() -> u32 {
    0o666
}

const fn default_poll_interval_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FifoConfig {
    /// Permission bits passed to `mkfifo` when the FIFO does not exist yet.
    #[serde(default = "default_mode")]
    pub mode: u32,

    /// Sleep between `EAGAIN` results.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up after this long. `0` waits forever.
    #[serde(default)]
    pub max_wait_ms: u64,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            poll_interval_ms: default_poll_interval_ms(),
            max_wait_ms: 0,
        }
    }
}

impl FifoConfig {
    /// `None` when the wait is unbounded.
    #[must_use]
    pub const fn max_wait_ms(&self) -> Option<u64> {
        if self.max_wait_ms == 0 {
            None
        } else {
            Some(self.max_wait_ms)
        }
    }
}
