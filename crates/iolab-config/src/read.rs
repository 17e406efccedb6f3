//! Buffer sizes and timeouts for the read and select demos.

use serde::{Deserialize, Serialize};

/// Largest read buffer a config file, env var or flag may ask for (64 MiB).
pub const MAX_CAPACITY: usize = 64 * 1024 * 1024;

const fn default_capacity() -> usize {
    1024
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadConfig {
    /// Size of the single buffer the read loop fills.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectConfig {
    /// How long `select` waits for stdin before giving up.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum bytes read once the descriptor is ready.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            capacity: default_capacity(),
        }
    }
}
