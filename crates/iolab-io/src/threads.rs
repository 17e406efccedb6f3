use std::thread::ScopedJoinHandle;

use crate::error::{IoError, Result};

/// Join a scoped demo thread, turning a panic into an error.
pub(crate) fn join<T>(handle: ScopedJoinHandle<'_, Result<T>>, thread: &str) -> Result<T> {
    handle.join().map_err(|_| IoError::ThreadPanicked {
        thread: thread.to_string(),
    })?
}
