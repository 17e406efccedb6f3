//! Caller-sized read buffers.

use iolab_core::errors::CoreError;

use crate::error::Result;

/// A zero-filled buffer of exactly `capacity` bytes.
///
/// # Errors
///
/// [`CoreError::Validation`] when the allocation cannot be made, instead of
/// the allocator aborting the process.
pub(crate) fn zeroed(capacity: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity).map_err(|error| {
        CoreError::Validation(format!("cannot allocate a {capacity}-byte buffer: {error}"))
    })?;
    buf.resize(capacity, 0);
    Ok(buf)
}
