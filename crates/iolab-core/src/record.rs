//! Fixed-layout pirate record.
//!
//! The on-disk form is the in-memory layout of
//!
//! ```text
//! struct pirate {
//!     char          name[100];
//!     unsigned long booty;
//!     unsigned int  beard_len;
//! };
//! ```
//!
//! on an LP64 target: 100 name bytes, 4 bytes of padding so `booty` is 8-byte
//! aligned, 8 bytes of `booty`, 4 bytes of `beard_len`, 4 bytes of tail padding.
//! Integers use native endianness, padding is always zero.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Size of the `name` field, including the terminating NUL.
pub const NAME_LEN: usize = 100;
const BOOTY_OFFSET: usize = 104;
const BEARD_LEN_OFFSET: usize = 112;
/// Size of one encoded record.
pub const RECORD_SIZE: usize = 120;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pirate {
    pub name: String,
    pub booty: u64,
    pub beard_len: u32,
}

impl Pirate {
    /// Edward Teach, the record every demo run writes unless told otherwise.
    #[must_use]
    pub fn blackbeard() -> Self {
        Self {
            name: String::from("Edward Teach"),
            booty: 950,
            beard_len: 48,
        }
    }

    /// Encode into the fixed layout.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name contains a NUL byte or
    /// does not leave room for the terminator.
    pub fn to_bytes(&self) -> Result<[u8; RECORD_SIZE], CoreError> {
        let name = self.name.as_bytes();
        if name.len() >= NAME_LEN {
            return Err(CoreError::Validation(format!(
                "pirate name is {} bytes; at most {} fit",
                name.len(),
                NAME_LEN - 1
            )));
        }
        if name.contains(&0) {
            return Err(CoreError::Validation(String::from(
                "pirate name must not contain NUL bytes",
            )));
        }

        let mut out = [0u8; RECORD_SIZE];
        out[..name.len()].copy_from_slice(name);
        out[BOOTY_OFFSET..BOOTY_OFFSET + 8].copy_from_slice(&self.booty.to_ne_bytes());
        out[BEARD_LEN_OFFSET..BEARD_LEN_OFFSET + 4].copy_from_slice(&self.beard_len.to_ne_bytes());
        Ok(out)
    }

    /// Decode from the fixed layout.
    ///
    /// The name ends at the first NUL (or at the field boundary if there is
    /// none). Padding bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is not valid UTF-8.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Result<Self, CoreError> {
        let field = &bytes[..NAME_LEN];
        let end = field.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        let name = std::str::from_utf8(&field[..end])
            .map_err(|error| CoreError::Validation(format!("pirate name is not UTF-8: {error}")))?
            .to_owned();

        let mut booty = [0u8; 8];
        booty.copy_from_slice(&bytes[BOOTY_OFFSET..BOOTY_OFFSET + 8]);
        let mut beard_len = [0u8; 4];
        beard_len.copy_from_slice(&bytes[BEARD_LEN_OFFSET..BEARD_LEN_OFFSET + 4]);

        Ok(Self {
            name,
            booty: u64::from_ne_bytes(booty),
            beard_len: u32::from_ne_bytes(beard_len),
        })
    }
}
