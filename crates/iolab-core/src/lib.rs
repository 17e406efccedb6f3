//! # iolab-core
//!
//! Core types and error types shared by the iolab crates.
//!
//! - The pirate record and its fixed binary layout
//! - Mode enums (read mode, durability variant)
//! - Report types returned by every demo, with a human `Display` rendering
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod record;
pub mod responses;
