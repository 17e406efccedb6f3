//! # iolab-io
//!
//! The POSIX I/O mechanisms behind every iolab command, one module each:
//! - `creat`-style file creation
//! - Blocking and non-blocking reads, `select` with a timeout
//! - Named pipes polled without blocking
//! - `O_APPEND` writes with `fsync`, `fdatasync` or `O_SYNC`
//! - Fixed-layout record persistence and byte-wise EOF detection
//! - Stream locking across threads
//! - `writev`/`readv`, `mmap` and `sendfile`
//!
//! Every operation returns a report from `iolab_core::responses`. Failed
//! system calls surface as [`IoError::Syscall`] labelled with the call name.

pub mod append;
mod buffer;
pub mod create;
pub mod eof;
mod error;
pub mod fifo;
pub mod read;
pub mod record;
pub mod select;
pub mod stream_lock;
mod threads;
pub mod vectored;
pub mod zerocopy;

pub use error::{IoError, Result};
