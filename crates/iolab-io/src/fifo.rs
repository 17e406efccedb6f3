//! Named pipes: `mkfifo(3)` on demand and a non-blocking poll loop.
//!
//! The FIFO is opened `O_RDWR | O_NONBLOCK`. Holding the write side ourselves
//! means `read` reports `EAGAIN` while nobody has written, instead of 0 as soon
//! as the last external writer goes away.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use iolab_core::responses::{FifoOutcome, FifoReport};
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

use crate::buffer;
use crate::error::{Result, errno, syscall};

#[derive(Debug, Clone)]
pub struct FifoOptions {
    pub poll_interval: Duration,
    /// `None` waits forever.
    pub max_wait: Option<Duration>,
    pub capacity: usize,
}

impl Default for FifoOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            max_wait: None,
            capacity: 1024,
        }
    }
}

/// An open FIFO and whether this process created it.
#[derive(Debug)]
pub struct Fifo {
    file: File,
    path: PathBuf,
    created: bool,
}

impl Fifo {
    /// Open `path`, creating it with `mkfifo(path, mode)` if it does not exist.
    ///
    /// # Errors
    ///
    /// `mkfifo` if creation fails, `open` if either open attempt fails for
    /// any reason other than a missing path on the first try.
    pub fn open_or_create(path: &Path, mode: u32) -> Result<Self> {
        match open_nonblocking(path) {
            Ok(file) => Ok(Self {
                file,
                path: path.to_path_buf(),
                created: false,
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                nix::unistd::mkfifo(path, Mode::from_bits_truncate(mode)).map_err(errno("mkfifo"))?;
                tracing::debug!(path = %path.display(), mode = format_args!("{mode:o}"), "created fifo");
                let file = open_nonblocking(path).map_err(syscall("open"))?;
                Ok(Self {
                    file,
                    path: path.to_path_buf(),
                    created: true,
                })
            }
            Err(error) => Err(syscall("open")(error)),
        }
    }

    #[must_use]
    pub const fn created(&self) -> bool {
        self.created
    }

    /// Poll until the first chunk of data arrives, the FIFO reports end of
    /// file, or `max_wait` runs out.
    ///
    /// `on_empty` runs after every `EAGAIN`, before the poll interval sleep.
    ///
    /// # Errors
    ///
    /// Any `read` failure other than `EAGAIN`, or
    /// [`iolab_core::errors::CoreError::Validation`] when `options.capacity`
    /// bytes cannot be allocated.
    pub fn wait_for_message<F>(&mut self, options: &FifoOptions, mut on_empty: F) -> Result<FifoReport>
    where
        F: FnMut(),
    {
        let started = Instant::now();
        let mut buf = buffer::zeroed(options.capacity)?;
        let mut empty_polls = 0u64;

        let outcome = loop {
            match self.file.read(&mut buf) {
                Ok(0) => break FifoOutcome::Closed,
                Ok(n) => {
                    break FifoOutcome::Received {
                        content: String::from_utf8_lossy(&buf[..n]).into_owned(),
                    };
                }
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                    empty_polls += 1;
                    if let Some(max_wait) = options.max_wait
                        && started.elapsed() >= max_wait
                    {
                        break FifoOutcome::TimedOut {
                            waited_ms: u64::try_from(started.elapsed().as_millis())
                                .unwrap_or(u64::MAX),
                        };
                    }
                    on_empty();
                    thread::sleep(options.poll_interval);
                }
                Err(error) => return Err(syscall("read")(error)),
            }
        };

        tracing::debug!(path = %self.path.display(), empty_polls, ?outcome, "fifo wait finished");
        Ok(FifoReport {
            path: self.path.display().to_string(),
            created: self.created,
            empty_polls,
            outcome,
        })
    }
}

fn open_nonblocking(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(OFlag::O_NONBLOCK.bits())
        .open(path)
}
