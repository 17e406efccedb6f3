//! Wait for a descriptor to become readable with `select(2)`.

use std::io::Read;
use std::os::fd::{AsFd, AsRawFd};
use std::time::Duration;

use iolab_core::responses::Readiness;
use nix::libc::{suseconds_t, time_t};
use nix::sys::select::{FdSet, select};
use nix::sys::time::TimeVal;

use crate::buffer;
use crate::error::{Result, errno, syscall};

/// Default time `select` waits before reporting a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Block until `source` is readable or `timeout` elapses, then read once.
///
/// At most `capacity` bytes are consumed. A ready descriptor at end of file
/// yields `Ready` with zero bytes. Timeouts beyond what a `timeval` holds wait
/// for the largest one it does.
///
/// # Errors
///
/// `select` or `read` failures, labelled accordingly, and
/// [`iolab_core::errors::CoreError::Validation`] when the read buffer cannot
/// be allocated.
pub fn wait_readable<S>(source: &mut S, timeout: Duration, capacity: usize) -> Result<Readiness>
where
    S: Read + AsFd,
{
    let readable = {
        let fd = source.as_fd();
        let mut readfds = FdSet::new();
        readfds.insert(fd);
        let mut tv = timeval(timeout);

        let ready = select(
            Some(fd.as_raw_fd() + 1),
            &mut readfds,
            None::<&mut FdSet>,
            None::<&mut FdSet>,
            &mut tv,
        )
        .map_err(errno("select"))?;
        tracing::debug!(ready, fd = fd.as_raw_fd(), "select returned");

        if ready == 0 {
            return Ok(Readiness::TimedOut {
                timeout_secs: timeout.as_secs(),
            });
        }
        readfds.contains(fd)
    };

    if !readable {
        return Ok(Readiness::NotReady);
    }

    let mut buf = buffer::zeroed(capacity)?;
    let n = source.read(&mut buf).map_err(syscall("read"))?;
    buf.truncate(n);
    Ok(Readiness::Ready {
        bytes_read: n,
        content: String::from_utf8_lossy(&buf).into_owned(),
    })
}

fn timeval(timeout: Duration) -> TimeVal {
    let secs = time_t::try_from(timeout.as_secs()).unwrap_or(time_t::MAX);
    let micros = suseconds_t::try_from(timeout.subsec_micros()).unwrap_or_default();
    TimeVal::new(secs, micros)
}
