#![allow(unsafe_code)]

//! RAII wrapper around a file-backed `mmap(2)` region.

use std::ffi::c_void;
use std::num::NonZeroUsize;
use std::os::fd::AsFd;
use std::ptr::NonNull;

use nix::sys::mman::{MapFlags, MsFlags, ProtFlags, mmap, msync, munmap};

use crate::error::{Result, errno};

/// A mapped view of a file, unmapped on drop.
///
/// The file must not be truncated below `len` while the mapping is alive;
/// touching pages past the new end raises `SIGBUS`. All callers in this crate
/// own the file for the mapping's lifetime.
pub struct Mapping {
    ptr: NonNull<c_void>,
    len: NonZeroUsize,
    writable: bool,
}

impl Mapping {
    /// `PROT_READ`, `MAP_PRIVATE`: a read-only view with no copy into user space.
    ///
    /// # Errors
    ///
    /// `mmap` failures.
    pub fn read_only<F: AsFd>(fd: F, len: NonZeroUsize) -> Result<Self> {
        // SAFETY: fresh mapping chosen by the kernel (addr = None); the
        // returned region is only accessed through this wrapper, within `len`.
        let ptr = unsafe { mmap(None, len, ProtFlags::PROT_READ, MapFlags::MAP_PRIVATE, fd, 0) }
            .map_err(errno("mmap"))?;
        Ok(Self {
            ptr,
            len,
            writable: false,
        })
    }

    /// `PROT_READ | PROT_WRITE`, `MAP_SHARED`: stores land in the page cache
    /// and reach the file without a `write` call.
    ///
    /// # Errors
    ///
    /// `mmap` failures.
    pub fn read_write<F: AsFd>(fd: F, len: NonZeroUsize) -> Result<Self> {
        // SAFETY: as in `read_only`.
        let ptr = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                fd,
                0,
            )
        }
        .map_err(errno("mmap"))?;
        Ok(Self {
            ptr,
            len,
            writable: true,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len.get()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the region is mapped readable for `len` bytes until drop.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<u8>(), self.len.get()) }
    }

    /// `None` for read-only mappings.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        if !self.writable {
            return None;
        }
        // SAFETY: the region is mapped writable for `len` bytes until drop and
        // `&mut self` guarantees exclusive access.
        Some(unsafe {
            std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<u8>(), self.len.get())
        })
    }

    /// `msync(MS_SYNC)`: block until dirty pages are written back.
    ///
    /// # Errors
    ///
    /// `msync` failures.
    pub fn sync(&self) -> Result<()> {
        // SAFETY: `ptr`/`len` describe exactly the region returned by `mmap`.
        unsafe { msync(self.ptr, self.len.get(), MsFlags::MS_SYNC) }.map_err(errno("msync"))
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // SAFETY: the region came from `mmap` with this length and no slices
        // borrowed from it can outlive `self`.
        if let Err(error) = unsafe { munmap(self.ptr, self.len.get()) } {
            tracing::warn!(%error, "munmap failed");
        }
    }
}
