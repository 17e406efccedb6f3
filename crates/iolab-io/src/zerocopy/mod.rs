//! Zero-copy I/O: `mmap(2)` views and in-kernel `sendfile(2)` transfers,
//! next to a traditional `read(2)` for comparison.

mod mapping;

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::num::NonZeroUsize;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use iolab_core::errors::CoreError;
use iolab_core::responses::{
    IoComparison, MmapPreview, MmapWrite, SendfileReport, ZeroCopyReport,
};
use nix::libc::off_t;
use nix::sys::sendfile::sendfile;

pub use mapping::Mapping;

use crate::error::{Result, errno, syscall};
use crate::threads;

pub const DEFAULT_FILE_SIZE: usize = 4 * 1024;
pub const DEFAULT_PREVIEW_LEN: usize = 64;
/// User buffer size for the traditional `read` in [`compare_io`].
pub const TRADITIONAL_BUFFER: usize = 4096;

/// Thread ids used in both the writer and the reader phase.
const THREAD_IDS: [u32; 2] = [1, 2];

fn file_len(file: &File) -> Result<u64> {
    Ok(file.metadata().map_err(syscall("fstat"))?.len())
}

fn mapping_len(len: u64, path: &Path) -> Result<NonZeroUsize> {
    usize::try_from(len)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "cannot map {} ({len} bytes)",
                path.display()
            ))
            .into()
        })
}

/// Create `path` at exactly `size` bytes and fill it through a shared writable
/// mapping, then `msync` it.
///
/// The text is truncated to `size - 1` bytes and NUL-terminated, like
/// `snprintf` into the mapping.
///
/// # Errors
///
/// `open`, `ftruncate`, `mmap` or `msync`; a validation error when `size` is 0.
pub fn mmap_write(path: &Path, thread_id: u32, size: usize) -> Result<MmapWrite> {
    let len = NonZeroUsize::new(size)
        .ok_or_else(|| CoreError::Validation(String::from("mapping size must be non-zero")))?;
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
        .map_err(syscall("open"))?;
    file.set_len(size as u64).map_err(syscall("ftruncate"))?;

    let mut mapping = Mapping::read_write(&file, len)?;
    tracing::debug!(thread_id, len = mapping.len(), "write mapping ready");

    let text = format!(
        "[Thread {thread_id}] zero-copy write\n\
         this data skips the user-space buffer\n\
         and lands directly in the page cache.\n\
         timestamp: {}\n",
        chrono::Utc::now().timestamp()
    );
    let text_len = text.len().min(size - 1);
    if let Some(region) = mapping.as_mut_slice() {
        region[..text_len].copy_from_slice(&text.as_bytes()[..text_len]);
        region[text_len] = 0;
    }
    mapping.sync()?;

    Ok(MmapWrite {
        thread_id,
        mapped_len: size,
        text_len,
    })
}

/// Map `path` read-only and return up to `preview_len` leading bytes, cut at
/// the first NUL.
///
/// # Errors
///
/// `open`, `fstat` or `mmap`; a validation error for an empty file.
pub fn mmap_read(path: &Path, thread_id: u32, preview_len: usize) -> Result<MmapPreview> {
    let file = File::open(path).map_err(syscall("open"))?;
    let len = mapping_len(file_len(&file)?, path)?;

    let mapping = Mapping::read_only(&file, len)?;
    tracing::debug!(thread_id, len = mapping.len(), "read mapping ready");

    let head = &mapping.as_slice()[..preview_len.min(mapping.len())];
    let end = head.iter().position(|&b| b == 0).unwrap_or(head.len());

    Ok(MmapPreview {
        thread_id,
        mapped_len: mapping.len(),
        preview: String::from_utf8_lossy(&head[..end]).into_owned(),
    })
}

/// Copy all of `source` into `destination` (created or truncated) without
/// passing through user space.
///
/// # Errors
///
/// `open`, `fstat` or `sendfile`.
pub fn sendfile_copy(source: &Path, destination: &Path) -> Result<SendfileReport> {
    let input = File::open(source).map_err(syscall("open"))?;
    let output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(destination)
        .map_err(syscall("open"))?;

    let file_size = file_len(&input)?;
    let mut offset: off_t = 0;
    let mut bytes_sent = 0usize;
    while (bytes_sent as u64) < file_size {
        let remaining = usize::try_from(file_size - bytes_sent as u64).unwrap_or(usize::MAX);
        let sent = sendfile(&output, &input, Some(&mut offset), remaining)
            .map_err(errno("sendfile"))?;
        if sent == 0 {
            tracing::warn!(bytes_sent, file_size, "source shrank during sendfile");
            break;
        }
        bytes_sent += sent;
    }
    tracing::debug!(bytes_sent, "sendfile complete");

    Ok(SendfileReport {
        source: source.display().to_string(),
        destination: destination.display().to_string(),
        file_size,
        bytes_sent,
    })
}

/// One `read` into a user buffer versus one read-only mapping of the whole
/// file. An empty file maps nothing and reports 0.
///
/// # Errors
///
/// `open`, `read`, `fstat` or `mmap`.
pub fn compare_io(path: &Path) -> Result<IoComparison> {
    let mut buffer = [0u8; TRADITIONAL_BUFFER];
    let traditional_read = File::open(path)
        .map_err(syscall("open"))?
        .read(&mut buffer)
        .map_err(syscall("read"))?;

    let file = File::open(path).map_err(syscall("open"))?;
    let mapped = match usize::try_from(file_len(&file)?).ok().and_then(NonZeroUsize::new) {
        Some(len) => Mapping::read_only(&file, len)?.len(),
        None => 0,
    };

    Ok(IoComparison {
        path: path.display().to_string(),
        traditional_read,
        mapped,
    })
}

#[derive(Debug, Clone)]
pub struct ZeroCopyOptions {
    pub path: PathBuf,
    pub output_path: PathBuf,
    pub file_size: usize,
    pub writer_stagger: Duration,
    pub preview_len: usize,
}

impl ZeroCopyOptions {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output_path: output_path.into(),
            file_size: DEFAULT_FILE_SIZE,
            writer_stagger: Duration::from_millis(100),
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

/// Four phases: staggered mapped writers, concurrent mapped readers, a
/// `sendfile` copy, and the read-versus-mmap comparison.
///
/// # Errors
///
/// The first failure of any phase, or a panicked thread.
pub fn run_zerocopy_demo(options: &ZeroCopyOptions) -> Result<ZeroCopyReport> {
    let path = options.path.as_path();
    // Held from O_TRUNC to munmap: truncating under a live mapping raises SIGBUS.
    let truncation = Mutex::new(());
    let truncation = &truncation;

    let writes = thread::scope(|scope| -> Result<Vec<MmapWrite>> {
        let mut handles = Vec::with_capacity(THREAD_IDS.len());
        for id in THREAD_IDS {
            handles.push(scope.spawn(move || {
                let _file = truncation.lock().unwrap_or_else(PoisonError::into_inner);
                mmap_write(path, id, options.file_size)
            }));
            thread::sleep(options.writer_stagger);
        }
        handles
            .into_iter()
            .map(|handle| threads::join(handle, "mmap writer"))
            .collect()
    })?;

    let previews = thread::scope(|scope| -> Result<Vec<MmapPreview>> {
        let handles: Vec<_> = THREAD_IDS
            .iter()
            .map(|&id| scope.spawn(move || mmap_read(path, id, options.preview_len)))
            .collect();
        handles
            .into_iter()
            .map(|handle| threads::join(handle, "mmap reader"))
            .collect()
    })?;

    let sendfile = sendfile_copy(path, &options.output_path)?;
    let comparison = compare_io(path)?;

    Ok(ZeroCopyReport {
        writes,
        previews,
        sendfile,
        comparison,
    })
}
