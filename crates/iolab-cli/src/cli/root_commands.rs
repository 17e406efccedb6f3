use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use iolab_config::MAX_CAPACITY;
use iolab_core::enums::Durability;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create (or truncate) a file with `creat`.
    Create(CreateArgs),
    /// Fill a buffer from a file with blocking or non-blocking reads.
    Read(ReadArgs),
    /// Wait for stdin to become readable with `select`.
    Select(SelectArgs),
    /// Poll a named pipe without blocking, creating it if needed.
    Fifo(FifoArgs),
    /// Append to a file with an optional durability step.
    Append(AppendArgs),
    /// Write a fixed-layout record and read it back.
    Record(RecordArgs),
    /// Copy a file to stdout byte by byte and report how reading ended.
    Eof(EofArgs),
    /// Writers and a reader sharing one locked file stream.
    #[command(name = "stream-lock")]
    StreamLock(StreamLockArgs),
    /// Scatter/gather I/O with `writev` and `readv`.
    Vectored(VectoredArgs),
    /// `mmap` and `sendfile` next to a traditional `read`.
    Zerocopy(ZeroCopyArgs),
}

/// Parse a permission mode written in octal, with or without a `0o` prefix.
fn parse_mode(value: &str) -> Result<u32, String> {
    let digits = value.strip_prefix("0o").unwrap_or(value);
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|error| format!("'{value}' is not an octal mode: {error}"))?;
    if mode > 0o7777 {
        return Err(format!("'{value}' is out of range for a permission mode"));
    }
    Ok(mode)
}

/// Parse a buffer size no larger than [`MAX_CAPACITY`].
fn parse_capacity(value: &str) -> Result<usize, String> {
    let capacity: usize = value
        .parse()
        .map_err(|error| format!("'{value}' is not a byte count: {error}"))?;
    if capacity > MAX_CAPACITY {
        return Err(format!("{capacity} exceeds the {MAX_CAPACITY}-byte limit"));
    }
    Ok(capacity)
}

/// Arguments for `iolab create`.
#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    pub path: PathBuf,
    /// Permission bits in octal, before the umask.
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<u32>,
}

/// Arguments for `iolab read`.
#[derive(Clone, Debug, Args)]
pub struct ReadArgs {
    pub path: PathBuf,
    /// Open with `O_NONBLOCK`.
    #[arg(long)]
    pub nonblocking: bool,
    /// Buffer size in bytes.
    #[arg(long, value_parser = parse_capacity)]
    pub capacity: Option<usize>,
}

/// Arguments for `iolab select`.
#[derive(Clone, Debug, Args)]
pub struct SelectArgs {
    /// Seconds to wait before giving up.
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long, value_parser = parse_capacity)]
    pub capacity: Option<usize>,
}

/// Arguments for `iolab fifo`.
#[derive(Clone, Debug, Args)]
pub struct FifoArgs {
    pub path: PathBuf,
    /// Mode used when the FIFO has to be created.
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<u32>,
    /// Stop waiting after this many milliseconds (0 waits forever).
    #[arg(long)]
    pub max_wait_ms: Option<u64>,
}

/// Durability step after the append.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SyncMode {
    None,
    Fsync,
    Fdatasync,
    /// Open with `O_SYNC`.
    #[value(name = "o-sync")]
    OSync,
}

impl From<SyncMode> for Durability {
    fn from(mode: SyncMode) -> Self {
        match mode {
            SyncMode::None => Self::None,
            SyncMode::Fsync => Self::Fsync,
            SyncMode::Fdatasync => Self::Fdatasync,
            SyncMode::OSync => Self::OSync,
        }
    }
}

/// Arguments for `iolab append`.
#[derive(Clone, Debug, Args)]
pub struct AppendArgs {
    #[arg(long, value_enum, default_value_t = SyncMode::None)]
    pub sync: SyncMode,
    /// Target file (defaults to `files.log`).
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Text to append; each mode has its own default.
    #[arg(long)]
    pub message: Option<String>,
}

/// Arguments for `iolab record`.
#[derive(Clone, Debug, Args)]
pub struct RecordArgs {
    /// Target file (defaults to `files.record`).
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub booty: Option<u64>,
    #[arg(long)]
    pub beard_len: Option<u32>,
}

/// Arguments for `iolab eof`.
#[derive(Clone, Debug, Args)]
pub struct EofArgs {
    /// Source file (defaults to `files.record`).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `iolab stream-lock`.
#[derive(Clone, Debug, Args)]
pub struct StreamLockArgs {
    /// Shared file (defaults to `files.shared`).
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Lines each writer emits.
    #[arg(long)]
    pub messages: Option<u32>,
}

/// Arguments for `iolab vectored`.
#[derive(Clone, Debug, Args)]
pub struct VectoredArgs {
    /// Target file (defaults to `files.vectored`).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `iolab zerocopy`.
#[derive(Clone, Debug, Args)]
pub struct ZeroCopyArgs {
    /// Mapped file (defaults to `files.zerocopy`).
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// `sendfile` destination (defaults to `files.zerocopy_output`).
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Size of the mapped file in bytes.
    #[arg(long)]
    pub file_size: Option<usize>,
}
