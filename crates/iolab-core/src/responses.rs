//! Report types returned by the `iolab` demos.
//!
//! Every report serializes to JSON for `--format json|raw` and implements
//! `Display` for the default text output. Text renderings never end with a
//! trailing newline; the CLI adds one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{Durability, ReadMode};
use crate::record::Pirate;

/// Response from `iolab create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateReport {
    pub path: String,
    /// Requested permission bits, before the umask is applied.
    pub mode: u32,
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "created {} (mode {:04o})", self.path, self.mode)
    }
}

/// Response from `iolab read`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadReport {
    pub path: String,
    pub mode: ReadMode,
    pub capacity: usize,
    pub bytes_read: usize,
    /// Lossy UTF-8 view of `bytes` for structured output.
    pub content: String,
    /// The bytes exactly as read.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Error that ended the read loop early, if any.
    pub interrupted_by: Option<String>,
}

impl fmt::Display for ReadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Outcome of waiting on a descriptor with `select`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    TimedOut { timeout_secs: u64 },
    Ready { bytes_read: usize, content: String },
    NotReady,
}

/// Response from `iolab select`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectReport {
    pub timeout_secs: u64,
    pub readiness: Readiness,
}

impl fmt::Display for SelectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.readiness {
            Readiness::TimedOut { timeout_secs } => write!(f, "{timeout_secs} seconds elapsed."),
            Readiness::Ready {
                bytes_read,
                content,
            } if *bytes_read > 0 => write!(f, "Read {bytes_read} bytes: {content}"),
            Readiness::Ready { .. } => Ok(()),
            Readiness::NotReady => f.write_str("No input available."),
        }
    }
}

/// How a FIFO wait ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FifoOutcome {
    Received { content: String },
    Closed,
    TimedOut { waited_ms: u64 },
}

/// Response from `iolab fifo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FifoReport {
    pub path: String,
    /// Whether the FIFO had to be created with `mkfifo`.
    pub created: bool,
    /// Number of `EAGAIN` results seen before the outcome.
    pub empty_polls: u64,
    pub outcome: FifoOutcome,
}

impl fmt::Display for FifoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FifoOutcome::Received { content } => write!(f, "\nReceived: \"{content}\""),
            FifoOutcome::Closed => f.write_str("\nWriter closed or EOF"),
            FifoOutcome::TimedOut { waited_ms } => {
                write!(f, "\nNo data on {} after {waited_ms} ms", self.path)
            }
        }
    }
}

/// Response from `iolab append`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppendReport {
    pub path: String,
    pub durability: Durability,
    pub bytes_written: usize,
}

impl fmt::Display for AppendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.bytes_written;
        match self.durability {
            Durability::None => write!(f, "Wrote {n} bytes"),
            Durability::Fsync => write!(f, "Wrote {n} bytes and synced to disk"),
            Durability::Fdatasync => write!(f, "Wrote {n} bytes (data synced)"),
            Durability::OSync => write!(f, "Wrote {n} bytes (already synced to disk)"),
        }
    }
}

/// Response from `iolab record`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordReport {
    pub path: String,
    pub record: Pirate,
    pub record_size: usize,
    /// Whether the bytes read back equal the bytes written.
    pub verbatim: bool,
}

impl fmt::Display for RecordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nBooty: {}\nBeard Length: {}",
            self.record.name, self.record.booty, self.record.beard_len
        )
    }
}

/// Response from `iolab eof`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EofReport {
    pub path: String,
    /// Bytes passed to the sink before end of file.
    pub bytes_copied: u64,
}

impl fmt::Display for EofReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n[INFO] reached EOF (normal termination)")
    }
}

/// Which side of the stream-lock demo produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockRole {
    Writer,
    Reader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockEventKind {
    Waiting,
    Acquired,
    LineRead { line: String },
    Released,
}

/// One console line from a stream-lock thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub thread_id: u32,
    pub role: LockRole,
    #[serde(flatten)]
    pub kind: LockEventKind,
}

impl fmt::Display for LockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.thread_id;
        match (self.role, &self.kind) {
            (LockRole::Writer, LockEventKind::Waiting) => {
                write!(f, "[Thread {id}] starting file write")
            }
            (LockRole::Writer, LockEventKind::Acquired) => {
                write!(f, "[Thread {id}] lock acquired - writing to file")
            }
            (LockRole::Writer, LockEventKind::Released) => {
                write!(f, "[Thread {id}] file write complete")
            }
            (LockRole::Reader, LockEventKind::Waiting) => {
                write!(f, "[Reader Thread {id}] attempting to read file")
            }
            (LockRole::Reader, LockEventKind::Acquired) => {
                write!(f, "[Reader Thread {id}] lock acquired - reading file")
            }
            (LockRole::Reader, LockEventKind::Released) => {
                write!(f, "[Reader Thread {id}] finished reading (EOF)")
            }
            (role, LockEventKind::LineRead { line }) => {
                let label = match role {
                    LockRole::Reader => "Reader Thread",
                    LockRole::Writer => "Thread",
                };
                write!(f, "[{label} {id}] read: {line}")
            }
        }
    }
}

/// Response from `iolab stream-lock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamLockReport {
    pub path: String,
    pub events: Vec<LockEvent>,
    pub final_content: String,
}

impl fmt::Display for StreamLockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n[Main] all threads finished\n\n=== final file content ===\n{}",
            self.final_content.trim_end_matches('\n')
        )
    }
}

/// Response from `iolab vectored`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VectoredReport {
    pub path: String,
    pub bytes_written: usize,
    pub bytes_read: usize,
    pub buffers: Vec<String>,
}

impl fmt::Display for VectoredReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wrote {} bytes to file.", self.bytes_written)?;
        writeln!(f, "Read {} bytes from file.", self.bytes_read)?;
        write!(f, "\n--- Buffer Contents ---")?;
        for (index, buffer) in self.buffers.iter().enumerate() {
            write!(f, "\nBuffer {}: {}", index + 1, buffer.trim_end_matches('\n'))?;
        }
        Ok(())
    }
}

/// One `mmap` writer thread's result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MmapWrite {
    pub thread_id: u32,
    pub mapped_len: usize,
    pub text_len: usize,
}

/// One `mmap` reader thread's result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MmapPreview {
    pub thread_id: u32,
    pub mapped_len: usize,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendfileReport {
    pub source: String,
    pub destination: String,
    pub file_size: u64,
    pub bytes_sent: usize,
}

/// Bytes moved by a traditional `read` versus bytes exposed by `mmap`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IoComparison {
    pub path: String,
    pub traditional_read: usize,
    pub mapped: usize,
}

/// Response from `iolab zerocopy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZeroCopyReport {
    pub writes: Vec<MmapWrite>,
    pub previews: Vec<MmapPreview>,
    pub sendfile: SendfileReport,
    pub comparison: IoComparison,
}

impl fmt::Display for ZeroCopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Zero-Copy I/O example ===")?;
        writeln!(f, "Problem: traditional I/O copies kernel -> user buffers")?;
        writeln!(f, "Solution: mmap/sendfile skip the user-space copy")?;

        writeln!(f, "\n--- Phase 1: writing the file through mmap ---")?;
        for write in &self.writes {
            writeln!(
                f,
                "[Thread {}] mmap() write mapping ready ({} bytes)",
                write.thread_id, write.mapped_len
            )?;
            writeln!(
                f,
                "[Thread {}] wrote {} bytes - direct memory access",
                write.thread_id, write.text_len
            )?;
        }

        writeln!(f, "\n--- Phase 2: reading the file through mmap (no copy) ---")?;
        for preview in &self.previews {
            writeln!(
                f,
                "[Thread {}] mmap() mapping ready ({} bytes)",
                preview.thread_id, preview.mapped_len
            )?;
            writeln!(
                f,
                "[Thread {}] \"{}...\"",
                preview.thread_id,
                preview.preview.escape_debug()
            )?;
        }

        writeln!(f, "\n=== sendfile() zero-copy transfer ===")?;
        writeln!(f, "File size: {} bytes", self.sendfile.file_size)?;
        writeln!(
            f,
            "Transferred: {} bytes (no user buffer)",
            self.sendfile.bytes_sent
        )?;

        writeln!(f, "\n=== I/O comparison: {} ===", self.comparison.path)?;
        writeln!(
            f,
            "traditional read(): {} bytes (kernel -> user copy)",
            self.comparison.traditional_read
        )?;
        writeln!(
            f,
            "mmap(): {} bytes mapped (no copy, direct pointer access)",
            self.comparison.mapped
        )?;

        writeln!(f, "\n=== Summary ===")?;
        writeln!(f, "Traditional I/O: read()/write() copy between kernel and user buffers")?;
        writeln!(f, "Zero-copy:       mmap() - direct access through a pointer")?;
        write!(f, "                 sendfile() - transfer stays inside the kernel")
    }
}
