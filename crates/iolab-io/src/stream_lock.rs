//! Stream-level locking across threads.
//!
//! [`SharedStream::lock`] plays the part of `flockfile`: the guard owns the
//! stream for a whole multi-line operation and releases it on drop
//! (`funlockfile`). Writers holding the guard therefore never interleave.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use iolab_core::responses::{LockEvent, LockEventKind, LockRole, StreamLockReport};

use crate::error::{Result, syscall};
use crate::threads;

/// Thread ids of the writers started before the reader.
const EARLY_WRITERS: [u32; 2] = [1, 2];
const READER: u32 = 3;
/// Writer started together with the reader, to contend for the stream.
const LATE_WRITER: u32 = 4;

#[derive(Debug, Clone)]
pub struct StreamLockOptions {
    pub path: PathBuf,
    pub messages: u32,
    pub write_delay: Duration,
    pub read_delay: Duration,
    pub startup_delay: Duration,
}

impl StreamLockOptions {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            messages: 5,
            write_delay: Duration::from_millis(100),
            read_delay: Duration::from_millis(50),
            startup_delay: Duration::from_secs(1),
        }
    }
}

/// A file stream shared between threads.
#[derive(Debug)]
pub struct SharedStream {
    file: Mutex<File>,
}

impl SharedStream {
    /// Open `path` read-write, creating or truncating it (`fopen(path, "w+")`).
    ///
    /// # Errors
    ///
    /// `fopen` if the file cannot be opened.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(syscall("fopen"))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Take the stream. A panicked holder leaves the file usable, so poisoning
    /// is ignored.
    pub fn lock(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ordered record of thread events, forwarded to an observer as they happen.
struct EventLog<'a> {
    events: Mutex<Vec<LockEvent>>,
    observer: &'a (dyn Fn(&LockEvent) + Sync),
}

impl EventLog<'_> {
    fn emit(&self, thread_id: u32, role: LockRole, kind: LockEventKind) {
        let event = LockEvent {
            thread_id,
            role,
            kind,
        };
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        (self.observer)(&event);
        events.push(event);
    }

    fn into_events(self) -> Vec<LockEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_messages(
    stream: &SharedStream,
    log: &EventLog<'_>,
    options: &StreamLockOptions,
    thread_id: u32,
) -> Result<()> {
    log.emit(thread_id, LockRole::Writer, LockEventKind::Waiting);

    let mut file = stream.lock();
    log.emit(thread_id, LockRole::Writer, LockEventKind::Acquired);

    for i in 0..options.messages {
        writeln!(file, "Thread {thread_id}: message {i}").map_err(syscall("fprintf"))?;
        file.flush().map_err(syscall("fflush"))?;
        thread::sleep(options.write_delay);
    }

    log.emit(thread_id, LockRole::Writer, LockEventKind::Released);
    drop(file);
    Ok(())
}

fn read_messages(
    stream: &SharedStream,
    log: &EventLog<'_>,
    options: &StreamLockOptions,
    thread_id: u32,
) -> Result<usize> {
    log.emit(thread_id, LockRole::Reader, LockEventKind::Waiting);

    let mut file = stream.lock();
    log.emit(thread_id, LockRole::Reader, LockEventKind::Acquired);

    file.seek(SeekFrom::Start(0)).map_err(syscall("rewind"))?;
    let mut lines = 0;
    for line in BufReader::new(&mut *file).lines() {
        let line = line.map_err(syscall("fgets"))?;
        log.emit(thread_id, LockRole::Reader, LockEventKind::LineRead { line });
        lines += 1;
        thread::sleep(options.read_delay);
    }
    // Later writers must keep appending after everything read so far.
    file.seek(SeekFrom::End(0)).map_err(syscall("fseek"))?;

    log.emit(thread_id, LockRole::Reader, LockEventKind::Released);
    drop(file);
    Ok(lines)
}

/// Run writers 1 and 2, then after `startup_delay` reader 3 and writer 4, all
/// against one shared stream, and return the file's final content.
///
/// `observer` sees every event in order, while the event lock is held, so it
/// can print without lines from different threads tearing.
///
/// # Errors
///
/// Any thread's I/O error, a panicked thread, or `fopen` when reading the
/// result back.
pub fn run_stream_lock_demo(
    options: &StreamLockOptions,
    observer: &(dyn Fn(&LockEvent) + Sync),
) -> Result<StreamLockReport> {
    let stream = SharedStream::create(&options.path)?;
    let log = EventLog {
        events: Mutex::new(Vec::new()),
        observer,
    };

    let (shared, events) = (&stream, &log);
    thread::scope(|scope| -> Result<()> {
        let early: Vec<_> = EARLY_WRITERS
            .iter()
            .map(|&id| scope.spawn(move || write_messages(shared, events, options, id)))
            .collect();

        thread::sleep(options.startup_delay);

        let reader = scope.spawn(move || read_messages(shared, events, options, READER));
        let late = scope.spawn(move || write_messages(shared, events, options, LATE_WRITER));

        for handle in early {
            threads::join(handle, "writer")?;
        }
        let lines = threads::join(reader, "reader")?;
        threads::join(late, "writer")?;
        tracing::debug!(lines, "reader finished");
        Ok(())
    })?;
    drop(stream);

    let final_content = std::fs::read_to_string(&options.path).map_err(syscall("fopen"))?;
    Ok(StreamLockReport {
        path: options.path.display().to_string(),
        events: log.into_events(),
        final_content,
    })
}
