//! End-to-end runs of the stream-lock demo with short delays.

use std::sync::Mutex;
use std::time::Duration;

use iolab_core::responses::{LockEvent, LockEventKind, LockRole};
use iolab_io::stream_lock::{SharedStream, StreamLockOptions, run_stream_lock_demo};
use pretty_assertions::assert_eq;

fn fast_options(path: std::path::PathBuf) -> StreamLockOptions {
    StreamLockOptions {
        messages: 5,
        write_delay: Duration::from_millis(5),
        read_delay: Duration::from_millis(1),
        startup_delay: Duration::from_millis(200),
        ..StreamLockOptions::new(path)
    }
}

fn thread_of(line: &str) -> &str {
    line.split(':').next().unwrap_or_default()
}

#[test]
fn writers_never_interleave() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let options = fast_options(temp.path().join("shared_data.txt"));

    let report = run_stream_lock_demo(&options, &|_| {}).expect("demo should run");

    let lines: Vec<&str> = report.final_content.lines().collect();
    assert_eq!(lines.len(), 15);
    for block in lines.chunks(5) {
        let owner = thread_of(block[0]);
        assert!(
            block.iter().all(|line| thread_of(line) == owner),
            "interleaved block: {block:?}"
        );
        for (i, line) in block.iter().enumerate() {
            assert!(line.ends_with(&format!("message {i}")), "{line}");
        }
    }
    let mut owners: Vec<&str> = lines.chunks(5).map(|block| thread_of(block[0])).collect();
    owners.sort_unstable();
    assert_eq!(owners, vec!["Thread 1", "Thread 2", "Thread 4"]);
}

#[test]
fn reader_sees_whole_blocks_only() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let options = fast_options(temp.path().join("shared_data.txt"));

    let report = run_stream_lock_demo(&options, &|_| {}).expect("demo should run");

    let read: Vec<&str> = report
        .events
        .iter()
        .filter_map(|event| match &event.kind {
            LockEventKind::LineRead { line } => Some(line.as_str()),
            _ => None,
        })
        .collect();
    assert!(read.len() == 10 || read.len() == 15, "read {} lines", read.len());
    assert!(read.iter().all(|line| line.starts_with("Thread ")));
    assert!(
        report
            .events
            .iter()
            .filter(|event| event.role == LockRole::Reader)
            .all(|event| event.thread_id == 3)
    );
}

#[test]
fn observer_sees_every_event_in_order() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let options = fast_options(temp.path().join("shared_data.txt"));
    let seen: Mutex<Vec<LockEvent>> = Mutex::new(Vec::new());

    let report = run_stream_lock_demo(&options, &|event| {
        seen.lock().expect("observer lock").push(event.clone());
    })
    .expect("demo should run");

    assert_eq!(seen.into_inner().expect("observer lock"), report.events);
    for id in [1, 2, 4] {
        let kinds: Vec<&LockEventKind> = report
            .events
            .iter()
            .filter(|event| event.thread_id == id)
            .map(|event| &event.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                &LockEventKind::Waiting,
                &LockEventKind::Acquired,
                &LockEventKind::Released
            ]
        );
    }
}

#[test]
fn missing_directory_fails_as_fopen() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let options = fast_options(temp.path().join("missing").join("shared_data.txt"));

    let error = run_stream_lock_demo(&options, &|_| {}).expect_err("should fail");

    assert_eq!(error.op(), Some("fopen"));
}

#[test]
fn guard_serialises_direct_users() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let stream = SharedStream::create(&temp.path().join("s")).expect("create");

    std::thread::scope(|scope| {
        for id in 0..4 {
            let stream = &stream;
            scope.spawn(move || {
                use std::io::Write;
                let mut file = stream.lock();
                for i in 0..3 {
                    writeln!(file, "{id}:{i}").expect("write");
                }
            });
        }
    });

    let content = std::fs::read_to_string(temp.path().join("s")).expect("read back");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 12);
    for block in lines.chunks(3) {
        assert!(block.iter().all(|line| thread_of(line) == thread_of(block[0])));
    }
}
