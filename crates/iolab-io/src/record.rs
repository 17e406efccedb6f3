//! Persist a fixed-layout record through buffered streams and read it back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use iolab_core::record::{Pirate, RECORD_SIZE};
use iolab_core::responses::RecordReport;

use crate::error::{Result, syscall};

/// Write exactly one record to `path`, replacing its contents.
///
/// # Errors
///
/// Layout validation errors, or syscall errors labelled `fopen`, `fwrite`
/// or `fclose` (the final flush).
pub fn write_record(path: &Path, pirate: &Pirate) -> Result<[u8; RECORD_SIZE]> {
    let bytes = pirate.to_bytes()?;

    let file = File::create(path).map_err(syscall("fopen"))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(syscall("fwrite"))?;
    writer.flush().map_err(syscall("fclose"))?;

    Ok(bytes)
}

/// Read the raw bytes of the first record in `path`.
///
/// # Errors
///
/// `fopen`, or `fread` when the file is shorter than one record.
pub fn read_record_bytes(path: &Path) -> Result<[u8; RECORD_SIZE]> {
    let file = File::open(path).map_err(syscall("fopen"))?;
    let mut reader = BufReader::new(file);
    let mut bytes = [0u8; RECORD_SIZE];
    reader.read_exact(&mut bytes).map_err(syscall("fread"))?;
    Ok(bytes)
}

/// Read and decode the first record in `path`.
///
/// # Errors
///
/// Same as [`read_record_bytes`], plus decoding errors.
pub fn read_record(path: &Path) -> Result<Pirate> {
    let bytes = read_record_bytes(path)?;
    Ok(Pirate::from_bytes(&bytes)?)
}

/// Write `pirate`, read it back, and check the bytes survived verbatim.
///
/// # Errors
///
/// Anything [`write_record`] or [`read_record_bytes`] can return.
pub fn round_trip(path: &Path, pirate: &Pirate) -> Result<RecordReport> {
    let written = write_record(path, pirate)?;
    let read = read_record_bytes(path)?;
    let record = Pirate::from_bytes(&read)?;

    let verbatim = written == read;
    if !verbatim {
        tracing::warn!(path = %path.display(), "record bytes changed on disk");
    }

    Ok(RecordReport {
        path: path.display().to_string(),
        record,
        record_size: RECORD_SIZE,
        verbatim,
    })
}

#[cfg(test)]
mod tests {
    use iolab_core::errors::CoreError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::IoError;

    #[test]
    fn blackbeard_survives_round_trip() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");

        let report = round_trip(&path, &Pirate::blackbeard()).expect("round trip");

        assert_eq!(report.record, Pirate::blackbeard());
        assert!(report.verbatim);
        assert_eq!(
            std::fs::metadata(&path).expect("file exists").len(),
            RECORD_SIZE as u64
        );
    }

    #[test]
    fn rewriting_replaces_previous_record() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        let anne = Pirate {
            name: String::from("Anne Bonny"),
            booty: 120,
            beard_len: 0,
        };

        write_record(&path, &Pirate::blackbeard()).expect("first write");
        write_record(&path, &anne).expect("second write");

        assert_eq!(read_record(&path).expect("read"), anne);
    }

    #[test]
    fn short_file_fails_as_fread() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        std::fs::write(&path, [0u8; RECORD_SIZE - 1]).expect("seed file");

        let error = read_record(&path).expect_err("should fail");

        assert_eq!(error.op(), Some("fread"));
        assert_eq!(error.kind(), Some(std::io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn oversized_name_never_touches_disk() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        let pirate = Pirate {
            name: "n".repeat(200),
            booty: 0,
            beard_len: 0,
        };

        let error = write_record(&path, &pirate).expect_err("should fail");

        assert!(matches!(error, IoError::Core(CoreError::Validation(_))));
        assert!(!path.exists());
    }
}
