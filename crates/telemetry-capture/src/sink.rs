//! Append-only destinations for raw datagrams.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Suffix of capture files, after the millisecond timestamp.
pub const CAPTURE_FILE_SUFFIX: &str = "_udp_telemetry_raw.log";

/// File name for a capture started at `unix_ms` milliseconds since the epoch.
pub fn capture_file_name(unix_ms: u128) -> String {
    format!("{unix_ms}{CAPTURE_FILE_SUFFIX}")
}

/// Destination for raw datagram bytes.
///
/// `append` receives one whole datagram at a time and must store it
/// unmodified, after everything appended before it.
pub trait RawSink: Send {
    fn append(&mut self, datagram: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

impl<S: RawSink + ?Sized> RawSink for Box<S> {
    fn append(&mut self, datagram: &[u8]) -> io::Result<()> {
        (**self).append(datagram)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Capture file opened in create + append mode.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending. Existing content is kept.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Open `<dir>/<unix_ms>_udp_telemetry_raw.log`, creating `dir` if needed.
    pub fn in_dir(dir: &Path, unix_ms: u128) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Self::open(dir.join(capture_file_name(unix_ms)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawSink for FileSink {
    fn append(&mut self, datagram: &[u8]) -> io::Result<()> {
        self.writer.write_all(datagram)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory sink. Clones share the same storage, so a test can keep one
/// clone while the writer thread owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    datagrams: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Datagrams appended so far, in order.
    pub fn datagrams(&self) -> Vec<Vec<u8>> {
        self.datagrams.lock().clone()
    }

    /// Everything appended so far as one byte string, as a file would hold it.
    pub fn contents(&self) -> Vec<u8> {
        self.datagrams.lock().concat()
    }

    pub fn len(&self) -> usize {
        self.datagrams.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.datagrams.lock().is_empty()
    }
}

impl RawSink for MemorySink {
    fn append(&mut self, datagram: &[u8]) -> io::Result<()> {
        self.datagrams.lock().push(datagram.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
