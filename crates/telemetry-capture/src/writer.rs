//! Background capture writer.
//!
//! The receive loop hands datagrams to a [`CaptureSender`]; one writer thread
//! owns the sink and appends them in arrival order. A failed append is logged
//! and counted, and later datagrams are still written.

use crate::sink::RawSink;
use crate::{CaptureError, CaptureResult};
use crossbeam::channel::{self, Receiver, Sender};
use serde::Serialize;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Totals reported when the writer shuts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CaptureStats {
    pub datagrams: u64,
    pub bytes: u64,
    pub write_errors: u64,
}

/// Cloneable handle for queueing datagrams.
#[derive(Debug, Clone)]
pub struct CaptureSender {
    tx: Sender<Vec<u8>>,
}

impl CaptureSender {
    /// Queue one datagram. Fails only once the writer thread has stopped.
    pub fn capture(&self, datagram: &[u8]) -> CaptureResult<()> {
        self.tx
            .send(datagram.to_vec())
            .map_err(|_| CaptureError::WriterClosed)
    }
}

/// Owner of the writer thread.
pub struct CaptureHandle {
    sender: CaptureSender,
    thread: JoinHandle<CaptureResult<CaptureStats>>,
}

impl CaptureHandle {
    pub fn sender(&self) -> CaptureSender {
        self.sender.clone()
    }

    /// Shorthand for `sender().capture(..)`.
    pub fn capture(&self, datagram: &[u8]) -> CaptureResult<()> {
        self.sender.capture(datagram)
    }

    /// Close the queue, wait for every queued datagram to be written and
    /// flushed, and return the totals.
    ///
    /// Senders cloned from this handle must be dropped first, otherwise the
    /// writer keeps waiting for them.
    pub fn finish(self) -> CaptureResult<CaptureStats> {
        drop(self.sender);
        self.thread
            .join()
            .map_err(|_| CaptureError::WriterClosed)?
    }
}

/// Spawns the writer thread.
pub struct CaptureWriter;

impl CaptureWriter {
    pub fn spawn<S>(sink: S) -> CaptureResult<CaptureHandle>
    where
        S: RawSink + 'static,
    {
        let (tx, rx) = channel::unbounded();
        let thread = thread::Builder::new()
            .name("capture-writer".to_string())
            .spawn(move || Self::run(sink, rx))?;

        Ok(CaptureHandle {
            sender: CaptureSender { tx },
            thread,
        })
    }

    fn run<S: RawSink>(mut sink: S, rx: Receiver<Vec<u8>>) -> CaptureResult<CaptureStats> {
        let mut stats = CaptureStats::default();

        for datagram in rx.iter() {
            match sink.append(&datagram) {
                Ok(()) => {
                    stats.datagrams = stats.datagrams.saturating_add(1);
                    stats.bytes = stats.bytes.saturating_add(datagram.len() as u64);
                }
                Err(error) => {
                    stats.write_errors = stats.write_errors.saturating_add(1);
                    warn!(%error, len = datagram.len(), "Failed to write datagram to capture");
                }
            }
        }

        sink.flush()?;
        debug!(
            datagrams = stats.datagrams,
            bytes = stats.bytes,
            "Capture writer stopped"
        );
        Ok(stats)
    }
}
