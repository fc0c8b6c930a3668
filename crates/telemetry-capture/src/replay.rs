//! Splitting a raw capture back into datagrams.
//!
//! Capture files carry no framing. A datagram starts wherever a header passes
//! schema validation and names a packet id with a known size; that size gives
//! its length. Bytes that cannot start such a datagram (undecodable traffic
//! captured alongside the game's) are skipped and reported on the next
//! datagram found, so one bad record does not shift the boundaries after it.
//! Framing fails only when the rest of the capture holds no complete packet.

use crate::{CaptureError, CaptureResult};
use f1_udp_protocol::{HEADER_SIZE, PacketHeader, expected_packet_size};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const READ_CHUNK: usize = 64 * 1024;

/// Outcome of looking for the next datagram in a window of capture bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// A datagram of `size` bytes starts `skipped` bytes into the window.
    Found { skipped: usize, size: usize },
    /// The first `skipped` bytes cannot start a datagram; the rest needs
    /// more input before anything can be decided.
    NeedMore { skipped: usize },
    /// No complete datagram anywhere in the window.
    Exhausted,
}

/// Header at the start of `window`, if it passes validation and has a known size.
fn packet_size_at(window: &[u8]) -> Option<usize> {
    let header = PacketHeader::decode(window).ok()?;
    expected_packet_size(header.packet_id)
}

/// `at_eof` says whether `window` runs to the end of the capture.
fn scan(window: &[u8], at_eof: bool) -> Scan {
    let mut start = 0;
    while let Some(rest) = window.get(start..).filter(|rest| rest.len() >= HEADER_SIZE) {
        if let Some(size) = packet_size_at(rest) {
            if rest.len() >= size {
                return Scan::Found {
                    skipped: start,
                    size,
                };
            }
            if !at_eof {
                return Scan::NeedMore { skipped: start };
            }
        }
        start += 1;
    }
    if at_eof {
        Scan::Exhausted
    } else {
        Scan::NeedMore { skipped: start }
    }
}

fn unframeable(offset: u64, len: usize) -> CaptureError {
    CaptureError::Replay {
        offset,
        reason: format!("no complete packet in the remaining {len} bytes"),
    }
}

/// One datagram recovered from an in-memory capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayItem<'a> {
    /// Byte offset of the datagram within the capture.
    pub offset: u64,
    /// Bytes skipped right before this datagram because they could not be framed.
    pub skipped: usize,
    pub datagram: &'a [u8],
}

/// Iterator over the datagrams of a capture already held in memory.
#[derive(Debug, Clone)]
pub struct RawLogReader<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> RawLogReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            done: false,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn next_item(&mut self) -> CaptureResult<ReplayItem<'a>> {
        let rest = self.data.get(self.offset..).unwrap_or_default();
        match scan(rest, true) {
            Scan::Found { skipped, size } => {
                let start = self.offset + skipped;
                let datagram = rest.get(skipped..skipped + size).unwrap_or_default();
                self.offset = start + size;
                Ok(ReplayItem {
                    offset: start as u64,
                    skipped,
                    datagram,
                })
            }
            Scan::NeedMore { .. } | Scan::Exhausted => {
                self.done = true;
                Err(unframeable(self.offset as u64, rest.len()))
            }
        }
    }
}

impl<'a> Iterator for RawLogReader<'a> {
    type Item = CaptureResult<ReplayItem<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.data.len() {
            return None;
        }
        Some(self.next_item())
    }
}

impl std::iter::FusedIterator for RawLogReader<'_> {}

/// One datagram read from a capture stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayDatagram {
    /// Byte offset of the datagram within the capture.
    pub offset: u64,
    /// Bytes skipped right before this datagram because they could not be framed.
    pub skipped: usize,
    pub datagram: Vec<u8>,
}

/// Streaming counterpart of [`RawLogReader`] for captures too large to load.
///
/// Only the current window of the capture is buffered: at most one packet
/// plus one read chunk.
#[derive(Debug)]
pub struct RawLogStream<R> {
    reader: R,
    buf: Vec<u8>,
    /// Consumed prefix of `buf`.
    start: usize,
    /// Capture offset of `buf[start]`.
    offset: u64,
    eof: bool,
    done: bool,
}

impl RawLogStream<BufReader<File>> {
    pub fn open(path: &Path) -> CaptureResult<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> RawLogStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            start: 0,
            offset: 0,
            eof: false,
            done: false,
        }
    }

    /// Capture bytes framed or skipped so far.
    pub fn position(&self) -> u64 {
        self.offset
    }

    fn fill(&mut self) -> io::Result<()> {
        let pending = self.buf.len().saturating_sub(self.start);
        self.buf.copy_within(self.start.., 0);
        self.buf.truncate(pending);
        self.start = 0;

        let filled = self.buf.len();
        self.buf.resize(filled + READ_CHUNK, 0);
        let read = loop {
            match self.reader.read(self.buf.get_mut(filled..).unwrap_or_default()) {
                Ok(read) => break read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.buf.truncate(filled);
                    return Err(error);
                }
            }
        };
        self.buf.truncate(filled + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(())
    }

    fn next_item(&mut self) -> CaptureResult<Option<ReplayDatagram>> {
        let item_start = self.offset;
        let mut skipped_total = 0usize;
        loop {
            let window = self.buf.get(self.start..).unwrap_or_default();
            let window_len = window.len();
            if self.eof && window_len == 0 && skipped_total == 0 {
                return Ok(None);
            }

            match scan(window, self.eof) {
                Scan::Found { skipped, size } => {
                    let begin = self.start + skipped;
                    let datagram = self.buf.get(begin..begin + size).unwrap_or_default().to_vec();
                    let offset = self.offset + skipped as u64;
                    self.start = begin + size;
                    self.offset = offset + size as u64;
                    return Ok(Some(ReplayDatagram {
                        offset,
                        skipped: skipped_total + skipped,
                        datagram,
                    }));
                }
                Scan::NeedMore { skipped } => {
                    skipped_total += skipped;
                    self.start += skipped;
                    self.offset += skipped as u64;
                    self.fill()?;
                }
                Scan::Exhausted => {
                    return Err(unframeable(item_start, skipped_total + window_len));
                }
            }
        }
    }
}

impl<R: Read> Iterator for RawLogStream<R> {
    type Item = CaptureResult<ReplayDatagram>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_item();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result.transpose()
    }
}

impl<R: Read> std::iter::FusedIterator for RawLogStream<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn datagram(packet_id: u8, payload_len: usize) -> Vec<u8> {
        let mut raw = vec![0u8; HEADER_SIZE + payload_len];
        raw[0..2].copy_from_slice(&2023u16.to_le_bytes());
        raw[4] = 1;
        raw[5] = packet_id;
        raw
    }

    /// Hands out at most `chunk` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(out.len()).min(self.data.len());
            let (head, tail) = self.data.split_at(n);
            if let Some(dst) = out.get_mut(..n) {
                dst.copy_from_slice(head);
            }
            self.data = tail;
            Ok(n)
        }
    }

    #[test]
    fn test_empty_capture_yields_nothing() {
        assert_eq!(RawLogReader::new(&[]).count(), 0);
        assert_eq!(RawLogStream::new(io::empty()).count(), 0);
    }

    #[test]
    fn test_splits_mixed_packets() -> TestResult {
        let event = datagram(3, 16);
        let motion = datagram(0, 1440);
        let data = [event.clone(), motion.clone(), event.clone()].concat();

        let items = RawLogReader::new(&data).collect::<CaptureResult<Vec<_>>>()?;
        let offsets: Vec<u64> = items.iter().map(|item| item.offset).collect();
        assert_eq!(offsets, [0, 40, 1504]);
        assert!(items.iter().all(|item| item.skipped == 0));
        assert_eq!(items.get(1).map(|item| item.datagram), Some(motion.as_slice()));
        Ok(())
    }

    #[test]
    fn test_skips_unframeable_prefix() -> TestResult {
        let event = datagram(3, 16);
        let data = [b"junk".to_vec(), event.clone(), event.clone()].concat();

        let items = RawLogReader::new(&data).collect::<CaptureResult<Vec<_>>>()?;
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].offset, items[0].skipped), (4, 4));
        assert_eq!((items[1].offset, items[1].skipped), (44, 0));
        assert_eq!(items[0].datagram, event.as_slice());
        Ok(())
    }

    #[test]
    fn test_unsupported_schema_is_skipped_not_framed() -> TestResult {
        let mut old = datagram(3, 16);
        old[0..2].copy_from_slice(&2019u16.to_le_bytes());
        let data = [old, datagram(3, 16)].concat();

        let items = RawLogReader::new(&data).collect::<CaptureResult<Vec<_>>>()?;
        assert_eq!(items.len(), 1);
        assert_eq!((items[0].offset, items[0].skipped), (40, 40));
        Ok(())
    }

    #[test]
    fn test_unknown_id_tail_stops_with_offset() {
        let data = [datagram(3, 16), datagram(77, 16)].concat();
        let results: Vec<_> = RawLogReader::new(&data).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results.last(),
            Some(Err(CaptureError::Replay { offset: 40, .. }))
        ));
    }

    #[test]
    fn test_truncated_tail_reported() {
        let mut data = datagram(3, 16);
        data.extend_from_slice(&datagram(0, 1440)[..100]);
        let mut reader = RawLogReader::new(&data);
        assert!(matches!(reader.next(), Some(Ok(_))));
        assert!(matches!(
            reader.next(),
            Some(Err(CaptureError::Replay { offset: 40, .. }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_stream_matches_in_memory_reader() -> TestResult {
        let data = [
            datagram(0, 1440),
            b"garbage!".to_vec(),
            datagram(3, 16),
            datagram(6, 1323),
        ]
        .concat();

        let expected: Vec<ReplayDatagram> = RawLogReader::new(&data)
            .map(|item| {
                item.map(|item| ReplayDatagram {
                    offset: item.offset,
                    skipped: item.skipped,
                    datagram: item.datagram.to_vec(),
                })
            })
            .collect::<CaptureResult<_>>()?;
        assert_eq!(expected.len(), 3);

        for chunk in [1, 7, 24, 1000, READ_CHUNK] {
            let stream = RawLogStream::new(Trickle { data: &data, chunk });
            let items = stream.collect::<CaptureResult<Vec<_>>>()?;
            assert_eq!(items, expected, "chunk {chunk}");
        }
        Ok(())
    }

    #[test]
    fn test_stream_reports_unframeable_tail() -> TestResult {
        let data = [datagram(3, 16), b"tail".to_vec()].concat();
        let mut stream = RawLogStream::new(data.as_slice());

        let first = stream.next().ok_or("missing datagram")??;
        assert_eq!(first.offset, 0);
        assert!(matches!(
            stream.next(),
            Some(Err(CaptureError::Replay { offset: 40, .. }))
        ));
        assert!(stream.next().is_none());
        assert_eq!(stream.position(), 40);
        Ok(())
    }
}
