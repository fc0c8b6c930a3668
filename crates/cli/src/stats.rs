//! Per-outcome counters shared by `listen` and `replay`.

use f1_udp_protocol::{DecodeResult, Packet};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub datagrams: u64,
    pub bytes: u64,
    pub decoded: u64,
    /// Decoded packets by packet name.
    pub packets: BTreeMap<&'static str, u64>,
    /// Decode failures by error kind.
    pub errors: BTreeMap<&'static str, u64>,
}

impl DecodeStats {
    pub fn record(&mut self, len: usize, result: &DecodeResult<Packet>) {
        self.datagrams = self.datagrams.saturating_add(1);
        self.bytes = self.bytes.saturating_add(len as u64);
        match result {
            Ok(packet) => {
                self.decoded = self.decoded.saturating_add(1);
                bump(&mut self.packets, packet.packet_id().name());
            }
            Err(error) => bump(&mut self.errors, error.kind()),
        }
    }

    pub fn failed(&self) -> u64 {
        self.errors.values().sum()
    }
}

fn bump(map: &mut BTreeMap<&'static str, u64>, key: &'static str) {
    let count = map.entry(key).or_default();
    *count = count.saturating_add(1);
}
