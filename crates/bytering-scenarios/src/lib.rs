//! Deterministic end-to-end drivers for the byte ring, plus the
//! verification helpers that vet their drained output and counters.

mod checks;
mod config;
mod engine;
mod error;
mod stats;

pub use checks::{
    verify_conservation, verify_framed, verify_overwrite, verify_stream, CheckResult, DrainReport,
};
pub use config::{ScenarioConfig, ScenarioKind};
pub use engine::RingScenarioEngine;
pub use error::{ScenarioError, ScenarioResult};
pub use stats::{ArcStatsSink, ScenarioStats, StatsSink};

/// Byte at `index` of the deterministic stream payload.
#[inline]
pub fn stream_byte(index: u64) -> u8 {
    (index % 251) as u8
}

/// Length of the `seq`-th framed item, spread over `0..=max_len`.
#[inline]
pub fn framed_len(seq: u32, max_len: usize) -> usize {
    (seq as usize).wrapping_mul(7919) % (max_len + 1)
}

/// Payload of the `seq`-th framed item.
pub fn framed_payload(seq: u32, max_len: usize) -> Vec<u8> {
    let len = framed_len(seq, max_len);
    (0..len)
        .map(|i| (seq as usize).wrapping_add(i).wrapping_mul(13) as u8)
        .collect()
}

/// Fixed-size record payload: the sequence number in the leading bytes,
/// deterministic filler after that.
pub fn record_payload(seq: u32, record: usize) -> Vec<u8> {
    let mut payload = vec![0u8; record];
    let head = record.min(4);
    payload[..head].copy_from_slice(&seq.to_le_bytes()[..head]);
    for (index, byte) in payload.iter_mut().enumerate().skip(4) {
        *byte = stream_byte(seq as u64 + index as u64);
    }
    payload
}
