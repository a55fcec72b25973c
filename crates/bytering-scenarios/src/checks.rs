use crate::stats::ScenarioStats;
use crate::{framed_payload, record_payload, stream_byte};
use bytering::RingStatus;

/// Borrowed view over drained scenario output for verification helpers.
pub struct DrainReport<'a> {
    pub stream: &'a [u8],
    pub records: &'a [Vec<u8>],
}

pub type CheckResult = Result<(), String>;

pub fn verify_conservation(status: &RingStatus) -> CheckResult {
    let total = status.used + status.free + status.put_claimed + status.get_claimed;
    if total != status.capacity {
        return Err(format!(
            "accounted {} bytes across a {}-byte ring",
            total, status.capacity
        ));
    }
    Ok(())
}

pub fn verify_stream(
    drain: &DrainReport<'_>,
    stats: &ScenarioStats,
    total_bytes: u64,
) -> CheckResult {
    if drain.stream.len() as u64 != total_bytes {
        return Err(format!(
            "drained {} bytes (expected {})",
            drain.stream.len(),
            total_bytes
        ));
    }
    for (index, byte) in drain.stream.iter().enumerate() {
        if *byte != stream_byte(index as u64) {
            return Err(format!("stream byte {index} corrupted or out of order"));
        }
    }
    if stats.bytes_in != total_bytes {
        return Err(format!(
            "stats recorded {} bytes in (expected {})",
            stats.bytes_in, total_bytes
        ));
    }
    if stats.bytes_out != total_bytes {
        return Err(format!(
            "stats recorded {} bytes out (expected {})",
            stats.bytes_out, total_bytes
        ));
    }
    Ok(())
}

pub fn verify_framed(
    drain: &DrainReport<'_>,
    stats: &ScenarioStats,
    items: u32,
    max_len: usize,
) -> CheckResult {
    if drain.records.len() as u32 != items {
        return Err(format!(
            "drained {} items (expected {})",
            drain.records.len(),
            items
        ));
    }
    for (seq, record) in drain.records.iter().enumerate() {
        let expected = framed_payload(seq as u32, max_len);
        if record != &expected {
            return Err(format!("item {seq} corrupted or out of order"));
        }
    }
    if stats.items_in != items {
        return Err(format!(
            "stats recorded {} items in (expected {})",
            stats.items_in, items
        ));
    }
    if stats.items_out != items {
        return Err(format!(
            "stats recorded {} items out (expected {})",
            stats.items_out, items
        ));
    }
    Ok(())
}

pub fn verify_overwrite(
    drain: &DrainReport<'_>,
    stats: &ScenarioStats,
    record: usize,
    writes: u32,
    capacity: usize,
) -> CheckResult {
    let kept = ((capacity / record) as u32).min(writes);
    if drain.records.len() as u32 != kept {
        return Err(format!(
            "drained {} records (expected {})",
            drain.records.len(),
            kept
        ));
    }
    let first = writes - kept;
    for (offset, payload) in drain.records.iter().enumerate() {
        let seq = first + offset as u32;
        if payload != &record_payload(seq, record) {
            return Err(format!("record {seq} corrupted or out of order"));
        }
    }
    if stats.items_in != writes {
        return Err(format!(
            "stats recorded {} writes (expected {})",
            stats.items_in, writes
        ));
    }
    if stats.evictions != writes - kept {
        return Err(format!(
            "stats recorded {} evictions (expected {})",
            stats.evictions,
            writes - kept
        ));
    }
    Ok(())
}
