use crate::checks::DrainReport;
use crate::config::{ScenarioConfig, ScenarioKind};
use crate::error::ScenarioResult;
use crate::stats::StatsSink;
use crate::{framed_payload, record_payload, stream_byte};
use bytering::{RingBuf, RingError, RingStatus};

/// Units of work a single `poll` may perform before yielding.
const POLL_BUDGET: usize = 64;

pub struct RingScenarioEngine<S> {
    ring: RingBuf,
    stats: S,
    state: ScenarioState,
    scratch: Vec<u8>,
    stream: Vec<u8>,
    records: Vec<Vec<u8>>,
}

enum ScenarioState {
    Stream {
        total_bytes: u64,
        step: usize,
        produced: u64,
        consumed: u64,
    },
    Framed {
        items: u32,
        max_len: usize,
        written: u32,
        read: u32,
    },
    Overwrite {
        record: usize,
        writes: u32,
        written: u32,
        drained: bool,
    },
}

impl<S> RingScenarioEngine<S>
where
    S: StatsSink,
{
    pub fn new(config: ScenarioConfig, stats: S) -> ScenarioResult<Self> {
        config.validate()?;
        let ring = RingBuf::new(config.capacity)?;
        let (state, scratch_len) = match config.kind {
            ScenarioKind::Stream { total_bytes, step } => (
                ScenarioState::Stream {
                    total_bytes,
                    step,
                    produced: 0,
                    consumed: 0,
                },
                step,
            ),
            ScenarioKind::Framed { items, max_len } => (
                ScenarioState::Framed {
                    items,
                    max_len,
                    written: 0,
                    read: 0,
                },
                max_len,
            ),
            ScenarioKind::Overwrite { record, writes } => (
                ScenarioState::Overwrite {
                    record,
                    writes,
                    written: 0,
                    drained: false,
                },
                record,
            ),
        };

        tracing::debug!("scenario start: {:?}", config.kind);
        Ok(Self {
            ring,
            stats,
            state,
            scratch: vec![0u8; scratch_len],
            stream: Vec::new(),
            records: Vec::new(),
        })
    }

    /// Drives the scenario until it reports no more work.
    pub fn run(&mut self) -> ScenarioResult<()> {
        loop {
            match self.poll() {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    tracing::error!("scenario {} failed: {err}", self.name());
                    return Err(err);
                }
            }
        }
        tracing::debug!("scenario {} complete", self.name());
        Ok(())
    }

    /// Performs up to a budget of work units and reports how many were done.
    /// Zero means the scenario has finished.
    pub fn poll(&mut self) -> ScenarioResult<usize> {
        let stats = &self.stats;
        let ring = &mut self.ring;
        let scratch = &mut self.scratch;
        let stream = &mut self.stream;
        let records = &mut self.records;
        match &mut self.state {
            ScenarioState::Stream {
                total_bytes,
                step,
                produced,
                consumed,
            } => {
                if *consumed == *total_bytes {
                    return Ok(0);
                }

                let mut work = 0usize;
                while *consumed < *total_bytes && work < POLL_BUDGET {
                    if *produced < *total_bytes {
                        let want = (*step as u64).min(*total_bytes - *produced) as usize;
                        let chunk: Vec<u8> =
                            (0..want).map(|i| stream_byte(*produced + i as u64)).collect();
                        let moved = ring.put(&chunk);
                        *produced += moved as u64;
                        stats.with_stats(|s| s.bytes_in = s.bytes_in.wrapping_add(moved as u64));
                        if moved < want {
                            // Producer blocked; let the consumer catch up.
                            stats.with_stats(|s| s.stalls = s.stalls.wrapping_add(1));
                            *consumed +=
                                Self::drain_stream(ring, stats, scratch, stream, *step) as u64;
                        }
                    } else {
                        *consumed += Self::drain_stream(ring, stats, scratch, stream, *step) as u64;
                    }
                    work += 1;
                }
                Ok(work)
            }
            ScenarioState::Framed {
                items,
                max_len,
                written,
                read,
            } => {
                if *read == *items {
                    return Ok(0);
                }

                let mut work = 0usize;
                while *read < *items && work < POLL_BUDGET {
                    if *written < *items {
                        let payload = framed_payload(*written, *max_len);
                        match ring.item_put(&payload) {
                            Ok(()) => {
                                *written += 1;
                                stats.with_stats(|s| {
                                    s.items_in = s.items_in.wrapping_add(1);
                                    s.bytes_in = s.bytes_in.wrapping_add(payload.len() as u64);
                                });
                            }
                            Err(RingError::TooLarge { .. }) => {
                                stats.with_stats(|s| s.stalls = s.stalls.wrapping_add(1));
                                Self::drain_item(ring, stats, scratch, records)?;
                                *read += 1;
                            }
                            Err(err) => return Err(err.into()),
                        }
                    } else {
                        Self::drain_item(ring, stats, scratch, records)?;
                        *read += 1;
                    }
                    work += 1;
                }
                Ok(work)
            }
            ScenarioState::Overwrite {
                record,
                writes,
                written,
                drained,
            } => {
                if *drained {
                    return Ok(0);
                }

                let mut work = 0usize;
                while *written < *writes && work < POLL_BUDGET {
                    let payload = record_payload(*written, *record);
                    if ring.is_full() {
                        stats.with_stats(|s| s.evictions = s.evictions.wrapping_add(1));
                    }
                    ring.put_overwrite(&payload)?;
                    *written += 1;
                    stats.with_stats(|s| {
                        s.items_in = s.items_in.wrapping_add(1);
                        s.bytes_in = s.bytes_in.wrapping_add(payload.len() as u64);
                    });
                    work += 1;
                }

                if *written == *writes {
                    while ring.used_space() >= *record {
                        ring.get_all(&mut scratch[..*record])?;
                        records.push(scratch[..*record].to_vec());
                        stats.with_stats(|s| {
                            s.items_out = s.items_out.wrapping_add(1);
                            s.bytes_out = s.bytes_out.wrapping_add(*record as u64);
                        });
                        work += 1;
                    }
                    *drained = true;
                }
                Ok(work)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self.state {
            ScenarioState::Stream { .. } => "stream",
            ScenarioState::Framed { .. } => "framed",
            ScenarioState::Overwrite { .. } => "overwrite",
        }
    }

    /// Borrowed view of everything the scenario drained, for verification.
    pub fn drain_report(&self) -> DrainReport<'_> {
        DrainReport {
            stream: &self.stream,
            records: &self.records,
        }
    }

    pub fn status(&self) -> RingStatus {
        self.ring.status()
    }

    fn drain_stream(
        ring: &mut RingBuf,
        stats: &S,
        scratch: &mut [u8],
        sink: &mut Vec<u8>,
        want: usize,
    ) -> usize {
        let take = want.min(scratch.len());
        let moved = ring.get(&mut scratch[..take]);
        sink.extend_from_slice(&scratch[..moved]);
        stats.with_stats(|s| s.bytes_out = s.bytes_out.wrapping_add(moved as u64));
        moved
    }

    fn drain_item(
        ring: &mut RingBuf,
        stats: &S,
        scratch: &mut [u8],
        records: &mut Vec<Vec<u8>>,
    ) -> ScenarioResult<()> {
        let len = ring.item_get(scratch)?;
        records.push(scratch[..len].to_vec());
        stats.with_stats(|s| {
            s.items_out = s.items_out.wrapping_add(1);
            s.bytes_out = s.bytes_out.wrapping_add(len as u64);
        });
        Ok(())
    }
}
