//! Fixed-capacity byte ring buffer with a two-phase claim/acknowledge
//! protocol.
//!
//! The pieces:
//! * [`RingBuf`] – the engine: claim/ack spans, aggregate put/get/skip,
//!   all-or-none transfers, reset, and occupancy queries.
//! * [`Region`] – aligned backing storage (anonymous mmap with heap
//!   fallback, or a caller-owned boxed slice).
//! * [`RingBuf::item_put`] / [`RingBuf::item_get`] – records framed behind a
//!   2-byte little-endian length field.
//! * [`RingBuf::put_overwrite`] – circular overwrite for last-N retention.
//! * [`ClaimChunks`] / [`ReadChunks`] – streaming fixed-size chunk cursors.
//! * [`RingError`] – small error surface for construction failures and
//!   protocol violations.
//!
//! A claim reserves a contiguous span and hands it out as a slice directly
//! into storage; a later acknowledge commits some prefix of it and abandons
//! the rest, so zero-copy writers and readers work in place and `ack(0)`
//! turns any claim into a peek. Everything is synchronous and non-blocking:
//! operations move whatever fits and report the count, or fail cleanly
//! where an all-or-none guarantee applies.
//!
//! The ring is a single-owner structure — every mutating call takes
//! `&mut self`, there are no locks and no atomics. Producer/consumer pairs
//! on separate threads want an atomic SPSC queue instead; this engine is
//! for the single-threaded byte plumbing in between.

mod chunks;
mod error;
mod item;
mod overwrite;
mod region;
mod ring;

pub use chunks::{ClaimChunks, ReadChunks};
pub use error::{RingError, RingResult};
pub use item::{ITEM_LEN_PREFIX, ITEM_MAX_LEN};
pub use region::{Region, RegionInit};
pub use ring::{RingBuf, RingStatus, MAX_CAPACITY};
