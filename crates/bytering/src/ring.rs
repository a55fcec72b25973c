//! Fixed-capacity byte ring with a two-phase claim/acknowledge protocol.
//!
//! Cursor model (wrapping counters over an unbounded logical stream; the
//! physical offset of an index is `index - base` after normalization):
//!
//! ```text
//!  get.tail      get.head       put.tail       put.head
//!     |  read claim  |  committed   |  write claim  |    free ...
//! ----+--------------+--------------+---------------+---------->
//! ```
//!
//! A claim reserves a contiguous span and hands it out as a slice; an
//! acknowledge commits some prefix of the claim and abandons the rest. The
//! aggregate operations loop the claim engine to move blocks that wrap
//! around the physical end of the region, and commit in one step.

use crate::region::{Region, RegionInit};
use crate::{RingError, RingResult};

/// Largest supported ring capacity in bytes.
///
/// Every difference between two cursors must stay in `[0, capacity]` for the
/// wrapping arithmetic to be unambiguous, so capacity is capped at half the
/// counter range. This is also the maximum byte length of a Rust slice.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

const REGION_ALIGN: usize = 64;

/// One side of the ring's activity: the cursor triple for either the put
/// (write) or get (read) direction.
///
/// `head` marks claimed progress, `tail` committed progress, and `base`
/// slides forward one buffer length at a time as `tail` laps the region.
/// All three wrap modulo `usize::MAX + 1`.
#[derive(Clone, Copy, Debug, Default)]
struct Span {
    base: usize,
    head: usize,
    tail: usize,
}

impl Span {
    fn at(base: usize) -> Self {
        Self {
            base,
            head: base,
            tail: base,
        }
    }

    /// Bytes claimed but not yet acknowledged.
    fn claimed(&self) -> usize {
        self.head.wrapping_sub(self.tail)
    }
}

/// Reserves up to `want` bytes from `span`, clamped so the grant never
/// crosses the physical end of the region and never exceeds `limit`.
/// Returns the physical offset and the granted length.
fn claim(span: &mut Span, capacity: usize, want: usize, limit: usize) -> (usize, usize) {
    let mut base = span.base;
    let mut head = span.head.wrapping_sub(base);
    if head >= capacity {
        base = base.wrapping_add(capacity);
        head -= capacity;
    }
    let granted = want.min(capacity - head).min(limit);
    debug_assert_eq!(head, span.head.wrapping_sub(base));
    span.head = span.head.wrapping_add(granted);
    (head, granted)
}

/// Commits `len` claimed bytes and abandons the rest of the claim. The
/// caller guarantees `len` does not exceed the outstanding claim.
fn commit(span: &mut Span, capacity: usize, len: usize) {
    debug_assert!(len <= span.claimed(), "commit within the outstanding claim");
    span.tail = span.tail.wrapping_add(len);
    span.head = span.tail;
    if span.tail.wrapping_sub(span.base) >= capacity {
        span.base = span.base.wrapping_add(capacity);
    }
}

fn ack(span: &mut Span, capacity: usize, len: usize) -> RingResult<()> {
    let claimed = span.claimed();
    if len > claimed {
        return Err(RingError::AckExceedsClaim {
            requested: len,
            claimed,
        });
    }
    commit(span, capacity, len);
    Ok(())
}

/// Point-in-time snapshot of ring occupancy, for diagnostics and invariant
/// checks. `used + free + put_claimed + get_claimed == capacity` always.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingStatus {
    pub capacity: usize,
    pub used: usize,
    pub free: usize,
    pub put_claimed: usize,
    pub get_claimed: usize,
}

/// Fixed-capacity byte ring buffer for one producer and one consumer.
///
/// Every operation is synchronous and non-blocking: it moves as many bytes
/// as currently possible and reports the count, or fails without side
/// effects where an all-or-none guarantee applies. The ring performs no
/// locking; exclusive access is enforced structurally by `&mut self`.
pub struct RingBuf {
    region: Region,
    capacity: usize,
    put: Span,
    get: Span,
}

impl RingBuf {
    /// Creates a ring with freshly allocated, zeroed backing storage.
    pub fn new(capacity: usize) -> RingResult<Self> {
        Self::checked_capacity(capacity)?;
        let region = Region::new_aligned(capacity, REGION_ALIGN, RegionInit::Zeroed)?;
        Ok(Self::from_region(region))
    }

    /// Binds caller-owned heap storage; the entire slice becomes capacity.
    pub fn with_storage(storage: Box<[u8]>) -> RingResult<Self> {
        Self::checked_capacity(storage.len())?;
        Ok(Self::from_region(Region::from_boxed(storage)))
    }

    fn checked_capacity(capacity: usize) -> RingResult<()> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(RingError::InvalidCapacity {
                requested: capacity,
                maximum: MAX_CAPACITY,
            });
        }
        Ok(())
    }

    fn from_region(region: Region) -> Self {
        let capacity = region.len();
        Self {
            region,
            capacity,
            put: Span::default(),
            get: Span::default(),
        }
    }

    /// Reinitializes both spans to `{base, base, base}`, logically clearing
    /// the buffer. Only cursors move; stored bytes are left as they are.
    /// Any `base` is valid — the counters wrap.
    pub fn reset(&mut self, base: usize) {
        self.put = Span::at(base);
        self.get = Span::at(base);
    }

    /// Total data capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes committed by the put side and not yet claimed by the get side.
    pub fn used_space(&self) -> usize {
        self.put.tail.wrapping_sub(self.get.head)
    }

    /// Bytes neither committed nor claimed by the put side.
    pub fn free_space(&self) -> usize {
        self.capacity - self.put.head.wrapping_sub(self.get.tail)
    }

    /// True when no committed bytes remain to read.
    pub fn is_empty(&self) -> bool {
        self.used_space() == 0
    }

    /// True when no free bytes remain to write.
    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    /// Outstanding (claimed, unacknowledged) bytes on the put side.
    pub fn put_claimed(&self) -> usize {
        self.put.claimed()
    }

    /// Outstanding (claimed, unacknowledged) bytes on the get side.
    pub fn get_claimed(&self) -> usize {
        self.get.claimed()
    }

    /// Captures a point-in-time view of the ring's cursors.
    pub fn status(&self) -> RingStatus {
        RingStatus {
            capacity: self.capacity,
            used: self.used_space(),
            free: self.free_space(),
            put_claimed: self.put.claimed(),
            get_claimed: self.get.claimed(),
        }
    }

    /// Reserves up to `want` contiguous bytes for writing and returns them
    /// as a mutable slice, possibly shorter than requested and possibly
    /// empty — truncation is not an error. Grants never cross the physical
    /// end of the region and never exceed free space. Repeated claims
    /// accumulate until the next [`put_ack`](Self::put_ack).
    pub fn put_claim(&mut self, want: usize) -> &mut [u8] {
        let limit = self.free_space();
        let (offset, granted) = claim(&mut self.put, self.capacity, want, limit);
        &mut self.region.as_mut_slice()[offset..offset + granted]
    }

    /// Commits `len` claimed bytes, making them readable, and abandons any
    /// remainder of the outstanding claim — `put_ack(0)` rolls the whole
    /// claim back. Fails with [`RingError::AckExceedsClaim`] (state
    /// unchanged) when `len` exceeds the claim.
    pub fn put_ack(&mut self, len: usize) -> RingResult<()> {
        ack(&mut self.put, self.capacity, len)
    }

    /// Reserves up to `want` contiguous readable bytes and returns them as a
    /// slice; the same clamping and accumulation rules as
    /// [`put_claim`](Self::put_claim), bounded by used space.
    pub fn get_claim(&mut self, want: usize) -> &[u8] {
        let limit = self.used_space();
        let (offset, granted) = claim(&mut self.get, self.capacity, want, limit);
        &self.region.as_slice()[offset..offset + granted]
    }

    /// Consumes `len` claimed bytes, freeing their space, and abandons any
    /// remainder of the outstanding claim — `get_ack(0)` turns a claim into
    /// a pure peek. Fails with [`RingError::AckExceedsClaim`] (state
    /// unchanged) when `len` exceeds the claim.
    pub fn get_ack(&mut self, len: usize) -> RingResult<()> {
        ack(&mut self.get, self.capacity, len)
    }

    /// Copies as much of `data` as fits, wrapping across the physical
    /// boundary as needed, and commits the moved amount in one step.
    /// Returns the number of bytes moved, which may be less than
    /// `data.len()`. Must not be mixed with an open put claim.
    pub fn put(&mut self, data: &[u8]) -> usize {
        debug_assert_eq!(self.put.claimed(), 0, "aggregate put over an open claim");
        let mut moved = 0;
        while moved < data.len() {
            let span = self.put_claim(data.len() - moved);
            if span.is_empty() {
                break;
            }
            let next = moved + span.len();
            span.copy_from_slice(&data[moved..next]);
            moved = next;
        }
        commit(&mut self.put, self.capacity, moved);
        moved
    }

    /// Copies up to `out.len()` readable bytes into `out` and consumes
    /// them. Returns the number of bytes moved; the rest of `out` is left
    /// untouched. Must not be mixed with an open get claim.
    pub fn get(&mut self, out: &mut [u8]) -> usize {
        debug_assert_eq!(self.get.claimed(), 0, "aggregate get over an open claim");
        let mut moved = 0;
        while moved < out.len() {
            let span = self.get_claim(out.len() - moved);
            if span.is_empty() {
                break;
            }
            let next = moved + span.len();
            out[moved..next].copy_from_slice(span);
            moved = next;
        }
        commit(&mut self.get, self.capacity, moved);
        moved
    }

    /// Consumes up to `len` readable bytes without copying them anywhere (a
    /// discard read). Returns the number of bytes dropped.
    pub fn skip(&mut self, len: usize) -> usize {
        debug_assert_eq!(self.get.claimed(), 0, "skip over an open claim");
        let mut moved = 0;
        while moved < len {
            let granted = self.get_claim(len - moved).len();
            if granted == 0 {
                break;
            }
            moved += granted;
        }
        commit(&mut self.get, self.capacity, moved);
        moved
    }

    /// All-or-none put: moves every byte of `data` or fails with
    /// [`RingError::TooLarge`] leaving the ring untouched.
    pub fn put_all(&mut self, data: &[u8]) -> RingResult<()> {
        let free = self.free_space();
        if data.len() > free {
            return Err(RingError::TooLarge {
                requested: data.len(),
                available: free,
            });
        }
        let moved = self.put(data);
        debug_assert_eq!(moved, data.len());
        Ok(())
    }

    /// All-or-none get: fills `out` completely or fails with
    /// [`RingError::WouldBlock`] consuming nothing.
    pub fn get_all(&mut self, out: &mut [u8]) -> RingResult<()> {
        let used = self.used_space();
        if out.len() > used {
            return Err(RingError::WouldBlock {
                requested: out.len(),
                available: used,
            });
        }
        let moved = self.get(out);
        debug_assert_eq!(moved, out.len());
        Ok(())
    }

    /// Abandons the outstanding get claim. Infallible form of `get_ack(0)`
    /// for internal peek paths.
    pub(crate) fn rewind_get(&mut self) {
        commit(&mut self.get, self.capacity, 0);
    }

    /// Largest span a get claim could return right now without wrapping.
    pub(crate) fn get_contiguous(&self) -> usize {
        let mut head = self.get.head.wrapping_sub(self.get.base);
        if head >= self.capacity {
            head -= self.capacity;
        }
        (self.capacity - head).min(self.used_space())
    }
}
