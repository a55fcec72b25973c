//! Streaming cursors over fixed-size chunks of readable data.
//!
//! Both cursors walk the readable region one whole chunk at a time and stop
//! at the first span that would come back short. Ordinary loop control
//! drives them; breaking out early simply stops, leaving the rest of the
//! data where it is. [`ClaimChunks`] lends spans straight out of storage and
//! leaves acknowledgement to the caller; [`ReadChunks`] copies into a
//! caller-provided scratch buffer and consumes as it goes.

use crate::ring::RingBuf;

/// Zero-copy cursor over contiguous chunk-sized spans of readable data.
///
/// Every yielded span lies contiguous in storage. Iteration stops at the
/// first chunk that would have to straddle the physical end of the region
/// or exceed the readable bytes; a chunk ending exactly at the boundary
/// continues at offset zero. The cursor acknowledges nothing — after
/// iterating, consume with `get_ack(yielded() * chunk)` or rewind with
/// `get_ack(0)` to make the walk a pure peek.
pub struct ClaimChunks<'a> {
    ring: &'a mut RingBuf,
    chunk: usize,
    yielded: usize,
}

impl ClaimChunks<'_> {
    /// Claims and returns the next whole chunk, or `None` at the first span
    /// that would come back short.
    pub fn next(&mut self) -> Option<&[u8]> {
        if self.chunk == 0 || self.ring.get_contiguous() < self.chunk {
            return None;
        }
        let span = self.ring.get_claim(self.chunk);
        debug_assert_eq!(span.len(), self.chunk);
        self.yielded += 1;
        Some(span)
    }

    /// Number of whole chunks yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

/// Copying cursor over chunk-sized blocks of readable data.
///
/// Blocks span the physical wrap transparently, and every yielded block is
/// consumed before it is returned. Iteration ends when fewer than one whole
/// chunk remains readable; the remainder stays in the ring.
pub struct ReadChunks<'a> {
    ring: &'a mut RingBuf,
    scratch: &'a mut [u8],
    yielded: usize,
}

impl ReadChunks<'_> {
    /// Copies out and consumes the next whole chunk, or `None` when less
    /// than a full chunk remains.
    pub fn next(&mut self) -> Option<&[u8]> {
        if self.scratch.is_empty() || self.ring.used_space() < self.scratch.len() {
            return None;
        }
        let copied = self.ring.get(self.scratch);
        debug_assert_eq!(copied, self.scratch.len());
        self.yielded += 1;
        Some(self.scratch)
    }

    /// Number of whole chunks yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl RingBuf {
    /// Begins zero-copy chunked iteration over readable data. A zero
    /// `chunk` yields nothing.
    pub fn claim_chunks(&mut self, chunk: usize) -> ClaimChunks<'_> {
        ClaimChunks {
            ring: self,
            chunk,
            yielded: 0,
        }
    }

    /// Begins copying, consuming chunked iteration; the chunk size is
    /// `scratch.len()`. An empty scratch yields nothing.
    pub fn read_chunks<'a>(&'a mut self, scratch: &'a mut [u8]) -> ReadChunks<'a> {
        ReadChunks {
            ring: self,
            scratch,
            yielded: 0,
        }
    }
}
