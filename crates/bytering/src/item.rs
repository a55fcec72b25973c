//! Length-prefixed item framing.
//!
//! Variable-length records travel as a fixed 2-byte little-endian length
//! field followed by the payload, so a reader can consume exactly one record
//! without any out-of-band size agreement. Framed and raw operations must
//! not be interleaved on the same ring while data is in flight: a raw read
//! desynchronizes the framing.

use crate::ring::RingBuf;
use crate::{RingError, RingResult};

/// Size in bytes of the length field ahead of each framed item.
pub const ITEM_LEN_PREFIX: usize = 2;

/// Largest payload a framed item can carry.
pub const ITEM_MAX_LEN: usize = u16::MAX as usize;

impl RingBuf {
    /// Frames `item` behind its length field and commits the whole record,
    /// or fails leaving the ring untouched.
    ///
    /// Fails with [`RingError::TooLarge`] when the payload exceeds
    /// [`ITEM_MAX_LEN`] or the framed record exceeds current free space.
    pub fn item_put(&mut self, item: &[u8]) -> RingResult<()> {
        if item.len() > ITEM_MAX_LEN {
            return Err(RingError::TooLarge {
                requested: item.len(),
                available: ITEM_MAX_LEN,
            });
        }
        let need = ITEM_LEN_PREFIX + item.len();
        let free = self.free_space();
        if need > free {
            return Err(RingError::TooLarge {
                requested: need,
                available: free,
            });
        }

        let prefix = (item.len() as u16).to_le_bytes();
        let moved = self.put(&prefix) + self.put(item);
        debug_assert_eq!(moved, need);
        Ok(())
    }

    /// Reads one framed item into `out` and returns its length.
    ///
    /// Fails with [`RingError::WouldBlock`] when the ring is empty, and with
    /// [`RingError::TooLarge`] when `out` is shorter than the item; in both
    /// cases nothing is consumed, so the caller can retry with a larger
    /// buffer. Since the length is unknown before the read, `out` should be
    /// sized for the largest expected item (up to [`ITEM_MAX_LEN`] bytes).
    pub fn item_get(&mut self, out: &mut [u8]) -> RingResult<usize> {
        if self.is_empty() {
            return Err(RingError::WouldBlock {
                requested: ITEM_LEN_PREFIX,
                available: 0,
            });
        }

        let len = self.peek_len() as usize;
        if len > out.len() {
            return Err(RingError::TooLarge {
                requested: len,
                available: out.len(),
            });
        }

        let skipped = self.skip(ITEM_LEN_PREFIX);
        let copied = self.get(&mut out[..len]);
        debug_assert_eq!(skipped + copied, ITEM_LEN_PREFIX + len);
        Ok(len)
    }

    /// Reads the length field without consuming it. The field is always
    /// complete when the ring is non-empty, because framed puts are
    /// all-or-none; it may still straddle the physical wrap, hence the
    /// claim loop.
    fn peek_len(&mut self) -> u16 {
        let mut prefix = [0u8; ITEM_LEN_PREFIX];
        let mut filled = 0;
        while filled < ITEM_LEN_PREFIX {
            let span = self.get_claim(ITEM_LEN_PREFIX - filled);
            debug_assert!(!span.is_empty(), "framed ring holds a whole length field");
            prefix[filled..filled + span.len()].copy_from_slice(span);
            filled += span.len();
        }
        self.rewind_get();
        u16::from_le_bytes(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(capacity: usize) -> RingBuf {
        RingBuf::new(capacity).expect("create ring")
    }

    #[test]
    fn item_round_trips() {
        let mut buf = ring(16);
        let sample = 123.456f32.to_le_bytes();
        buf.item_put(&sample).unwrap();
        assert_eq!(buf.used_space(), ITEM_LEN_PREFIX + sample.len());

        let mut out = [0u8; 16];
        let len = buf.item_get(&mut out).unwrap();
        assert_eq!(len, sample.len());
        assert_eq!(&out[..len], &sample);
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_ring_reports_would_block() {
        let mut buf = ring(8);
        let mut out = [0u8; 8];
        assert!(matches!(
            buf.item_get(&mut out),
            Err(RingError::WouldBlock { .. })
        ));
    }

    #[test]
    fn zero_length_item_round_trips() {
        let mut buf = ring(8);
        buf.item_put(&[]).unwrap();
        assert_eq!(buf.used_space(), ITEM_LEN_PREFIX);
        let mut out = [0u8; 4];
        assert_eq!(buf.item_get(&mut out).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn item_exceeding_free_space_is_rejected() {
        let mut buf = ring(8);
        let before = buf.status();
        let err = buf.item_put(&[0u8; 7]).unwrap_err();
        assert!(matches!(
            err,
            RingError::TooLarge {
                requested: 9,
                available: 8
            }
        ));
        assert_eq!(buf.status(), before);
    }

    #[test]
    fn item_exceeding_prefix_range_is_rejected() {
        let mut buf = ring(1 << 17);
        let oversized = vec![0u8; ITEM_MAX_LEN + 1];
        assert!(matches!(
            buf.item_put(&oversized),
            Err(RingError::TooLarge {
                requested: 65536,
                available: ITEM_MAX_LEN
            })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn undersized_destination_leaves_item_intact() {
        let mut buf = ring(32);
        buf.item_put(b"0123456789").unwrap();

        let mut small = [0u8; 4];
        let err = buf.item_get(&mut small).unwrap_err();
        assert!(matches!(
            err,
            RingError::TooLarge {
                requested: 10,
                available: 4
            }
        ));
        assert_eq!(buf.used_space(), 12);

        let mut out = [0u8; 10];
        assert_eq!(buf.item_get(&mut out).unwrap(), 10);
        assert_eq!(&out, b"0123456789");
    }

    /// The length field may straddle the physical end of the region; the
    /// peek has to reassemble it from two spans.
    #[test]
    fn wrapped_length_field_is_reassembled() {
        let mut buf = ring(8);
        // Park the cursors at offset 7 so the next prefix spans 7 -> 0.
        assert_eq!(buf.put(&[0u8; 7]), 7);
        assert_eq!(buf.skip(7), 7);

        buf.item_put(&[0xAB, 0xCD, 0xEF]).unwrap();
        let mut out = [0u8; 8];
        assert_eq!(buf.item_get(&mut out).unwrap(), 3);
        assert_eq!(&out[..3], &[0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn items_preserve_fifo_order() {
        let mut buf = ring(64);
        for len in [0usize, 1, 5, 9] {
            let payload: Vec<u8> = (0..len as u8).collect();
            buf.item_put(&payload).unwrap();
        }
        let mut out = [0u8; 16];
        for len in [0usize, 1, 5, 9] {
            assert_eq!(buf.item_get(&mut out).unwrap(), len);
            let expected: Vec<u8> = (0..len as u8).collect();
            assert_eq!(&out[..len], expected.as_slice());
        }
        assert!(buf.is_empty());
    }
}
