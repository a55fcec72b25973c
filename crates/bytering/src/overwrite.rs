//! Circular overwrite: drop the oldest bytes to make room for new ones.

use crate::ring::RingBuf;
use crate::{RingError, RingResult};

impl RingBuf {
    /// Writes `data` even when the ring is full by first discarding exactly
    /// `data.len()` of the oldest bytes. Fails with [`RingError::TooLarge`]
    /// — without partial writes and without further eviction — when the
    /// record still does not fit.
    ///
    /// Eviction triggers only on a completely full ring and runs at most
    /// once per call. Writers that keep every record the same size and make
    /// capacity a multiple of it get lossless last-N retention; any other
    /// layout is rejected here as soon as free space stops lining up with
    /// record boundaries.
    pub fn put_overwrite(&mut self, data: &[u8]) -> RingResult<()> {
        if self.is_full() {
            self.skip(data.len());
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(capacity: usize) -> RingBuf {
        RingBuf::new(capacity).expect("create ring")
    }

    /// A ring sized for two records keeps exactly the last two of however
    /// many were pushed.
    #[test]
    fn retains_the_last_records() {
        let mut buf = ring(2 * 4);
        for value in 1..=10 {
            buf.put_overwrite(&(value as f32).to_le_bytes()).unwrap();
        }
        assert!(buf.is_full());

        let mut out = [0u8; 4];
        buf.get_all(&mut out).unwrap();
        assert_eq!(f32::from_le_bytes(out), 9.0);
        buf.get_all(&mut out).unwrap();
        assert_eq!(f32::from_le_bytes(out), 10.0);
        assert!(buf.is_empty());
    }

    #[test]
    fn no_eviction_below_capacity() {
        let mut buf = ring(12);
        for value in [1u32, 2, 3] {
            buf.put_overwrite(&value.to_le_bytes()).unwrap();
        }
        // All three records still present: nothing was evicted on the way.
        let mut out = [0u8; 4];
        for expected in [1u32, 2, 3] {
            buf.get_all(&mut out).unwrap();
            assert_eq!(u32::from_le_bytes(out), expected);
        }
    }

    #[test]
    fn rejects_record_larger_than_capacity() {
        let mut buf = ring(8);
        let err = buf.put_overwrite(&[0u8; 12]).unwrap_err();
        assert!(matches!(
            err,
            RingError::TooLarge {
                requested: 12,
                available: 8
            }
        ));
        assert!(buf.is_empty());
    }

    /// With capacity not a multiple of the record size the ring fills to a
    /// remainder smaller than one record; the write is rejected instead of
    /// evicting a second time.
    #[test]
    fn rejects_when_free_space_misses_record_boundary() {
        let mut buf = ring(10);
        buf.put_overwrite(&[1u8; 4]).unwrap();
        buf.put_overwrite(&[2u8; 4]).unwrap();

        let err = buf.put_overwrite(&[3u8; 4]).unwrap_err();
        assert!(matches!(
            err,
            RingError::TooLarge {
                requested: 4,
                available: 2
            }
        ));
        assert_eq!(buf.used_space(), 8);
    }
}
