//! Backing storage for ring buffers.
//!
//! A ring owns one fixed, contiguous byte region for its whole life.
//! Allocation prefers an anonymous `mmap`; if the mapping misses the
//! requested alignment it falls back to the heap. Callers that already own
//! storage can hand over a boxed slice instead. The unsafe surface stays
//! inside this module.

use crate::{RingError, RingResult};
use std::alloc::{alloc, alloc_zeroed, dealloc, Layout};
use std::ptr::{self, NonNull};

/// Specifies how memory in a [`Region`] should be initialised.
#[derive(Clone, Copy, Debug)]
pub enum RegionInit {
    /// Zero the entire region after allocation.
    Zeroed,
    /// Leave the region uninitialised.
    Uninitialized,
}

#[derive(Debug)]
enum Backing {
    Mapped(memmap2::MmapMut),
    Owned { ptr: NonNull<u8>, layout: Layout },
    Boxed(Box<[u8]>),
}

impl Backing {
    fn as_mut_ptr(&mut self) -> *mut u8 {
        match self {
            Backing::Mapped(map) => map.as_mut_ptr(),
            Backing::Owned { ptr, .. } => ptr.as_ptr(),
            Backing::Boxed(bytes) => bytes.as_mut_ptr(),
        }
    }

    fn as_ptr(&self) -> *const u8 {
        match self {
            Backing::Mapped(map) => map.as_ptr(),
            Backing::Owned { ptr, .. } => ptr.as_ptr(),
            Backing::Boxed(bytes) => bytes.as_ptr(),
        }
    }
}

/// Backing memory for a ring buffer.
///
/// Freshly allocated regions come from an anonymous `mmap` when the mapping
/// satisfies the requested alignment, and from the heap otherwise. A
/// caller-owned heap block can be bound directly via [`Region::from_boxed`].
#[derive(Debug)]
pub struct Region {
    len: usize,
    alignment: usize,
    backing: Backing,
}

// SAFETY: `Owned` pointers are uniquely owned by the region (allocated and
// freed here, never aliased); the other backings are plain owned buffers.
// No interior mutability anywhere.
unsafe impl Send for Region {}
unsafe impl Sync for Region {}

impl Region {
    /// Allocates a new region of `len` bytes aligned to `alignment`.
    pub fn new_aligned(len: usize, alignment: usize, init: RegionInit) -> RingResult<Self> {
        if len == 0 || alignment == 0 || !alignment.is_power_of_two() {
            return Err(RingError::AllocationFailed {
                size: len,
                alignment,
            });
        }

        if let Some(backing) = Self::mmap_backed(len, alignment, init)? {
            return Ok(Self {
                len,
                alignment,
                backing,
            });
        }

        Self::heap_backed(len, alignment, init)
    }

    /// Wraps a caller-owned heap block without copying it.
    pub fn from_boxed(bytes: Box<[u8]>) -> Self {
        Self {
            len: bytes.len(),
            alignment: 1,
            backing: Backing::Boxed(bytes),
        }
    }

    fn heap_backed(len: usize, alignment: usize, init: RegionInit) -> RingResult<Self> {
        let layout =
            Layout::from_size_align(len, alignment).map_err(|_| RingError::AllocationFailed {
                size: len,
                alignment,
            })?;

        let ptr = unsafe {
            match init {
                RegionInit::Zeroed => alloc_zeroed(layout),
                RegionInit::Uninitialized => alloc(layout),
            }
        };

        let ptr = NonNull::new(ptr).ok_or(RingError::AllocationFailed {
            size: len,
            alignment,
        })?;
        Ok(Self {
            len,
            alignment,
            backing: Backing::Owned { ptr, layout },
        })
    }

    fn mmap_backed(
        len: usize,
        alignment: usize,
        init: RegionInit,
    ) -> RingResult<Option<Backing>> {
        let mut map = memmap2::MmapOptions::new()
            .len(len)
            .map_anon()
            .map_err(|_| RingError::AllocationFailed {
                size: len,
                alignment,
            })?;

        let ptr = map.as_mut_ptr();
        if ptr as usize % alignment != 0 {
            return Ok(None);
        }

        if matches!(init, RegionInit::Zeroed) {
            // SAFETY: the anonymous mapping exposes `len` writable bytes.
            unsafe { ptr::write_bytes(ptr, 0, len) };
        }

        Ok(Some(Backing::Mapped(map)))
    }

    /// Total number of bytes managed by this region.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the region has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the alignment the region was allocated with.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// View the full region as an immutable slice.
    pub fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.backing.as_ptr(), self.len) }
    }

    /// View the full region as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.backing.as_mut_ptr(), self.len) }
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if let Backing::Owned { ptr, layout } = &self.backing {
            unsafe {
                dealloc(ptr.as_ptr(), *layout);
            }
        }
    }
}
