use crate::color::Color;
use bitvec::prelude::*;
use std::fmt;

/// Source pixels available to a single run, with one `used` marker each
///
/// Markers are stored in a bitset so that scanning for unused pixels skips
/// whole words of used ones at a time. Candidates are always produced in
/// increasing index order.
#[derive(Clone, Debug)]
pub struct SourcePool<'a> {
    colors: &'a [Color],
    used: BitVec,
}

impl<'a> SourcePool<'a> {
    /// Create a pool with every pixel unused
    pub fn new(colors: &'a [Color]) -> Self {
        Self {
            colors,
            used: bitvec![0; colors.len()],
        }
    }

    /// Total number of pixels in the pool
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Test if the pool holds no pixels at all
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of the pixel at `index`
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Test whether the pixel at `index` has been assigned
    ///
    /// Out-of-range indices are reported as used.
    pub fn is_used(&self, index: usize) -> bool {
        self.used.get(index).as_deref() != Some(&false)
    }

    /// Mark a pixel as assigned
    ///
    /// Returns `false` and leaves the pool unchanged if the index is out of
    /// range or the pixel was already used.
    pub fn mark_used(&mut self, index: usize) -> bool {
        if self.is_used(index) {
            return false;
        }
        self.used.set(index, true);
        true
    }

    /// Number of pixels not yet assigned
    pub fn unused_count(&self) -> usize {
        self.used.count_zeros()
    }

    /// Number of pixels already assigned
    pub fn used_count(&self) -> usize {
        self.used.count_ones()
    }

    /// Up to `window` unused pixel indices, lowest index first
    pub fn candidates(&self, window: usize) -> impl Iterator<Item = usize> + '_ {
        self.used.iter_zeros().take(window)
    }
}

impl fmt::Display for SourcePool<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SourcePool({} of {} used)",
            self.used_count(),
            self.len()
        )
    }
}
