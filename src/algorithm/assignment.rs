use crate::color::{Color, squared_distance};
use bitvec::prelude::*;

/// Mapping from target slot index to the source pixel placed there
///
/// A slot holds `None` only when the greedy search found the whole pool
/// exhausted and fell back to the slot's own target color. With equal-sized
/// inputs this never happens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    sources: Vec<Option<usize>>,
}

impl Assignment {
    /// Wrap per-slot source choices
    pub const fn new(sources: Vec<Option<usize>>) -> Self {
        Self { sources }
    }

    /// Build a total assignment from a permutation of source indices
    pub fn from_permutation(permutation: Vec<usize>) -> Self {
        Self {
            sources: permutation.into_iter().map(Some).collect(),
        }
    }

    /// Number of target slots
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Test if there are no target slots
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source index placed at a target slot
    pub fn source_of(&self, slot: usize) -> Option<usize> {
        self.sources.get(slot).copied().flatten()
    }

    /// Per-slot source choices
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.sources
    }

    /// Number of slots filled with their own target color
    pub fn target_color_fills(&self) -> usize {
        self.sources.iter().filter(|s| s.is_none()).count()
    }

    /// Source indices as a plain vector, if every slot received a source pixel
    pub fn to_permutation(&self) -> Option<Vec<usize>> {
        self.sources.iter().copied().collect()
    }

    /// Check that no source index appears twice and all are below `pool_size`
    pub fn is_injective(&self, pool_size: usize) -> bool {
        let mut seen = bitvec![0; pool_size];
        for &index in self.sources.iter().flatten() {
            let free = seen.get(index).is_some_and(|bit| !*bit);
            if !free {
                return false;
            }
            seen.set(index, true);
        }
        true
    }

    /// Produce the output buffer in target scan order
    ///
    /// Slots without a source pixel, or pointing outside the pool, take the
    /// target's own color.
    pub fn render(&self, source: &[Color], target: &[Color]) -> Vec<Color> {
        target
            .iter()
            .enumerate()
            .map(|(slot, &own)| {
                self.source_of(slot)
                    .and_then(|index| source.get(index).copied())
                    .unwrap_or(own)
            })
            .collect()
    }

    /// Sum of squared distances between each target color and what fills it
    pub fn total_cost(&self, source: &[Color], target: &[Color]) -> u64 {
        self.render(source, target)
            .iter()
            .zip(target)
            .map(|(&placed, &wanted)| u64::from(squared_distance(placed, wanted)))
            .sum()
    }
}
