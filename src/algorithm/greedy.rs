//! Bounded-window greedy assignment
//!
//! Target slots are filled one at a time in increasing index order. For each
//! slot the first `window` unused source pixels (in increasing index order)
//! are examined and the closest one wins, ties going to the lowest index.
//! The result is deterministic for identical inputs but not globally optimal:
//! early slots may consume candidates that later slots needed.

use crate::algorithm::assignment::Assignment;
use crate::algorithm::pool::SourcePool;
use crate::color::{Color, squared_distance};

/// How a single target slot was filled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPick {
    /// Best candidate within the window
    Windowed(usize),
    /// Pool exhausted, slot keeps its own target color
    TargetColor,
}

impl SlotPick {
    /// Source index placed in the slot, if any
    pub const fn source(self) -> Option<usize> {
        match self {
            Self::Windowed(index) => Some(index),
            Self::TargetColor => None,
        }
    }
}

/// Counts of each kind of slot fill
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreedyStats {
    /// Slots filled from the candidate window
    pub windowed: usize,
    /// Slots left with their own target color
    pub target_color_fills: usize,
}

impl GreedyStats {
    fn record(&mut self, pick: SlotPick) {
        match pick {
            SlotPick::Windowed(_) => self.windowed += 1,
            SlotPick::TargetColor => self.target_color_fills += 1,
        }
    }
}

/// Resumable greedy assigner
///
/// Slots are processed through [`GreedyAssigner::assign_next`], so a caller
/// can stop between any two slots and continue later without repeating or
/// skipping work.
pub struct GreedyAssigner<'a> {
    pool: SourcePool<'a>,
    target: &'a [Color],
    window: usize,
    sources: Vec<Option<usize>>,
    stats: GreedyStats,
}

impl<'a> GreedyAssigner<'a> {
    /// Prepare a fresh run with every source pixel unused
    ///
    /// A window of zero is raised to one.
    pub fn new(source: &'a [Color], target: &'a [Color], window: usize) -> Self {
        Self {
            pool: SourcePool::new(source),
            target,
            window: window.max(1),
            sources: Vec::with_capacity(target.len()),
            stats: GreedyStats::default(),
        }
    }

    /// Index of the next slot to be filled
    pub fn next_slot(&self) -> usize {
        self.sources.len()
    }

    /// Test whether every target slot has been filled
    pub fn is_finished(&self) -> bool {
        self.sources.len() >= self.target.len()
    }

    /// Fill the next target slot
    ///
    /// Returns `None` once every slot has been filled.
    ///
    /// The window skips used pixels, so it only comes up empty when no
    /// unused pixel remains anywhere in the pool. A separate scan for the
    /// first unused pixel could never find one, and the slot keeps its own
    /// target color instead.
    pub fn assign_next(&mut self) -> Option<SlotPick> {
        let wanted = self.target.get(self.sources.len()).copied()?;

        let pick = self
            .best_in_window(wanted)
            .map_or(SlotPick::TargetColor, SlotPick::Windowed);

        if let Some(index) = pick.source() {
            self.pool.mark_used(index);
        }
        self.sources.push(pick.source());
        self.stats.record(pick);
        Some(pick)
    }

    fn best_in_window(&self, wanted: Color) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for index in self.pool.candidates(self.window) {
            let Some(candidate) = self.pool.color(index) else {
                continue;
            };
            let cost = squared_distance(wanted, candidate);
            // Strict comparison keeps the lowest index on ties
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((index, cost));
                if cost == 0 {
                    break;
                }
            }
        }
        best.map(|(index, _)| index)
    }

    /// Pool state, for inspecting `used` markers
    pub const fn pool(&self) -> &SourcePool<'a> {
        &self.pool
    }

    /// Fill counts so far
    pub const fn stats(&self) -> GreedyStats {
        self.stats
    }

    /// Candidate window in effect
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Finish the run, filling any remaining slots, and return the mapping
    pub fn into_assignment(mut self) -> Assignment {
        while self.assign_next().is_some() {}
        Assignment::new(self.sources)
    }
}

/// Run the greedy algorithm over every slot in one go
pub fn greedy_assignment(source: &[Color], target: &[Color], window: usize) -> Assignment {
    GreedyAssigner::new(source, target, window).into_assignment()
}
