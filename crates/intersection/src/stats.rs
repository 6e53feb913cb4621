//! Toggling loop statistics.

use crate::phase::Phase;
use std::time::{Duration, Instant};

/// Counters maintained by the toggling loop.
///
/// Cycle lengths are measured end-to-end between two consecutive
/// publications (the first from loop start).
#[derive(Clone, Debug, Default)]
pub struct LightStats {
    /// Total phase changes.
    pub toggles: u64,
    /// Changes to green.
    pub greens: u64,
    /// Changes to red.
    pub reds: u64,
    /// Shortest measured cycle.
    pub shortest_cycle: Option<Duration>,
    /// Longest measured cycle.
    pub longest_cycle: Option<Duration>,
    /// When the most recent change was published.
    pub last_toggle: Option<Instant>,
}

impl LightStats {
    /// Records one toggle to `phase` after a cycle of `cycle`.
    pub(crate) fn record(&mut self, phase: Phase, cycle: Duration, at: Instant) {
        self.toggles += 1;
        match phase {
            Phase::Green => self.greens += 1,
            Phase::Red => self.reds += 1,
        }
        self.shortest_cycle = Some(self.shortest_cycle.map_or(cycle, |s| s.min(cycle)));
        self.longest_cycle = Some(self.longest_cycle.map_or(cycle, |l| l.max(cycle)));
        self.last_toggle = Some(at);
    }
}
