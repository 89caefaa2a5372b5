//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the single `SimRng` owned by the
//! engine. Every movement, reproduction-slot, and tie-break draw goes
//! through here; that single chokepoint is what makes whole-run
//! determinism from a seed possible and testable.

use crate::error::{SimError, SimResult};
use crate::grid::{Grid, NeighborFilter};
use crate::position::Position;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub const DEFAULT_SEED: u64 = 42;

/// The three perception patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vision {
    /// 4-way cardinal cross.
    Cross,
    /// Full 3x3 ring (8 cells).
    Ring3,
    /// Full 5x5 ring (24 cells).
    Ring5,
}

impl Vision {
    /// Validate a numeric vision level: 1 = cross, 2 = 3x3, 3 = 5x5.
    pub fn from_level(level: u8) -> SimResult<Self> {
        match level {
            1 => Ok(Vision::Cross),
            2 => Ok(Vision::Ring3),
            3 => Ok(Vision::Ring5),
            other => Err(SimError::InvalidVisionLevel(other)),
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Vision::Cross => 1,
            Vision::Ring3 => 2,
            Vision::Ring5 => 3,
        }
    }
}

/// In-bounds positions of the vision pattern around `position`, in
/// scan order (cross: up, down, left, right; rings: dx outer, dy
/// inner, negatives first, center skipped). Clipped at the grid edge,
/// no wraparound. Every "first found" tie-break in the behaviors uses
/// this order.
pub fn neighborhood(position: Position, grid: &Grid, vision: Vision) -> Vec<Position> {
    let mut neighbors = Vec::new();
    match vision {
        Vision::Cross => {
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                push_in_bounds(position, grid, dx, dy, &mut neighbors);
            }
        }
        Vision::Ring3 | Vision::Ring5 => {
            let radius = if vision == Vision::Ring3 { 1 } else { 2 };
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    push_in_bounds(position, grid, dx, dy, &mut neighbors);
                }
            }
        }
    }
    neighbors
}

/// `neighborhood` with a caller-supplied numeric level, validated.
pub fn neighborhood_level(position: Position, grid: &Grid, level: u8) -> SimResult<Vec<Position>> {
    Ok(neighborhood(position, grid, Vision::from_level(level)?))
}

fn push_in_bounds(center: Position, grid: &Grid, dx: i32, dy: i32, out: &mut Vec<Position>) {
    if let Some(pos) = center.offset(dx, dy) {
        if grid.in_bounds(pos) {
            out.push(pos);
        }
    }
}

/// Reseedable deterministic pseudo-random source. One instance per
/// simulation; the engine owns it and threads it through every
/// behavior call, so independent simulations never share a stream.
pub struct SimRng {
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Reset the stream. Same seed ⇒ identical future sequence,
    /// independent of anything drawn before.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = Pcg64Mcg::seed_from_u64(seed);
    }

    /// Roll an integer in `[0, bound)`. `bound` must be positive.
    pub fn next_int(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be > 0");
        (self.inner.next_u64() % bound as u64) as usize
    }

    pub fn next_bool(&mut self) -> bool {
        self.inner.next_u64() & 1 == 1
    }

    /// Roll a float in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: always false for `p <= 0`, always true for
    /// `p >= 1`, and consumes a draw only in between.
    pub fn chance(&mut self, p: f64) -> bool {
        p > 0.0 && (p >= 1.0 || self.next_f64() < p)
    }

    /// Uniform pick; `None` on an empty slice (no draw consumed).
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.next_int(items.len())])
    }

    /// In-place Fisher–Yates shuffle. Tolerant of empty and
    /// single-element slices (no draws, never fails).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(i + 1);
            items.swap(i, j);
        }
    }

    /// Uniform pick among the in-vision neighbors whose cell matches
    /// `filter`; `None` when nothing matches.
    pub fn random_neighbor(
        &mut self,
        position: Position,
        grid: &Grid,
        vision: Vision,
        filter: NeighborFilter,
    ) -> Option<Position> {
        let candidates: Vec<Position> = neighborhood(position, grid, vision)
            .into_iter()
            .filter(|&p| grid.cell(p).matches(filter))
            .collect();
        self.choose(&candidates).copied()
    }
}
