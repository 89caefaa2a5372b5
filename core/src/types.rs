//! Shared primitive types used across the entire simulation.

/// A turn counter value. One turn = one full pass through the five phases.
pub type Turn = u64;
