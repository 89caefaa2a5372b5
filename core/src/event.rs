//! Engine notifications.
//!
//! RULE: observers are passive. They receive these events after every
//! phase and every full turn, and may read the grid snapshot and
//! counters — they never mutate engine state. Textual logging goes
//! through the `log` facade alongside.

use crate::engine::Phase;
use crate::grid::Census;
use crate::types::Turn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    TurnStarted {
        turn: Turn,
    },
    /// Emitted after each phase, with a post-phase population census.
    PhaseExecuted {
        turn: Turn,
        phase: Phase,
        census: Census,
    },
    TurnCompleted {
        turn: Turn,
        census: Census,
    },
}
