//! ecosim-core: a deterministic predator/prey/plant ecosystem on a
//! fixed grid.
//!
//! Each turn runs five ordered phases — plant growth, herbivores,
//! carnivores, reproduction, cleanup — over a dual-slot grid. Every
//! random decision routes through one reseedable [`rng::SimRng`], so a
//! seed fully determines a run.

pub mod behavior;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod loader;
pub mod organism;
pub mod position;
pub mod rng;
pub mod types;

pub use engine::{Phase, SimEngine};
pub use error::{SimError, SimResult};
pub use event::SimEvent;
pub use grid::{Census, Cell, Grid, NeighborFilter, SlotKind};
pub use loader::WorldConfig;
pub use organism::{Organism, Species};
pub use position::Position;
pub use rng::{SimRng, Vision, DEFAULT_SEED};
pub use types::Turn;
