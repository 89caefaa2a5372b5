//! The turn engine — the phase state machine driving the world.
//!
//! EXECUTION ORDER (fixed, never reordered, never skipped):
//!   1. PlantGrowth
//!   2. Herbivores
//!   3. Carnivores
//!   4. Reproduction
//!   5. Cleanup
//!
//! RULES:
//!   - Within a phase, occupants are visited in row-major order from a
//!     snapshot taken at phase start; nothing acts twice in one phase.
//!   - All randomness flows through the engine's `SimRng`.
//!   - Phases never fail: an empty grid degrades every phase to a
//!     no-op. The only errors surface at construction time.
//!   - Execution is single-threaded and synchronous; a phase runs to
//!     completion before control returns.

use crate::behavior;
use crate::event::SimEvent;
use crate::grid::{Grid, SlotKind};
use crate::organism::Species;
use crate::position::Position;
use crate::rng::SimRng;
use crate::types::Turn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The five ordered stages of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PlantGrowth,
    Herbivores,
    Carnivores,
    Reproduction,
    Cleanup,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::PlantGrowth,
        Phase::Herbivores,
        Phase::Carnivores,
        Phase::Reproduction,
        Phase::Cleanup,
    ];

    /// The next phase in sequence, or `None` after `Cleanup`.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::PlantGrowth => Some(Phase::Herbivores),
            Phase::Herbivores => Some(Phase::Carnivores),
            Phase::Carnivores => Some(Phase::Reproduction),
            Phase::Reproduction => Some(Phase::Cleanup),
            Phase::Cleanup => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::PlantGrowth => "plant_growth",
            Phase::Herbivores => "herbivores",
            Phase::Carnivores => "carnivores",
            Phase::Reproduction => "reproduction",
            Phase::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the grid, the RNG, the turn counter, and the current-phase
/// pointer (`None` = idle, no turn in progress). Drivers call the
/// `run_*` operations; observers consume the returned events.
pub struct SimEngine {
    grid: Grid,
    rng: SimRng,
    turn: Turn,
    current_phase: Option<Phase>,
}

impl SimEngine {
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            rng: SimRng::new(seed),
            turn: 0,
            current_phase: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// `None` when idle; otherwise the phase the next step will run.
    pub fn current_phase(&self) -> Option<Phase> {
        self.current_phase
    }

    /// Reset the random stream. The grid and counters are untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    // ── Turn control ───────────────────────────────────────────

    /// Run a complete turn. If a partial turn is in progress, finish
    /// its remaining phases instead of starting a new one.
    pub fn run_full_turn(&mut self) -> Vec<SimEvent> {
        if self.current_phase.is_some() {
            return self.run_remaining_phases();
        }
        let mut events = vec![self.begin_turn()];
        self.current_phase = Some(Phase::PlantGrowth);
        while let Some(phase) = self.current_phase {
            events.push(self.execute(phase));
            self.current_phase = phase.next();
        }
        events.push(self.complete_turn());
        events
    }

    /// Run exactly one phase: the current one if mid-turn, otherwise
    /// the first phase of a fresh turn. Advances the phase pointer.
    pub fn run_next_phase(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let phase = match self.current_phase {
            Some(p) => p,
            None => {
                events.push(self.begin_turn());
                self.current_phase = Some(Phase::PlantGrowth);
                Phase::PlantGrowth
            }
        };
        events.push(self.execute(phase));
        self.current_phase = phase.next();
        if self.current_phase.is_none() {
            events.push(self.complete_turn());
        }
        events
    }

    /// Run from the current phase through `Cleanup`. No-op when idle —
    /// this never starts a new turn.
    pub fn run_remaining_phases(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        while let Some(phase) = self.current_phase {
            events.push(self.execute(phase));
            self.current_phase = phase.next();
        }
        if !events.is_empty() {
            events.push(self.complete_turn());
        }
        events
    }

    /// Run one named phase out of sequence (manual inspection). When
    /// idle this starts a turn for counter purposes; the phase pointer
    /// is left on the executed phase, never auto-advanced.
    pub fn run_single_phase(&mut self, phase: Phase) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.current_phase.is_none() {
            events.push(self.begin_turn());
        }
        self.current_phase = Some(phase);
        events.push(self.execute(phase));
        events
    }

    fn begin_turn(&mut self) -> SimEvent {
        self.turn += 1;
        log::info!("turn {} started", self.turn);
        SimEvent::TurnStarted { turn: self.turn }
    }

    fn complete_turn(&self) -> SimEvent {
        let census = self.grid.census();
        log::info!(
            "turn {} completed: {} plants, {} herbivores, {} carnivores",
            self.turn,
            census.plants,
            census.herbivores,
            census.carnivores
        );
        SimEvent::TurnCompleted {
            turn: self.turn,
            census,
        }
    }

    fn execute(&mut self, phase: Phase) -> SimEvent {
        match phase {
            Phase::PlantGrowth => self.phase_plant_growth(),
            Phase::Herbivores => self.animal_phase(Species::Herbivore),
            Phase::Carnivores => self.animal_phase(Species::Carnivore),
            Phase::Reproduction => self.phase_reproduction(),
            Phase::Cleanup => self.phase_cleanup(),
        }
        SimEvent::PhaseExecuted {
            turn: self.turn,
            phase,
            census: self.grid.census(),
        }
    }

    // ── Phases ─────────────────────────────────────────────────

    /// Every live plant grows once.
    fn phase_plant_growth(&mut self) {
        for pos in self.grid.positions() {
            if let Some(plant) = self.grid.plant_mut(pos) {
                plant.grow();
            }
        }
    }

    /// Movement/feeding pass for one animal species. Each live animal
    /// picks a destination; relocating costs 1 energy (billed before
    /// any feeding gain), and finding no destination costs 1 energy
    /// without moving.
    fn animal_phase(&mut self, species: Species) {
        let snapshot: Vec<Position> = self
            .grid
            .positions()
            .into_iter()
            .filter(|&p| {
                self.grid
                    .animal(p)
                    .is_some_and(|a| a.species() == species && a.is_alive())
            })
            .collect();

        // Cells entered during this pass; whoever is there already acted.
        let mut arrivals: HashSet<Position> = HashSet::new();

        for pos in snapshot {
            if arrivals.contains(&pos) {
                continue;
            }
            // The occupant may have been eaten earlier in this pass.
            let still_here = self
                .grid
                .animal(pos)
                .is_some_and(|a| a.species() == species && a.is_alive());
            if !still_here {
                continue;
            }

            match behavior::choose_move(&self.grid, &mut self.rng, pos, species) {
                Some(dest) => {
                    if let Some(animal) = self.grid.animal_mut(pos) {
                        animal.sub_energy(1);
                    }
                    if behavior::can_eat(species, &self.grid, dest) {
                        behavior::eat(&mut self.grid, pos, dest);
                    }
                    self.grid.move_animal(pos, dest);
                    arrivals.insert(dest);
                }
                None => {
                    // Blocked: the failed attempt still costs 1.
                    if let Some(animal) = self.grid.animal_mut(pos) {
                        animal.sub_energy(1);
                    }
                    log::debug!("{species} at {pos} blocked, -1 energy");
                }
            }
        }
    }

    /// Every live organism of every species attempts reproduction
    /// exactly once. Offspring placed this pass start below their
    /// species threshold, so they never reproduce in the same turn.
    fn phase_reproduction(&mut self) {
        let snapshot: Vec<Position> = self
            .grid
            .positions()
            .into_iter()
            .filter(|&p| !self.grid.cell(p).is_empty())
            .collect();
        for pos in snapshot {
            if behavior::try_spawn(&mut self.grid, &mut self.rng, pos, SlotKind::Plant) {
                log::debug!("plant at {pos} spawned offspring");
            }
            if behavior::try_spawn(&mut self.grid, &mut self.rng, pos, SlotKind::Animal) {
                log::debug!("animal at {pos} spawned offspring");
            }
        }
    }

    /// Remove every occupant whose energy reached 0.
    fn phase_cleanup(&mut self) {
        let removed = self.grid.sweep_dead();
        if removed > 0 {
            log::debug!("cleanup removed {removed} dead organisms");
        }
    }
}
