//! Species and the shared energy-pool contract.
//!
//! The closed species set is a tagged variant; per-species behavior is
//! dispatched by matching on the tag. Life state derives from energy —
//! `alive ⇔ energy > 0` — never a separate flag that could desync.

use crate::rng::Vision;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Plant,
    Herbivore,
    Carnivore,
}

impl Species {
    /// Species-bounded energy maximum.
    pub fn max_energy(self) -> u32 {
        match self {
            Species::Plant => 3,
            Species::Herbivore => 10,
            Species::Carnivore => 20,
        }
    }

    /// Energy a freshly reproduced offspring starts with.
    pub fn offspring_energy(self) -> u32 {
        match self {
            Species::Plant => 1,
            Species::Herbivore => 3,
            Species::Carnivore => 5,
        }
    }

    /// Minimum energy for reproduction eligibility. Plants must be
    /// saturated at their maximum.
    pub fn reproduction_threshold(self) -> u32 {
        match self {
            Species::Plant => 3,
            Species::Herbivore => 7,
            Species::Carnivore => 14,
        }
    }

    /// Perception pattern. Plants are stationary and never perceive;
    /// their vision is only used for the cardinal spawn search.
    pub fn vision(self) -> Vision {
        match self {
            Species::Plant => Vision::Cross,
            Species::Herbivore => Vision::Ring3,
            Species::Carnivore => Vision::Ring5,
        }
    }

    pub fn is_animal(self) -> bool {
        !matches!(self, Species::Plant)
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Plant => "plant",
            Species::Herbivore => "herbivore",
            Species::Carnivore => "carnivore",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single organism: a species tag and an energy pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    species: Species,
    energy: u32,
}

impl Organism {
    /// New organism with energy clamped to `[1, species max]`. A
    /// just-created organism is never dead.
    pub fn new(species: Species, energy: u32) -> Self {
        Self {
            species,
            energy: energy.clamp(1, species.max_energy()),
        }
    }

    /// Default-energy offspring of the same species, not yet placed.
    pub fn reproduce(&self) -> Organism {
        Organism::new(self.species, self.species.offspring_energy())
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    /// Energy transferred to an eater on consumption: the current pool.
    pub fn nutrition(&self) -> u32 {
        self.energy
    }

    /// Add energy, clamped at the species maximum even if the delta
    /// overshoots.
    pub fn add_energy(&mut self, amount: u32) {
        self.energy = (self.energy + amount).min(self.species.max_energy());
    }

    /// Subtract energy, floored at 0. Hitting 0 is death.
    pub fn sub_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    /// Alive and at or over the species threshold. Space is not
    /// checked; that is the spawn step's concern.
    pub fn can_reproduce(&self) -> bool {
        self.is_alive() && self.energy >= self.species.reproduction_threshold()
    }

    /// One growth step: +1 energy up to the maximum. Dead organisms
    /// never grow.
    pub fn grow(&mut self) {
        if self.is_alive() {
            self.add_energy(1);
        }
    }

    /// Parent energy reset after a successful spawn: plants reset to 1,
    /// animals keep `energy − energy/2` (integer halve).
    pub fn apply_reproduction_cost(&mut self) {
        match self.species {
            Species::Plant => self.energy = 1,
            Species::Herbivore | Species::Carnivore => self.energy -= self.energy / 2,
        }
    }
}
