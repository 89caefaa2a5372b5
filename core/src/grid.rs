//! The world grid: a fixed-size 2D array of dual-slot cells.
//!
//! RULES:
//!   - Every position holds exactly one cell, created up front.
//!   - A cell holds at most one animal and at most one plant,
//!     independently. No two live organisms share a slot.
//!   - The grid exclusively owns its cells and their occupants.
//!     Organisms never hold a back-reference to their cell; phases
//!     track positions by value.

use crate::error::{SimError, SimResult};
use crate::organism::{Organism, Species};
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// The two occupant slots of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Animal,
    Plant,
}

impl SlotKind {
    pub fn name(self) -> &'static str {
        match self {
            SlotKind::Animal => "animal",
            SlotKind::Plant => "plant",
        }
    }
}

/// Criteria for neighbor selection based on cell contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborFilter {
    /// No plant and no animal.
    Empty,
    /// Animal slot free (a plant may be present).
    EmptyAnimal,
    /// Plant slot free (an animal may be present).
    EmptyPlant,
    /// At least one occupant of either kind.
    Organism,
    Plant,
    Animal,
    Herbivore,
    Carnivore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    animal: Option<Organism>,
    plant: Option<Organism>,
}

impl Cell {
    pub fn animal(&self) -> Option<&Organism> {
        self.animal.as_ref()
    }

    pub fn plant(&self) -> Option<&Organism> {
        self.plant.as_ref()
    }

    pub fn has_animal(&self) -> bool {
        self.animal.is_some()
    }

    pub fn has_plant(&self) -> bool {
        self.plant.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.animal.is_none() && self.plant.is_none()
    }

    fn animal_is(&self, species: Species) -> bool {
        self.animal.as_ref().is_some_and(|a| a.species() == species)
    }

    pub fn matches(&self, filter: NeighborFilter) -> bool {
        match filter {
            NeighborFilter::Empty => self.is_empty(),
            NeighborFilter::EmptyAnimal => self.animal.is_none(),
            NeighborFilter::EmptyPlant => self.plant.is_none(),
            NeighborFilter::Organism => self.animal.is_some() || self.plant.is_some(),
            NeighborFilter::Plant => self.plant.is_some(),
            NeighborFilter::Animal => self.animal.is_some(),
            NeighborFilter::Herbivore => self.animal_is(Species::Herbivore),
            NeighborFilter::Carnivore => self.animal_is(Species::Carnivore),
        }
    }
}

/// Live-organism counts from a row-major scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.plants + self.herbivores + self.carnivores
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Fixed `width × height` world. Dimensions are set once at
/// construction; every cell exists from the start. No wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> SimResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x() < self.width && pos.y() < self.height
    }

    fn index(&self, pos: Position) -> usize {
        // Row-major indexing would alias a neighboring cell for some
        // out-of-bounds positions, so this must hold in release too.
        assert!(
            self.in_bounds(pos),
            "position {pos} out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        (pos.y() * self.width + pos.x()) as usize
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let i = self.index(pos);
        &mut self.cells[i]
    }

    // ── Occupants ──────────────────────────────────────────────

    pub fn animal(&self, pos: Position) -> Option<&Organism> {
        self.cell(pos).animal.as_ref()
    }

    pub fn plant(&self, pos: Position) -> Option<&Organism> {
        self.cell(pos).plant.as_ref()
    }

    pub fn animal_mut(&mut self, pos: Position) -> Option<&mut Organism> {
        self.cell_mut(pos).animal.as_mut()
    }

    pub fn plant_mut(&mut self, pos: Position) -> Option<&mut Organism> {
        self.cell_mut(pos).plant.as_mut()
    }

    /// Place an organism into the slot matching its species kind.
    /// Fails with `SlotOccupied` if that slot already holds one.
    pub fn place(&mut self, pos: Position, organism: Organism) -> SimResult<()> {
        let kind = if organism.species().is_animal() {
            SlotKind::Animal
        } else {
            SlotKind::Plant
        };
        let occupied = match kind {
            SlotKind::Animal => self.cell(pos).animal.is_some(),
            SlotKind::Plant => self.cell(pos).plant.is_some(),
        };
        if occupied {
            return Err(SimError::SlotOccupied {
                kind: kind.name(),
                x: pos.x(),
                y: pos.y(),
            });
        }
        match kind {
            SlotKind::Animal => self.cell_mut(pos).animal = Some(organism),
            SlotKind::Plant => self.cell_mut(pos).plant = Some(organism),
        }
        Ok(())
    }

    pub fn remove_animal(&mut self, pos: Position) -> Option<Organism> {
        self.cell_mut(pos).animal.take()
    }

    pub fn remove_plant(&mut self, pos: Position) -> Option<Organism> {
        self.cell_mut(pos).plant.take()
    }

    /// Relocate the animal at `from` into the free animal slot at `to`.
    /// Callers consume any prey at the destination first.
    pub fn move_animal(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        if let Some(animal) = self.cell_mut(from).animal.take() {
            debug_assert!(
                self.cell(to).animal.is_none(),
                "destination animal slot at {to} occupied"
            );
            self.cell_mut(to).animal = Some(animal);
        }
    }

    // ── Iteration ──────────────────────────────────────────────

    /// All positions in row-major order. Phases snapshot this once so
    /// organisms moved mid-pass are not revisited.
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(Position::from_xy(x, y));
            }
        }
        out
    }

    /// Cardinal (4-way) or diagonal-inclusive (8-way) neighbor
    /// positions, clipped to the grid bounds.
    pub fn neighbors(&self, pos: Position, include_diagonals: bool) -> Vec<Position> {
        const CARDINAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const WITH_DIAGONALS: [(i32, i32); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        let deltas: &[(i32, i32)] = if include_diagonals {
            &WITH_DIAGONALS
        } else {
            &CARDINAL
        };
        deltas
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    // ── Maintenance ────────────────────────────────────────────

    /// Live-organism counts per species.
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in &self.cells {
            if cell.plant.as_ref().is_some_and(Organism::is_alive) {
                census.plants += 1;
            }
            if let Some(animal) = cell.animal.as_ref().filter(|a| a.is_alive()) {
                match animal.species() {
                    Species::Herbivore => census.herbivores += 1,
                    Species::Carnivore => census.carnivores += 1,
                    Species::Plant => {}
                }
            }
        }
        census
    }

    /// Remove every occupant whose energy reached 0. Returns the number
    /// of slots cleared. Idempotent: a second sweep with nothing newly
    /// dead removes nothing.
    pub fn sweep_dead(&mut self) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if cell.animal.as_ref().is_some_and(|a| !a.is_alive()) {
                cell.animal = None;
                removed += 1;
            }
            if cell.plant.as_ref().is_some_and(|p| !p.is_alive()) {
                cell.plant = None;
                removed += 1;
            }
        }
        removed
    }
}
