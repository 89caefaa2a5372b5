//! Species behaviors: movement, fleeing, hunting, feeding, spawning.
//!
//! Behaviors are free functions over `(&Grid, &mut SimRng, Position)`
//! dispatched on the species tag. They read the grid, consult the
//! shared RNG for every non-deterministic pick, and return intents;
//! the engine's phases apply the mutations. A returned `None`
//! destination is a normal outcome (blocked or staying), never an
//! error.

use crate::grid::{Grid, NeighborFilter, SlotKind};
use crate::organism::Species;
use crate::position::Position;
use crate::rng::{neighborhood, SimRng, Vision};

/// One-step movement in any direction uses the 3x3 ring regardless of
/// how far the species can see.
const MOVE_RANGE: Vision = Vision::Ring3;

/// Pick this tick's destination for the animal at `pos`, or `None` to
/// stay (blocked counts as staying and is billed by the phase).
pub fn choose_move(grid: &Grid, rng: &mut SimRng, pos: Position, species: Species) -> Option<Position> {
    match species {
        Species::Herbivore => choose_herbivore_move(grid, rng, pos),
        Species::Carnivore => choose_carnivore_move(grid, rng, pos),
        Species::Plant => None,
    }
}

/// Herbivore priority: flee a perceived carnivore, else approach the
/// best plant, else wander to a random empty cell.
fn choose_herbivore_move(grid: &Grid, rng: &mut SimRng, pos: Position) -> Option<Position> {
    let perceived = neighborhood(pos, grid, Species::Herbivore.vision());

    let predators: Vec<Position> = perceived
        .iter()
        .copied()
        .filter(|&p| grid.cell(p).matches(NeighborFilter::Carnivore))
        .collect();
    if !predators.is_empty() {
        // Fleeing takes priority; a blocked flight means staying put.
        return flee_target(grid, &perceived, &predators);
    }

    if let Some(plant_pos) = best_plant_target(grid, &perceived) {
        return Some(plant_pos);
    }

    rng.random_neighbor(pos, grid, MOVE_RANGE, NeighborFilter::Empty)
}

/// Flee destination for the herbivore at `pos`: among perceived cells
/// with a free animal slot, the one maximizing Manhattan distance to
/// the nearest perceived predator, ties broken by scan order. `None`
/// when no predator is perceived.
pub fn choose_flee(grid: &Grid, pos: Position) -> Option<Position> {
    let perceived = neighborhood(pos, grid, Species::Herbivore.vision());
    let predators: Vec<Position> = perceived
        .iter()
        .copied()
        .filter(|&p| grid.cell(p).matches(NeighborFilter::Carnivore))
        .collect();
    if predators.is_empty() {
        return None;
    }
    flee_target(grid, &perceived, &predators)
}

fn flee_target(grid: &Grid, perceived: &[Position], predators: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, u32)> = None;
    for &candidate in perceived {
        if !grid.cell(candidate).matches(NeighborFilter::EmptyAnimal) {
            continue;
        }
        let nearest = predators
            .iter()
            .map(|&p| candidate.distance_to(p))
            .min()
            .unwrap_or(0);
        // Strict > keeps the first candidate at maximal distance.
        if best.is_none_or(|(_, d)| nearest > d) {
            best = Some((candidate, nearest));
        }
    }
    best.map(|(p, _)| p)
}

/// The highest-energy plant among perceived cells whose animal slot is
/// free, first encountered at maximal energy by scan order.
fn best_plant_target(grid: &Grid, perceived: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, u32)> = None;
    for &candidate in perceived {
        let cell = grid.cell(candidate);
        if cell.has_animal() {
            continue;
        }
        let Some(plant) = cell.plant().filter(|p| p.is_alive()) else {
            continue;
        };
        if best.is_none_or(|(_, e)| plant.energy() > e) {
            best = Some((candidate, plant.energy()));
        }
    }
    best.map(|(p, _)| p)
}

/// Carnivore priority: step toward a perceived herbivore, else wander.
fn choose_carnivore_move(grid: &Grid, rng: &mut SimRng, pos: Position) -> Option<Position> {
    if let Some(prey) = choose_hunt(grid, pos) {
        let step = chase_step(pos, prey);
        let cell = grid.cell(step);
        if cell.matches(NeighborFilter::Herbivore) || !cell.has_animal() {
            return Some(step);
        }
        // Path blocked by another animal: stay, pay the attempt.
        return None;
    }
    rng.random_neighbor(pos, grid, MOVE_RANGE, NeighborFilter::Empty)
}

/// Position of a herbivore within carnivore vision, first found by
/// scan order; `None` when no prey is perceived.
pub fn choose_hunt(grid: &Grid, pos: Position) -> Option<Position> {
    neighborhood(pos, grid, Species::Carnivore.vision())
        .into_iter()
        .find(|&p| grid.cell(p).matches(NeighborFilter::Herbivore))
}

/// One cell toward `prey` along the axis of greatest coordinate
/// difference; equal differences step diagonally. Never more than one
/// cell per tick.
fn chase_step(from: Position, prey: Position) -> Position {
    let dx = prey.x() - from.x();
    let dy = prey.y() - from.y();
    let (sx, sy) = if dx.abs() > dy.abs() {
        (dx.signum(), 0)
    } else if dy.abs() > dx.abs() {
        (0, dy.signum())
    } else {
        (dx.signum(), dy.signum())
    };
    // Stepping toward an in-bounds prey stays in bounds.
    from.offset(sx, sy).unwrap_or(from)
}

/// Whether `species` finds live prey of the correct kind in `cell`:
/// herbivores eat plants, carnivores eat herbivores. Dead occupants
/// are carrion for the cleanup sweep, never food.
pub fn can_eat(species: Species, grid: &Grid, pos: Position) -> bool {
    let cell = grid.cell(pos);
    match species {
        Species::Herbivore => cell.plant().is_some_and(|p| p.is_alive()),
        Species::Carnivore => cell
            .animal()
            .is_some_and(|a| a.species() == Species::Herbivore && a.is_alive()),
        Species::Plant => false,
    }
}

/// Consume the prey at `prey_pos`: its current energy (nutrition)
/// transfers into the eater at `eater_pos`, clamped at the eater's
/// species maximum, and the prey leaves its slot. Both effects happen
/// together or not at all.
pub fn eat(grid: &mut Grid, eater_pos: Position, prey_pos: Position) {
    let Some(species) = grid.animal(eater_pos).map(|a| a.species()) else {
        return;
    };
    if !can_eat(species, grid, prey_pos) {
        return;
    }
    let nutrition = match species {
        Species::Herbivore => grid.remove_plant(prey_pos).map(|p| p.nutrition()),
        Species::Carnivore => grid.remove_animal(prey_pos).map(|h| h.nutrition()),
        Species::Plant => None,
    };
    if let (Some(gain), Some(eater)) = (nutrition, grid.animal_mut(eater_pos)) {
        eater.add_energy(gain);
    }
}

/// Attempt reproduction for the occupant of the given slot at `pos`.
/// The spawn searches cardinal neighbors only, for a free slot of the
/// matching kind. On success the offspring is placed and the parent
/// pays its reproduction cost; on failure nothing changes at all.
pub fn try_spawn(grid: &mut Grid, rng: &mut SimRng, pos: Position, kind: SlotKind) -> bool {
    let parent = match kind {
        SlotKind::Animal => grid.animal(pos),
        SlotKind::Plant => grid.plant(pos),
    };
    let Some(parent) = parent.filter(|p| p.can_reproduce()) else {
        return false;
    };
    let child = parent.reproduce();

    let filter = match kind {
        SlotKind::Animal => NeighborFilter::EmptyAnimal,
        SlotKind::Plant => NeighborFilter::EmptyPlant,
    };
    let Some(slot) = rng.random_neighbor(pos, grid, Vision::Cross, filter) else {
        return false;
    };

    // The slot was just checked free; placement cannot fail.
    if grid.place(slot, child).is_err() {
        return false;
    }
    let parent = match kind {
        SlotKind::Animal => grid.animal_mut(pos),
        SlotKind::Plant => grid.plant_mut(pos),
    };
    if let Some(parent) = parent {
        parent.apply_reproduction_cost();
    }
    true
}
