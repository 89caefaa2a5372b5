//! Species rules: energy clamps, life state, perception, feeding,
//! fleeing, hunting, and spawn atomicity.

use ecosim_core::{
    behavior,
    grid::{Grid, SlotKind},
    organism::{Organism, Species},
    position::Position,
    rng::{neighborhood, neighborhood_level, SimRng, Vision},
};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y).expect("valid position")
}

fn grid(width: i32, height: i32) -> Grid {
    Grid::new(width, height).expect("valid dimensions")
}

// ── Energy pool ────────────────────────────────────────────────

#[test]
fn construction_clamps_energy_to_species_range() {
    assert_eq!(Organism::new(Species::Plant, 99).energy(), 3);
    assert_eq!(Organism::new(Species::Herbivore, 99).energy(), 10);
    assert_eq!(Organism::new(Species::Carnivore, 99).energy(), 20);
    // A just-created organism is never dead.
    assert_eq!(Organism::new(Species::Herbivore, 0).energy(), 1);
}

#[test]
fn add_energy_never_exceeds_the_species_max() {
    let mut herb = Organism::new(Species::Herbivore, 8);
    herb.add_energy(50);
    assert_eq!(herb.energy(), 10);
}

#[test]
fn sub_energy_floors_at_zero_and_zero_is_death() {
    let mut carn = Organism::new(Species::Carnivore, 2);
    carn.sub_energy(1);
    assert!(carn.is_alive());
    carn.sub_energy(5);
    assert_eq!(carn.energy(), 0);
    assert!(!carn.is_alive());
}

#[test]
fn growth_caps_at_max_and_the_dead_never_grow() {
    let mut plant = Organism::new(Species::Plant, 2);
    plant.grow();
    assert_eq!(plant.energy(), 3);
    plant.grow();
    assert_eq!(plant.energy(), 3);

    let mut dead = Organism::new(Species::Plant, 1);
    dead.sub_energy(1);
    dead.grow();
    assert_eq!(dead.energy(), 0);
}

#[test]
fn nutrition_equals_current_energy() {
    assert_eq!(Organism::new(Species::Plant, 2).nutrition(), 2);
    assert_eq!(Organism::new(Species::Herbivore, 6).nutrition(), 6);
}

#[test]
fn reproduction_eligibility_follows_species_thresholds() {
    assert!(!Organism::new(Species::Plant, 2).can_reproduce());
    assert!(Organism::new(Species::Plant, 3).can_reproduce());
    assert!(!Organism::new(Species::Herbivore, 6).can_reproduce());
    assert!(Organism::new(Species::Herbivore, 7).can_reproduce());
    assert!(!Organism::new(Species::Carnivore, 13).can_reproduce());
    assert!(Organism::new(Species::Carnivore, 14).can_reproduce());
}

#[test]
fn offspring_start_at_the_species_default() {
    assert_eq!(Organism::new(Species::Plant, 3).reproduce().energy(), 1);
    assert_eq!(Organism::new(Species::Herbivore, 9).reproduce().energy(), 3);
    assert_eq!(Organism::new(Species::Carnivore, 18).reproduce().energy(), 5);
}

#[test]
fn reproduction_cost_resets_plants_and_halves_animals() {
    let mut plant = Organism::new(Species::Plant, 3);
    plant.apply_reproduction_cost();
    assert_eq!(plant.energy(), 1);

    let mut herb = Organism::new(Species::Herbivore, 7);
    herb.apply_reproduction_cost();
    assert_eq!(herb.energy(), 4); // 7 - 7/2

    let mut carn = Organism::new(Species::Carnivore, 16);
    carn.apply_reproduction_cost();
    assert_eq!(carn.energy(), 8);
}

// ── Grid bounds ────────────────────────────────────────────────

#[test]
#[should_panic(expected = "out of bounds")]
fn reading_past_the_grid_edge_panics() {
    // x == width maps to a valid row-major index of a different cell;
    // the access must fail loudly instead.
    let g = grid(4, 4);
    let _ = g.cell(pos(4, 0));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn placing_past_the_grid_edge_panics() {
    let mut g = grid(4, 4);
    let _ = g.place(pos(0, 4), Organism::new(Species::Plant, 2));
}

// ── Perception ─────────────────────────────────────────────────

#[test]
fn vision_patterns_have_the_documented_sizes() {
    let g = grid(9, 9);
    let center = pos(4, 4);
    assert_eq!(neighborhood(center, &g, Vision::Cross).len(), 4);
    assert_eq!(neighborhood(center, &g, Vision::Ring3).len(), 8);
    assert_eq!(neighborhood(center, &g, Vision::Ring5).len(), 24);
}

#[test]
fn vision_clips_at_the_grid_edge() {
    let g = grid(9, 9);
    let corner = pos(0, 0);
    assert_eq!(neighborhood(corner, &g, Vision::Cross).len(), 2);
    assert_eq!(neighborhood(corner, &g, Vision::Ring3).len(), 3);
    assert_eq!(neighborhood(corner, &g, Vision::Ring5).len(), 8);
}

#[test]
fn numeric_vision_levels_validate() {
    let g = grid(5, 5);
    assert!(neighborhood_level(pos(2, 2), &g, 2).is_ok());
    assert!(neighborhood_level(pos(2, 2), &g, 0).is_err());
    assert!(neighborhood_level(pos(2, 2), &g, 4).is_err());
    assert_eq!(Species::Carnivore.vision().level(), 3);
}

// ── Feeding ────────────────────────────────────────────────────

#[test]
fn eating_transfers_nutrition_and_removes_the_prey() {
    let mut g = grid(5, 5);
    g.place(pos(2, 2), Organism::new(Species::Herbivore, 4)).expect("place");
    g.place(pos(2, 3), Organism::new(Species::Plant, 3)).expect("place");

    behavior::eat(&mut g, pos(2, 2), pos(2, 3));

    assert_eq!(g.animal(pos(2, 2)).expect("eater").energy(), 7);
    assert!(g.plant(pos(2, 3)).is_none(), "eaten plant must leave its slot");
}

#[test]
fn eating_gain_is_clamped_at_the_eater_max() {
    let mut g = grid(5, 5);
    g.place(pos(1, 1), Organism::new(Species::Carnivore, 18)).expect("place");
    g.place(pos(1, 2), Organism::new(Species::Herbivore, 9)).expect("place");

    behavior::eat(&mut g, pos(1, 1), pos(1, 2));

    assert_eq!(g.animal(pos(1, 1)).expect("eater").energy(), 20);
    assert!(g.animal(pos(1, 2)).is_none());
}

#[test]
fn wrong_prey_kind_is_never_eaten() {
    let mut g = grid(5, 5);
    g.place(pos(2, 2), Organism::new(Species::Herbivore, 5)).expect("place");
    g.place(pos(2, 3), Organism::new(Species::Herbivore, 5)).expect("place");

    assert!(!behavior::can_eat(Species::Herbivore, &g, pos(2, 3)));
    behavior::eat(&mut g, pos(2, 2), pos(2, 3));

    assert_eq!(g.animal(pos(2, 2)).expect("still here").energy(), 5);
    assert_eq!(g.animal(pos(2, 3)).expect("still here").energy(), 5);
}

#[test]
fn dead_prey_is_carrion_not_food() {
    let mut g = grid(5, 5);
    g.place(pos(2, 2), Organism::new(Species::Herbivore, 5)).expect("place");
    g.place(pos(2, 3), Organism::new(Species::Plant, 1)).expect("place");
    g.plant_mut(pos(2, 3)).expect("plant").sub_energy(1);

    assert!(!behavior::can_eat(Species::Herbivore, &g, pos(2, 3)));
    behavior::eat(&mut g, pos(2, 2), pos(2, 3));

    assert_eq!(g.animal(pos(2, 2)).expect("eater").energy(), 5);
    assert!(g.plant(pos(2, 3)).is_some(), "the carcass waits for cleanup");

    g.place(pos(3, 3), Organism::new(Species::Carnivore, 10)).expect("place");
    g.animal_mut(pos(2, 2)).expect("herbivore").sub_energy(5);
    assert!(!behavior::can_eat(Species::Carnivore, &g, pos(2, 2)));
}

// ── Fleeing and hunting ────────────────────────────────────────

#[test]
fn herbivore_flees_to_the_cell_farthest_from_the_predator() {
    let mut g = grid(7, 7);
    g.place(pos(3, 3), Organism::new(Species::Herbivore, 8)).expect("place");
    g.place(pos(3, 2), Organism::new(Species::Carnivore, 10)).expect("place");

    // Of the free ring cells, (2, 4) and (4, 4) are both 3 away from
    // the predator; scan order picks (2, 4) first.
    let flee = behavior::choose_flee(&g, pos(3, 3)).expect("flees");
    assert_eq!(flee, pos(2, 4));
}

#[test]
fn blocked_flight_means_staying_put() {
    let mut g = grid(2, 2);
    g.place(pos(0, 0), Organism::new(Species::Herbivore, 8)).expect("place");
    g.place(pos(0, 1), Organism::new(Species::Carnivore, 10)).expect("place");
    g.place(pos(1, 0), Organism::new(Species::Carnivore, 10)).expect("place");
    g.place(pos(1, 1), Organism::new(Species::Carnivore, 10)).expect("place");

    assert!(behavior::choose_flee(&g, pos(0, 0)).is_none());
}

#[test]
fn no_predator_means_no_flight() {
    let mut g = grid(7, 7);
    g.place(pos(3, 3), Organism::new(Species::Herbivore, 8)).expect("place");
    // A carnivore three rows up is outside the 3x3 herbivore vision.
    g.place(pos(3, 0), Organism::new(Species::Carnivore, 10)).expect("place");

    assert!(behavior::choose_flee(&g, pos(3, 3)).is_none());
}

#[test]
fn carnivore_spots_prey_across_its_wider_vision() {
    let mut g = grid(9, 9);
    g.place(pos(4, 4), Organism::new(Species::Carnivore, 12)).expect("place");
    g.place(pos(6, 5), Organism::new(Species::Herbivore, 5)).expect("place");

    assert_eq!(behavior::choose_hunt(&g, pos(4, 4)), Some(pos(6, 5)));
}

#[test]
fn prey_outside_the_five_by_five_ring_is_invisible() {
    let mut g = grid(9, 9);
    g.place(pos(4, 4), Organism::new(Species::Carnivore, 12)).expect("place");
    g.place(pos(7, 4), Organism::new(Species::Herbivore, 5)).expect("place");

    assert!(behavior::choose_hunt(&g, pos(4, 4)).is_none());
}

#[test]
fn herbivore_moves_toward_the_richest_plant() {
    let mut g = grid(7, 7);
    let mut rng = SimRng::new(1);
    g.place(pos(3, 3), Organism::new(Species::Herbivore, 8)).expect("place");
    g.place(pos(2, 2), Organism::new(Species::Plant, 1)).expect("place");
    g.place(pos(4, 4), Organism::new(Species::Plant, 3)).expect("place");

    let dest = behavior::choose_move(&g, &mut rng, pos(3, 3), Species::Herbivore);
    assert_eq!(dest, Some(pos(4, 4)));
}

// ── Spawning ───────────────────────────────────────────────────

#[test]
fn spawn_places_one_offspring_and_bills_the_parent() {
    let mut g = grid(3, 3);
    let mut rng = SimRng::new(1);
    g.place(pos(1, 1), Organism::new(Species::Herbivore, 8)).expect("place");

    assert!(behavior::try_spawn(&mut g, &mut rng, pos(1, 1), SlotKind::Animal));

    assert_eq!(g.animal(pos(1, 1)).expect("parent").energy(), 4);
    let offspring: Vec<Position> = g
        .neighbors(pos(1, 1), false)
        .into_iter()
        .filter(|&p| g.animal(p).is_some())
        .collect();
    assert_eq!(offspring.len(), 1, "exactly one cardinal offspring");
    assert_eq!(g.animal(offspring[0]).expect("child").energy(), 3);
}

#[test]
fn failed_spawn_changes_nothing() {
    // A 1x1 world has no neighbors at all.
    let mut g = grid(1, 1);
    let mut rng = SimRng::new(1);
    g.place(pos(0, 0), Organism::new(Species::Herbivore, 8)).expect("place");

    let before = g.clone();
    assert!(!behavior::try_spawn(&mut g, &mut rng, pos(0, 0), SlotKind::Animal));
    assert_eq!(g, before, "failed spawn must be side-effect free");
}

#[test]
fn below_threshold_parents_never_spawn() {
    let mut g = grid(3, 3);
    let mut rng = SimRng::new(1);
    g.place(pos(1, 1), Organism::new(Species::Herbivore, 6)).expect("place");

    assert!(!behavior::try_spawn(&mut g, &mut rng, pos(1, 1), SlotKind::Animal));
    assert_eq!(g.animal(pos(1, 1)).expect("parent").energy(), 6);
}

#[test]
fn spawn_search_is_cardinal_only() {
    // Block all four cardinal neighbors; the free diagonals must not
    // be used.
    let mut g = grid(3, 3);
    let mut rng = SimRng::new(1);
    g.place(pos(1, 1), Organism::new(Species::Herbivore, 10)).expect("place");
    for p in [pos(0, 1), pos(2, 1), pos(1, 0), pos(1, 2)] {
        g.place(p, Organism::new(Species::Herbivore, 5)).expect("place");
    }

    assert!(!behavior::try_spawn(&mut g, &mut rng, pos(1, 1), SlotKind::Animal));
    assert_eq!(g.animal(pos(1, 1)).expect("parent").energy(), 10);
}
