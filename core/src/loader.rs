//! Declarative world configuration.
//!
//! A world file is a small JSON document: dimensions plus per-species
//! placement lists. Loading either produces a fully-built grid or
//! fails wholesale — a malformed file never yields a partially
//! populated world. Individual placements that lose the race for a
//! slot (duplicate coordinates, out-of-bounds entries) are skipped
//! with a warning; that is a data problem, not an engine error.

use crate::error::SimResult;
use crate::grid::Grid;
use crate::organism::{Organism, Species};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub energy: u32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub plants: Vec<PlacementConfig>,
    #[serde(default)]
    pub herbivores: Vec<PlacementConfig>,
    #[serde(default)]
    pub carnivores: Vec<PlacementConfig>,
}

impl WorldConfig {
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the populated grid. Dimension problems reject the whole
    /// load; bad placements are skipped one by one.
    pub fn build(&self) -> SimResult<Grid> {
        let mut grid = Grid::new(self.width, self.height)?;
        self.place_all(&mut grid, Species::Plant, &self.plants);
        self.place_all(&mut grid, Species::Herbivore, &self.herbivores);
        self.place_all(&mut grid, Species::Carnivore, &self.carnivores);
        Ok(grid)
    }

    fn place_all(&self, grid: &mut Grid, species: Species, list: &[PlacementConfig]) {
        for entry in list {
            let pos = match Position::new(entry.x, entry.y) {
                Ok(p) if grid.in_bounds(p) => p,
                _ => {
                    log::warn!(
                        "skipping {species} at ({}, {}): outside the {}x{} grid",
                        entry.x,
                        entry.y,
                        self.width,
                        self.height
                    );
                    continue;
                }
            };
            if let Err(err) = grid.place(pos, Organism::new(species, entry.energy)) {
                log::warn!("skipping {species} at {pos}: {err}");
            }
        }
    }
}
