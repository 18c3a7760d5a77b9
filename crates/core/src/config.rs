//! Tunable generation parameters and their TOML representation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigLoadError, GenerationError};
use crate::grid::check_dimensions;
use crate::types::TileSize;

/// Which connected floor region survives connectivity repair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRetention {
    /// Largest region by cell count; ties go to the lowest bounding-box top-left.
    #[default]
    Largest,
    /// Uniform pick among regions big enough to host an entrance and exit.
    Random,
}

/// How the exit is chosen once the entrance is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPlacement {
    /// Uniform sampling until a candidate is far enough, up to `attempts` draws.
    RandomSampling { attempts: u32 },
    /// Uniform pick from the farthest quarter of candidates.
    FarthestQuartile,
}

impl Default for ExitPlacement {
    fn default() -> Self {
        Self::RandomSampling { attempts: 64 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub width: i64,
    pub height: i64,
    pub tile_size: TileSize,
    pub wall_birth_probability: f64,
    pub floors_to_wall_conversion: u32,
    pub walls_to_floor_conversion: u32,
    pub number_of_steps: u32,
    pub neighborhood_radius: u32,
    pub connected_cave: bool,
    pub region_retention: RegionRetention,
    pub exit_placement: ExitPlacement,
    pub min_distance_between_entry_and_exit: u32,
    pub min_floor_cells: usize,
    pub max_generation_attempts: u32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            tile_size: TileSize::default(),
            wall_birth_probability: 0.45,
            floors_to_wall_conversion: 5,
            walls_to_floor_conversion: 3,
            number_of_steps: 4,
            neighborhood_radius: 1,
            connected_cave: true,
            region_retention: RegionRetention::Largest,
            exit_placement: ExitPlacement::default(),
            min_distance_between_entry_and_exit: 6,
            min_floor_cells: 2,
            max_generation_attempts: 256,
        }
    }
}

impl CaveConfig {
    pub fn with_size(width: i64, height: i64) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Smallest retained region that can still host an entrance and exit.
    pub fn required_floor_cells(&self) -> usize {
        let for_distance = self.min_distance_between_entry_and_exit as usize + 1;
        self.min_floor_cells.max(for_distance).max(2)
    }

    /// Number of cells counted around each cell during smoothing.
    pub fn neighborhood_size(&self) -> u64 {
        let side = 2 * u64::from(self.neighborhood_radius) + 1;
        side * side - 1
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let (width, height) = check_dimensions(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.wall_birth_probability) {
            return Err(invalid(
                "wall_birth_probability",
                format!("{} is outside [0, 1]", self.wall_birth_probability),
            ));
        }
        if self.neighborhood_radius == 0 {
            return Err(invalid("neighborhood_radius", "must be at least 1".to_string()));
        }
        let longest_side = width.max(height);
        if self.neighborhood_radius as usize > longest_side {
            return Err(invalid(
                "neighborhood_radius",
                format!("{} exceeds the longest grid side {longest_side}", self.neighborhood_radius),
            ));
        }
        let neighbors = self.neighborhood_size();
        for (name, threshold) in [
            ("floors_to_wall_conversion", self.floors_to_wall_conversion),
            ("walls_to_floor_conversion", self.walls_to_floor_conversion),
        ] {
            if u64::from(threshold) > neighbors {
                return Err(invalid(
                    name,
                    format!("{threshold} exceeds the {neighbors}-cell neighbourhood"),
                ));
            }
        }
        if self.min_distance_between_entry_and_exit == 0 {
            return Err(invalid(
                "min_distance_between_entry_and_exit",
                "must be at least 1".to_string(),
            ));
        }
        if self.max_generation_attempts == 0 {
            return Err(invalid("max_generation_attempts", "must be at least 1".to_string()));
        }
        if let ExitPlacement::RandomSampling { attempts: 0 } = self.exit_placement {
            return Err(invalid(
                "exit_placement",
                "sampling needs at least one attempt".to_string(),
            ));
        }
        if !(self.tile_size.width > 0.0 && self.tile_size.height > 0.0) {
            return Err(invalid("tile_size", "both sides must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> GenerationError {
    GenerationError::InvalidParameter { name, reason }
}
