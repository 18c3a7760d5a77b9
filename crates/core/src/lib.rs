pub mod config;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod pathfinding;
pub mod types;

pub use config::{CaveConfig, ExitPlacement, RegionRetention};
pub use error::{AttemptFailure, ConfigLoadError, GenerationError};
pub use grid::Grid;
pub use mapgen::{Cave, CaveGenerator, generate_cave};
pub use pathfinding::{CavePath, astar_path, astar_search, path_distance};
pub use types::*;
