//! Procedural cave generation split into pipeline stages.

pub mod automaton;
pub mod model;
pub mod regions;

mod generator;
mod init;
mod placement;
mod seed;

pub use generator::CaveGenerator;
pub use model::Cave;
pub use seed::{derive_attempt_seed, mix_seed_stream};

use crate::config::CaveConfig;
use crate::error::GenerationError;

pub fn generate_cave(config: CaveConfig, seed: u64) -> Result<Cave, GenerationError> {
    CaveGenerator::new(config).generate(seed)
}
