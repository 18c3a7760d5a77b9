//! High-level cave generation with deterministic reseed-and-retry.

mod pipeline;

use log::{debug, info};

use crate::config::CaveConfig;
use crate::error::{AttemptFailure, GenerationError};
use crate::grid::Grid;

use super::model::Cave;
use super::seed::derive_attempt_seed;
use pipeline::run_attempt;

#[derive(Clone, Debug, Default)]
pub struct CaveGenerator {
    config: CaveConfig,
}

impl CaveGenerator {
    pub fn new(config: CaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// Parameters may be tuned between calls to [`CaveGenerator::generate`].
    pub fn config_mut(&mut self) -> &mut CaveConfig {
        &mut self.config
    }

    /// Builds a cave from `seed`.
    ///
    /// Rejected attempts are rerun from scratch with a seed derived from
    /// `seed` and the attempt number, up to `max_generation_attempts` times.
    pub fn generate(&self, seed: u64) -> Result<Cave, GenerationError> {
        self.config.validate()?;
        let blank = Grid::new(self.config.width, self.config.height)?;

        let mut last_failure = AttemptFailure::PlacementUnsatisfiable;
        for attempt in 0..self.config.max_generation_attempts {
            let attempt_seed = derive_attempt_seed(seed, attempt);
            match run_attempt(&self.config, attempt_seed, blank.clone()) {
                Ok(layout) => {
                    info!(
                        "generated {}x{} cave from seed {seed} in {} attempt(s), path length {}",
                        self.config.width,
                        self.config.height,
                        attempt + 1,
                        layout.path.len()
                    );
                    return Ok(Cave {
                        config: self.config.clone(),
                        grid: layout.grid,
                        entrance: layout.entrance,
                        exit: layout.exit,
                        path: layout.path,
                        initial_seed: seed,
                        attempt_seed,
                        attempts: attempt + 1,
                    });
                }
                Err(failure) => {
                    debug!("attempt {attempt} (seed {attempt_seed}) rejected: {failure}");
                    last_failure = failure;
                }
            }
        }

        Err(GenerationError::GenerationFailed {
            attempts: self.config.max_generation_attempts,
            last_failure,
        })
    }
}
