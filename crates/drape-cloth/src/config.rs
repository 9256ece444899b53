//! Solver configuration.
//!
//! Gravity and the transient global force live here, per cloth
//! instance, instead of in process-wide state: two cloths in one scene
//! can be forced independently.

use drape_math::Vec3;
use drape_types::constants::{FIXED_TIMESTEP, GRAVITY, SOLVER_ITERATIONS};
use drape_types::{DrapeError, DrapeResult, Scalar};
use serde::{Deserialize, Serialize};

/// Configuration for the cloth solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational acceleration, applied to every particle each step.
    pub gravity: Vec3,

    /// Ambient force applied uniformly each step (wind, currents).
    /// Mutate between updates to animate it.
    pub global_force: Vec3,

    /// Constraint-relaxation iterations per fixed step. This is a
    /// fixed-iteration relaxation solver, not an exact solve.
    pub iterations: u32,

    /// Fixed timestep (seconds) for the accumulator loop.
    pub fixed_timestep: Scalar,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            global_force: Vec3::ZERO,
            iterations: SOLVER_ITERATIONS,
            fixed_timestep: FIXED_TIMESTEP,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> DrapeResult<()> {
        if self.iterations == 0 {
            return Err(DrapeError::InvalidConfig(
                "solver iterations must be at least 1".into(),
            ));
        }
        if !(self.fixed_timestep > 0.0) || !self.fixed_timestep.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "fixed timestep must be positive and finite, got {}",
                self.fixed_timestep
            )));
        }
        Ok(())
    }
}
