//! Physical constants and simulation defaults.

use crate::scalar::Scalar;

/// Gravitational acceleration (m/s²), applied along −Y by default.
pub const GRAVITY: Scalar = 9.8;

/// Default fixed simulation timestep (seconds). 1/60th of a second.
pub const FIXED_TIMESTEP: Scalar = 1.0 / 60.0;

/// Default number of constraint-relaxation iterations per timestep.
pub const SOLVER_ITERATIONS: u32 = 4;

/// Half-extent added to a particle position to form its BVH leaf box.
/// Keeps leaf boxes from degenerating to zero volume.
pub const LEAF_MARGIN: Scalar = 0.001;

/// Inverse-mass threshold below which a particle counts as pinned.
pub const PIN_EPSILON: Scalar = 1.0e-5;

/// Separation below which constraint relaxation is skipped to avoid
/// dividing by a near-zero distance.
pub const COINCIDENT_EPSILON: Scalar = 1.0e-9;
