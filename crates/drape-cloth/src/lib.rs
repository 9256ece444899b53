//! # drape-cloth
//!
//! Verlet cloth solver: a grid of mass particles linked by distance
//! constraints, iteratively relaxed at a fixed timestep, with
//! BVH-accelerated self-collision and sphere-penetration resolution.
//!
//! ## Key Types
//!
//! - [`Cloth`]: owns the particle grid, the structural constraints,
//!   the BVH, and the registered colliders; drives the solver loop.
//! - [`Particle`] / [`Constraint`]: the solver primitives.
//! - [`SimConfig`]: per-instance gravity, global force, iteration
//!   count, and fixed timestep.
//! - [`ClothParams`]: construction-time grid parameters.

pub mod cloth;
pub mod collider;
pub mod config;
pub mod constraint;
pub mod params;
pub mod particle;
pub mod topology;

pub use cloth::Cloth;
pub use collider::SphereCollider;
pub use config::SimConfig;
pub use constraint::Constraint;
pub use params::{Basis, ClothParams};
pub use particle::Particle;
pub use topology::GridTopology;
