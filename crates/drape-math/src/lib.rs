//! # drape-math
//!
//! Math primitives for the Drape simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, etc.)
//! - The [`Aabb`] axis-aligned box used by the BVH and spatial queries

pub mod aabb;

pub use aabb::Aabb;

// Re-export glam types as the canonical math types for Drape.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
