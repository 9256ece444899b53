//! Collider sphere registered with a cloth.

use drape_math::Vec3;
use drape_types::Scalar;
use serde::{Deserialize, Serialize};

/// A solid sphere that cloth particles must stay outside of.
///
/// Owned by the registering scene conceptually; the cloth stores a
/// copy under a `ColliderId` and reads `center`/`radius` each frame.
/// Move it with [`Cloth::set_collider`](crate::Cloth::set_collider).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: Scalar,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: Scalar) -> Self {
        Self { center, radius }
    }
}
