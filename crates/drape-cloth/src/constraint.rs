//! Bidirectional distance constraint between two particles.

use drape_types::constants::COINCIDENT_EPSILON;
use drape_types::{ParticleId, Scalar};

use crate::particle::Particle;

/// A distance constraint linking two particles by id.
///
/// Relaxed by direct positional correction: each endpoint absorbs a
/// share of the correction proportional to its inverse mass, so a
/// pinned endpoint absorbs none of it. Value-semantic; the ids index
/// into the particle array owned by the cloth.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    a: ParticleId,
    b: ParticleId,
    rest_length: Scalar,
    max_length: Scalar,
    bend_coefficient: Scalar,
}

impl Constraint {
    /// Creates a constraint between two distinct particles.
    ///
    /// `bend_coefficient` blends the correction; 1.0 for rigid
    /// structural links.
    pub fn new(
        a: ParticleId,
        b: ParticleId,
        rest_length: Scalar,
        max_length: Scalar,
        bend_coefficient: Scalar,
    ) -> Self {
        debug_assert_ne!(a, b, "constraint endpoints must differ");
        Self {
            a,
            b,
            rest_length,
            max_length,
            bend_coefficient,
        }
    }

    pub fn endpoints(&self) -> (ParticleId, ParticleId) {
        (self.a, self.b)
    }

    pub fn rest_length(&self) -> Scalar {
        self.rest_length
    }

    pub fn max_length(&self) -> Scalar {
        self.max_length
    }

    /// Relaxes the constraint once by moving both endpoints toward the
    /// target separation.
    ///
    /// The target is `max_length * rest_length`: the product, not
    /// either bound alone. Existing scenes are tuned against this
    /// coupling, so changing it retunes every constraint in the system
    /// (structural links keep rest near the grid spacing, which makes
    /// the product close to `max_length` at unit spacing).
    ///
    /// Coincident endpoints have no defined correction direction and
    /// are skipped, as are pairs where both endpoints are pinned.
    pub fn satisfy(&self, particles: &mut [Particle]) {
        let pa = particles[self.a.index()].position();
        let pb = particles[self.b.index()].position();
        let delta = pb - pa;

        let distance = delta.length();
        if distance <= COINCIDENT_EPSILON {
            return;
        }

        let inv_a = particles[self.a.index()].inv_mass();
        let inv_b = particles[self.b.index()].inv_mass();
        let inv_sum = inv_a + inv_b;
        if inv_sum == 0.0 {
            return;
        }

        let correction = (delta / distance)
            * (distance - self.max_length * self.rest_length)
            * self.bend_coefficient;

        if inv_a != 0.0 {
            particles[self.a.index()].set_position(pa + correction * (inv_a / inv_sum));
        }
        if inv_b != 0.0 {
            particles[self.b.index()].set_position(pb - correction * (inv_b / inv_sum));
        }
    }
}
