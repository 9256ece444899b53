//! A simulated mass point with Verlet-integrated position.

use drape_math::Vec3;
use drape_types::constants::PIN_EPSILON;
use drape_types::Scalar;

/// A mass point advanced by Störmer–Verlet integration.
///
/// Velocity is implicit in the difference between the current and
/// previous positions. An inverse mass of zero marks the particle as
/// pinned: forces, integration, and constraint corrections all leave
/// it in place.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec3,
    previous_position: Vec3,
    force: Vec3,
    mass: Scalar,
    inv_mass: Scalar,
}

impl Particle {
    /// Creates a particle at rest. A mass of zero pins it permanently.
    pub fn new(position: Vec3, force: Vec3, mass: Scalar) -> Self {
        let inv_mass = if mass == 0.0 { 0.0 } else { 1.0 / mass };
        Self {
            position,
            previous_position: position,
            force,
            mass,
            inv_mass,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn previous_position(&self) -> Vec3 {
        self.previous_position
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn inv_mass(&self) -> Scalar {
        self.inv_mass
    }

    /// Accumulates an external force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Replaces the accumulated external force.
    pub fn set_force(&mut self, force: Vec3) {
        self.force = force;
    }

    /// Moves the particle directly, without touching the previous
    /// position (the displacement becomes implicit velocity).
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Zeroes the implicit velocity by snapping the previous position
    /// to the current one. Call after teleporting an anchor.
    pub fn reset_previous(&mut self) {
        self.previous_position = self.position;
    }

    /// Makes the particle immovable. Idempotent.
    pub fn pin(&mut self) {
        self.inv_mass = 0.0;
    }

    /// Restores mobility for a particle constructed with positive mass.
    pub fn unpin(&mut self) {
        if self.mass > 0.0 {
            self.inv_mass = 1.0 / self.mass;
        }
    }

    /// True iff the particle is pinned. Compared against a small
    /// epsilon rather than exact zero.
    pub fn is_pinned(&self) -> bool {
        self.inv_mass <= PIN_EPSILON
    }

    /// Advances the position by one Verlet step. Pinned particles are
    /// skipped entirely.
    ///
    /// The 1.99/0.99 coefficient pair keeps 99% of the implicit
    /// velocity, folding 1% damping per step into the update.
    pub fn integrate(&mut self, dt: Scalar, gravity: Vec3, global_force: Vec3) {
        if self.is_pinned() {
            return;
        }
        let dt_sq = dt * dt;
        let new_position = self.position * 1.99 - self.previous_position * 0.99
            + (self.force + global_force) * dt_sq * self.inv_mass
            + gravity * dt_sq;
        self.previous_position = self.position;
        self.position = new_position;
    }
}
