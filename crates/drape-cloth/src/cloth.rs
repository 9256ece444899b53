//! The cloth: particle grid, constraints, BVH, and the solver loop.

use drape_bvh::Bvh;
use drape_math::{Aabb, Vec3};
use drape_types::{ColliderId, DrapeError, DrapeResult, ParticleId, Scalar};
use tracing::{debug, trace};

use crate::collider::SphereCollider;
use crate::config::SimConfig;
use crate::constraint::Constraint;
use crate::params::ClothParams;
use crate::particle::Particle;
use crate::topology::GridTopology;

/// A deformable particle-and-constraint mesh.
///
/// Owns a fixed `width x height` grid of particles, one structural
/// constraint per adjacent horizontal and vertical pair, a BVH built
/// once over the grid and refit every solver iteration, and the set of
/// registered collider spheres.
///
/// [`Cloth::update`] accumulates wall-clock time and advances the
/// simulation in fixed steps; see the solver loop in `step` for the
/// phase ordering contract.
pub struct Cloth {
    grid_width: usize,
    grid_height: usize,

    resting_distance: Scalar,
    max_distance: Scalar,
    sqr_resting_distance: Scalar,

    particles: Vec<Particle>,
    constraints: Vec<Constraint>,
    bvh: Bvh,
    topology: GridTopology,

    colliders: Vec<(ColliderId, SphereCollider)>,
    next_collider_id: u32,

    config: SimConfig,
    accumulator: Scalar,

    // Scratch buffers reused across steps.
    position_scratch: Vec<Vec3>,
    pair_scratch: Vec<(ParticleId, ParticleId)>,
}

impl Cloth {
    /// Builds a cloth from validated parameters.
    ///
    /// Particles are seeded on a regular grid centered on
    /// `params.center`, spanning `params.basis.right` (grid x) and
    /// `params.basis.up` (grid y). Structural constraints link each
    /// particle to its left and up neighbours with rest length equal
    /// to the seeded separation and max length rest + max_stretch.
    pub fn new(params: &ClothParams, config: SimConfig) -> DrapeResult<Self> {
        params.validate()?;
        config.validate()?;

        let cols = params.grid_width;
        let rows = params.grid_height;
        let spacing = params.spacing;

        let origin = params.center
            - params.basis.right * (0.5 * spacing * (cols - 1) as Scalar)
            - params.basis.up * (0.5 * spacing * (rows - 1) as Scalar);

        let mut particles = Vec::with_capacity(cols * rows);
        let mut constraints = Vec::with_capacity(cols * (rows - 1) + rows * (cols - 1));

        for x in 0..cols {
            for y in 0..rows {
                let position = origin
                    + params.basis.right * (x as Scalar * spacing)
                    + params.basis.up * (y as Scalar * spacing);
                particles.push(Particle::new(position, Vec3::ZERO, params.particle_mass));

                let current = ParticleId((x * rows + y) as u32);

                if x > 0 {
                    let left = ParticleId((current.0 as usize - rows) as u32);
                    let rest = particles[left.index()]
                        .position()
                        .distance(particles[current.index()].position());
                    constraints.push(Constraint::new(
                        left,
                        current,
                        rest,
                        rest + params.max_stretch,
                        1.0,
                    ));
                }
                if y > 0 {
                    let up = ParticleId(current.0 - 1);
                    let rest = particles[up.index()]
                        .position()
                        .distance(particles[current.index()].position());
                    constraints.push(Constraint::new(
                        up,
                        current,
                        rest,
                        rest + params.max_stretch,
                        1.0,
                    ));
                }
            }
        }

        let positions: Vec<Vec3> = particles.iter().map(|p| p.position()).collect();
        let bvh = Bvh::build(&positions);
        let topology = GridTopology::build(cols, rows);

        debug!(
            particles = particles.len(),
            constraints = constraints.len(),
            bvh_nodes = bvh.node_count(),
            "cloth constructed"
        );

        Ok(Self {
            grid_width: cols,
            grid_height: rows,
            resting_distance: spacing,
            max_distance: spacing + params.max_stretch,
            sqr_resting_distance: spacing * spacing,
            particles,
            constraints,
            bvh,
            topology,
            colliders: Vec::new(),
            next_collider_id: 0,
            config,
            accumulator: 0.0,
            position_scratch: positions,
            pair_scratch: Vec::new(),
        })
    }

    // ─── Simulation ───────────────────────────────────────────

    /// Advances the simulation by `dt` seconds of wall-clock time.
    ///
    /// Time is accumulated and consumed in fixed steps of
    /// `config.fixed_timestep`; a call may execute zero or several
    /// steps. `dt` must be non-negative.
    pub fn update(&mut self, dt: Scalar) {
        debug_assert!(dt >= 0.0, "delta time must be non-negative");
        self.accumulator += dt.max(0.0);
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            self.step(self.config.fixed_timestep);
        }
    }

    /// One fixed step: integrate, then `iterations` relaxation passes.
    ///
    /// Each pass runs structural constraints, then self-collision,
    /// then sphere resolution, refitting the BVH whenever positions
    /// may have changed before a query depends on it. This ordering is
    /// a behavioral contract; reordering changes the simulation.
    fn step(&mut self, dt: Scalar) {
        let gravity = self.config.gravity;
        let global_force = self.config.global_force;
        for particle in &mut self.particles {
            particle.integrate(dt, gravity, global_force);
        }

        for _ in 0..self.config.iterations {
            self.refit_bvh();

            for k in 0..self.constraints.len() {
                let constraint = self.constraints[k];
                constraint.satisfy(&mut self.particles);
            }

            self.relax_self_collisions();

            self.refit_bvh();
            self.resolve_colliders();
        }
    }

    fn refit_bvh(&mut self) {
        self.position_scratch.clear();
        self.position_scratch
            .extend(self.particles.iter().map(|p| p.position()));
        self.bvh.refit(&self.position_scratch);
    }

    /// Discovers particles that have drifted within the resting
    /// distance of each other and relaxes a transient repulsion
    /// constraint per discovered pair.
    fn relax_self_collisions(&mut self) {
        self.pair_scratch.clear();

        let half_extent = Vec3::splat(self.resting_distance);
        for (k, particle) in self.particles.iter().enumerate() {
            let id = ParticleId(k as u32);
            let query = Aabb::new(
                particle.position() - half_extent,
                particle.position() + half_extent,
            );
            for other in self.bvh.find_within_box(&query) {
                if other == id {
                    continue;
                }
                let diff = particle.position() - self.particles[other.index()].position();
                if diff.length_squared() <= self.sqr_resting_distance {
                    self.pair_scratch.push((id, other));
                }
            }
        }

        trace!(pairs = self.pair_scratch.len(), "self-collision pairs");

        // Each contact is discovered from both endpoints and relaxed
        // twice per pass. The doubled correction is part of the tuned
        // collision stiffness; deduplicating softens the response.
        for &(a, b) in &self.pair_scratch {
            Constraint::new(a, b, self.max_distance, self.max_distance, 1.0)
                .satisfy(&mut self.particles);
        }
    }

    /// Pushes particles strictly inside a registered sphere radially
    /// out to its surface, refitting the BVH after any sphere that
    /// moved particles so the next sphere queries accurate boxes.
    fn resolve_colliders(&mut self) {
        for k in 0..self.colliders.len() {
            let (_, sphere) = self.colliders[k];
            let hits = self.bvh.find_within_sphere(sphere.center, sphere.radius);
            if hits.is_empty() {
                continue;
            }

            let sqr_radius = sphere.radius * sphere.radius;
            let mut moved = false;
            for id in hits {
                let particle = &mut self.particles[id.index()];
                let diff = particle.position() - sphere.center;
                let sqr_dist = diff.length_squared();
                if sqr_dist >= sqr_radius {
                    continue;
                }
                if sqr_dist > 0.0 {
                    let dist = sqr_dist.sqrt();
                    particle
                        .set_position(particle.position() + (diff / dist) * (sphere.radius - dist));
                } else {
                    // Exactly at the center there is no direction to
                    // push along; lift by one radius.
                    particle.set_position(particle.position() + Vec3::new(0.0, sphere.radius, 0.0));
                }
                moved = true;
            }

            if moved {
                self.refit_bvh();
            }
        }
    }

    // ─── Grid access ──────────────────────────────────────────

    /// Grid dimensions as (width, height).
    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    /// Id of the particle at grid coordinate (x, y).
    ///
    /// # Panics
    /// Panics if the coordinate is out of range: silent corruption is
    /// worse than a hard stop in simulation core code.
    pub fn particle_id_at(&self, x: usize, y: usize) -> ParticleId {
        assert!(
            x < self.grid_width && y < self.grid_height,
            "grid coordinate ({x}, {y}) out of range for {}x{} cloth",
            self.grid_width,
            self.grid_height
        );
        ParticleId((x * self.grid_height + y) as u32)
    }

    /// The particle at grid coordinate (x, y). Panics when out of range.
    pub fn particle_at(&self, x: usize, y: usize) -> &Particle {
        let id = self.particle_id_at(x, y);
        &self.particles[id.index()]
    }

    /// Mutable access to the particle at (x, y), for pinning and
    /// repositioning anchors. Panics when out of range.
    pub fn particle_at_mut(&mut self, x: usize, y: usize) -> &mut Particle {
        let id = self.particle_id_at(x, y);
        &mut self.particles[id.index()]
    }

    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.particles[id.index()]
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Resting distance between adjacent grid particles.
    pub fn resting_distance(&self) -> Scalar {
        self.resting_distance
    }

    /// Maximum allowed separation (resting distance + stretch).
    pub fn max_distance(&self) -> Scalar {
        self.max_distance
    }

    // ─── Colliders ────────────────────────────────────────────

    /// Registers a collider sphere and returns its handle.
    pub fn add_collider(&mut self, sphere: SphereCollider) -> ColliderId {
        let id = ColliderId(self.next_collider_id);
        self.next_collider_id += 1;
        self.colliders.push((id, sphere));
        id
    }

    /// Replaces a registered collider (typically to move it).
    pub fn set_collider(&mut self, id: ColliderId, sphere: SphereCollider) -> DrapeResult<()> {
        match self.colliders.iter_mut().find(|(cid, _)| *cid == id) {
            Some((_, slot)) => {
                *slot = sphere;
                Ok(())
            }
            None => Err(DrapeError::ColliderNotRegistered(id)),
        }
    }

    /// The current state of a registered collider.
    pub fn collider(&self, id: ColliderId) -> Option<&SphereCollider> {
        self.colliders
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, sphere)| sphere)
    }

    /// Detaches a collider, returning its last state.
    ///
    /// Detaching an id that was never registered (or already removed)
    /// is an explicit error, never a silent no-op.
    pub fn remove_collider(&mut self, id: ColliderId) -> DrapeResult<SphereCollider> {
        match self.colliders.iter().position(|(cid, _)| *cid == id) {
            Some(index) => Ok(self.colliders.remove(index).1),
            None => Err(DrapeError::ColliderNotRegistered(id)),
        }
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    // ─── Render data ──────────────────────────────────────────

    /// Current world position of every particle, in grid index order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position())
    }

    /// Smooth per-vertex normals derived from adjacent-triangle
    /// winding, for a renderer.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let positions: Vec<Vec3> = self.positions().collect();
        self.topology.vertex_normals(&positions)
    }

    /// Triangle index buffer over the particle grid.
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.topology.indices()
    }

    /// The fixed render topology.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// The spatial index, refit as of the last completed solver phase.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    // ─── Configuration ────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable solver configuration, e.g. to animate the global force.
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }
}
