//! Construction-time cloth parameters.

use drape_math::Vec3;
use drape_types::{DrapeError, DrapeResult, Scalar};
use serde::{Deserialize, Serialize};

/// Orthonormal frame used to seed the initial particle grid.
///
/// Particles are laid out along `right` (grid x) and `up` (grid y);
/// `forward` completes the frame for callers that orient colliders
/// relative to the sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
        }
    }
}

/// Parameters for building a cloth grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothParams {
    /// Particles along the `right` axis. Must be at least 2.
    pub grid_width: usize,

    /// Particles along the `up` axis. Must be at least 2.
    pub grid_height: usize,

    /// Resting distance between adjacent particles (meters).
    pub spacing: Scalar,

    /// Mass per particle (kg). Zero would pin the whole sheet, so it
    /// must be positive; pin individual particles instead.
    pub particle_mass: Scalar,

    /// Extra separation allowed beyond the resting distance before a
    /// structural constraint pulls back.
    pub max_stretch: Scalar,

    /// World-space center of the seeded grid.
    pub center: Vec3,

    /// Frame the grid is seeded in.
    pub basis: Basis,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            grid_width: 16,
            grid_height: 16,
            spacing: 1.0,
            particle_mass: 1.0,
            max_stretch: 0.1,
            center: Vec3::ZERO,
            basis: Basis::default(),
        }
    }
}

impl ClothParams {
    pub fn validate(&self) -> DrapeResult<()> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(DrapeError::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.spacing > 0.0) || !self.spacing.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "particle spacing must be positive and finite, got {}",
                self.spacing
            )));
        }
        if !(self.particle_mass > 0.0) || !self.particle_mass.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {}",
                self.particle_mass
            )));
        }
        if !(self.max_stretch >= 0.0) || !self.max_stretch.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "max stretch must be non-negative and finite, got {}",
                self.max_stretch
            )));
        }
        if self.basis.right.length_squared() == 0.0 || self.basis.up.length_squared() == 0.0 {
            return Err(DrapeError::InvalidConfig(
                "basis right/up vectors must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
