//! Scenario configuration for headless runs.

use drape_cloth::{ClothParams, SimConfig, SphereCollider};
use drape_math::Vec3;
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// A complete headless scenario: cloth, solver settings, anchors,
/// colliders, and run length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub cloth: ClothParams,
    pub sim: SimConfig,

    /// Grid coordinates to pin before simulating.
    pub pinned: Vec<[usize; 2]>,

    /// Collider spheres registered with the cloth.
    pub spheres: Vec<SphereCollider>,

    /// Number of fixed steps to run.
    pub steps: u32,
}

impl Default for ScenarioConfig {
    /// The built-in scenario: a sheet pinned at its top corners,
    /// draping over a sphere below it.
    fn default() -> Self {
        let cloth = ClothParams {
            grid_width: 24,
            grid_height: 24,
            spacing: 1.0,
            max_stretch: 0.1,
            ..ClothParams::default()
        };
        let top = cloth.grid_height - 1;
        Self {
            pinned: vec![[0, top], [cloth.grid_width - 1, top]],
            spheres: vec![SphereCollider::new(Vec3::new(0.0, -6.0, 2.0), 4.0)],
            steps: 240,
            cloth,
            sim: SimConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parses a scenario from TOML.
    pub fn from_toml(text: &str) -> DrapeResult<Self> {
        toml::from_str(text).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Validates everything a `Cloth` construction would, plus the
    /// scenario-level fields.
    pub fn validate(&self) -> DrapeResult<()> {
        self.cloth.validate()?;
        self.sim.validate()?;

        for &[x, y] in &self.pinned {
            if x >= self.cloth.grid_width || y >= self.cloth.grid_height {
                return Err(DrapeError::InvalidConfig(format!(
                    "pinned coordinate ({x}, {y}) out of range for {}x{} cloth",
                    self.cloth.grid_width, self.cloth.grid_height
                )));
            }
        }
        for sphere in &self.spheres {
            if !(sphere.radius > 0.0) || !sphere.radius.is_finite() {
                return Err(DrapeError::InvalidConfig(format!(
                    "sphere radius must be positive and finite, got {}",
                    sphere.radius
                )));
            }
        }
        if self.steps == 0 {
            return Err(DrapeError::InvalidConfig("steps must be at least 1".into()));
        }
        Ok(())
    }
}
