//! CLI command implementations.

use std::time::Instant;

use drape_cloth::Cloth;
use drape_types::Scalar;
use tracing::info;

use crate::scenario::ScenarioConfig;

fn load_scenario(config_path: Option<&str>) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(ScenarioConfig::from_toml(&text)?)
        }
        None => Ok(ScenarioConfig::default()),
    }
}

/// Run a headless scenario and print summary statistics.
pub fn simulate(
    config_path: Option<&str>,
    steps_override: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario = load_scenario(config_path)?;
    if let Some(steps) = steps_override {
        scenario.steps = steps;
    }
    scenario.validate()?;

    println!("Drape Simulation");
    println!("────────────────");

    let mut cloth = Cloth::new(&scenario.cloth, scenario.sim.clone())?;
    for &[x, y] in &scenario.pinned {
        cloth.particle_at_mut(x, y).pin();
    }
    for &sphere in &scenario.spheres {
        cloth.add_collider(sphere);
    }

    println!(
        "Cloth:     {}x{} ({} particles, {} constraints)",
        scenario.cloth.grid_width,
        scenario.cloth.grid_height,
        cloth.particle_count(),
        cloth.constraint_count(),
    );
    println!("Pinned:    {}", scenario.pinned.len());
    println!("Colliders: {}", cloth.collider_count());
    println!("Steps:     {}", scenario.steps);
    println!();

    let initial: Vec<_> = cloth.positions().collect();
    let step = cloth.config().fixed_timestep;

    let start = Instant::now();
    for k in 0..scenario.steps {
        cloth.update(step);
        if (k + 1) % 60 == 0 {
            info!(step = k + 1, "simulated {}s", (k + 1) as Scalar * step);
        }
    }
    let wall = start.elapsed().as_secs_f64();

    let mut min_y = Scalar::INFINITY;
    let mut max_y = Scalar::NEG_INFINITY;
    let mut max_displacement: Scalar = 0.0;
    for (pos, start_pos) in cloth.positions().zip(&initial) {
        min_y = min_y.min(pos.y);
        max_y = max_y.max(pos.y);
        max_displacement = max_displacement.max(pos.distance(*start_pos));
    }

    println!("Wall time:     {wall:.3}s");
    println!(
        "Avg step:      {:.3}ms",
        wall * 1000.0 / scenario.steps as f64
    );
    println!("Y range:       [{min_y:.4}, {max_y:.4}]");
    println!("Max displace:  {max_displacement:.4}m");

    Ok(())
}

/// Validate a scenario config file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Drape Validator");
    println!("───────────────");

    let text = std::fs::read_to_string(path)?;
    let scenario = ScenarioConfig::from_toml(&text)?;
    scenario.validate()?;

    println!(
        "Config is valid: {}x{} cloth, {} pinned, {} spheres, {} steps.",
        scenario.cloth.grid_width,
        scenario.cloth.grid_height,
        scenario.pinned.len(),
        scenario.spheres.len(),
        scenario.steps,
    );
    Ok(())
}
