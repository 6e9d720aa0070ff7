pub mod predators;
pub mod run;

use std::fs;

use forage_core::GridLandscape;
use forage_simulation::SimConfig;

use crate::SetupArgs;

/// Load the landscape file, or build the uniform grid when none is given.
fn load_landscape(setup: &SetupArgs) -> Result<GridLandscape, String> {
    match &setup.landscape {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            GridLandscape::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => GridLandscape::uniform(setup.width, setup.height, setup.quality)
            .map_err(|e| e.to_string()),
    }
}

/// Read the config file (if any) and apply the command-line overrides.
fn build_config(setup: &SetupArgs) -> Result<SimConfig, String> {
    let mut config = match &setup.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            SimConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = setup.seed {
        config = config.with_seed(seed);
    }
    if let Some(steps) = setup.steps {
        config = config.with_num_steps(steps);
    }
    if let Some(size) = setup.interval_size {
        config = config.with_interval_size(size);
    }
    if let Some(duration) = setup.duration {
        config = config.with_predator_duration(duration);
    }
    if let Some(randomness) = setup.randomness {
        config = config.with_randomness(randomness);
    }
    if let Some(pressure) = setup.pressure {
        config = config.with_predation_pressure(pressure);
    }
    if let Some(border) = setup.border {
        config = config.with_border(border);
    }
    if setup.introduced {
        config = config.with_introduced(true);
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
