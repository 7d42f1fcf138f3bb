//! Command-line front end for the relief supply planner.
//!
//! Runs exactly one delivery per invocation and prints the result.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the path given as the first argument, else
//!    `relief-config.yaml`, else defaults
//! 3. Load the dataset, or build the demo world when none is configured
//! 4. Apply weather overrides, route blocks and fleet repositioning
//! 5. Resolve the strategy and heuristic names
//! 6. Deliver to the configured demand point and print the report

mod config;
mod error;
mod report;

use std::path::{Path, PathBuf};

use relief_planner::deliver;
use relief_world::{World, demo_world, load_dataset};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::PlannerConfig;
use crate::error::CliError;

/// Config file looked up in the working directory when no path is given.
const DEFAULT_CONFIG: &str = "relief-config.yaml";

/// Application entry point.
///
/// A delivery that finds no path or no vehicle is reported, not treated as
/// a failure of the program.
///
/// # Errors
///
/// Returns an error if the config, the dataset or the request is invalid.
fn main() -> Result<(), CliError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // 2. Load configuration.
    let config = load_config(std::env::args().nth(1).map(PathBuf::from))?;
    info!(
        strategy = config.search.strategy,
        heuristic = config.search.heuristic.as_deref().unwrap_or("default"),
        destination = config.destination,
        "Configuration loaded"
    );

    // 3-4. Build and prepare the world.
    let mut world = load_world(&config)?;
    prepare_world(&mut world, &config)?;

    // 5. Resolve names.
    let request = config.search.to_request()?;

    // 6. Deliver.
    let destination = world
        .demand_points
        .get(config.destination)
        .map(|d| d.position)
        .ok_or(CliError::Destination {
            index: config.destination,
            count: world.demand_points.len(),
        })?;

    match deliver(&mut world, destination, &request) {
        Ok(outcome) => {
            print!("{}", report::render(&outcome));
            Ok(())
        }
        Err(e) if e.is_delivery_failure() => {
            warn!(error = %e, "No delivery made");
            println!("No delivery: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Load configuration from `explicit`, else the default file if present,
/// else defaults.
fn load_config(explicit: Option<PathBuf>) -> Result<PlannerConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(PlannerConfig::from_file(&path)?);
    }
    let path = Path::new(DEFAULT_CONFIG);
    if path.exists() {
        Ok(PlannerConfig::from_file(path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = PlannerConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Load the configured dataset, or the demo world.
fn load_world(config: &PlannerConfig) -> Result<World, CliError> {
    if let Some(path) = &config.dataset {
        let world = load_dataset(path)?;
        info!(
            dataset = %path.display(),
            nodes = world.graph.node_count(),
            vehicles = world.vehicles.len(),
            "Dataset loaded"
        );
        Ok(world)
    } else {
        let (world, sites) = demo_world()?;
        info!(depot = %sites.depot, "Demo world created");
        Ok(world)
    }
}

/// Apply the caller-side edits from the config.
fn prepare_world(world: &mut World, config: &PlannerConfig) -> Result<(), CliError> {
    for record in &config.weather {
        world.set_weather_for_node(record.node, record.condition)?;
    }
    world
        .environment
        .set_blocked_routes(&config.search.blocked_routes)?;
    if config.reposition_vehicles {
        world.reposition_vehicles_to_start();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use relief_types::{NodeId, Position, WeatherCondition};
    use relief_world::dataset::WeatherRecord;

    use super::*;

    #[test]
    fn demo_world_is_used_without_dataset() {
        let world = load_world(&PlannerConfig::default());
        assert!(world.is_ok());
        let Ok(world) = world else { return };
        assert_eq!(world.graph.node_count(), 9);
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let config = PlannerConfig {
            dataset: Some(PathBuf::from("/nonexistent/dataset.json")),
            ..PlannerConfig::default()
        };
        assert!(matches!(load_world(&config), Err(CliError::World { .. })));
    }

    #[test]
    fn prepare_applies_weather_and_blocks() {
        let Ok((mut world, _)) = demo_world() else { return };
        let mut config = PlannerConfig::default();
        config.weather.push(WeatherRecord {
            node: NodeId(1),
            condition: WeatherCondition::Storm,
        });
        config.search.blocked_routes.push("3,6".to_owned());

        assert!(prepare_world(&mut world, &config).is_ok());
        assert_eq!(
            world.environment.condition(Position::new(1.0, 0.0)),
            Some(WeatherCondition::Storm)
        );
        assert!(world.environment.is_route_blocked(NodeId(6), NodeId(3)));
    }

    #[test]
    fn bad_route_token_is_an_error() {
        let Ok((mut world, _)) = demo_world() else { return };
        let mut config = PlannerConfig::default();
        config.search.blocked_routes.push("3-6".to_owned());
        assert!(matches!(
            prepare_world(&mut world, &config),
            Err(CliError::World { .. })
        ));
    }
}
