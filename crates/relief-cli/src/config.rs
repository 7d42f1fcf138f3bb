//! Configuration loading and typed config structures for the relief CLI.
//!
//! The configuration lives in `relief-config.yaml` (or the file named on
//! the command line). Every field has a default, so an empty file, or no
//! file at all, runs a breadth-first delivery to the first demand point of
//! the built-in demo world.
//!
//! ```yaml
//! dataset: data/coastal-district.json
//! destination: 0
//! reposition_vehicles: false
//! search:
//!   strategy: a_star
//!   heuristic: combined
//!   terrain: Land
//!   max_depth_limit: 50
//!   blocked_routes: ["1,3"]
//!   terrain_filter: true
//!   weather_costs: true
//! weather:
//!   - node: 3
//!     condition: Snowy
//! ```

use std::path::{Path, PathBuf};

use relief_planner::{
    DEFAULT_MAX_DEPTH_LIMIT, Heuristic, PlannerError, SearchRequest, Strategy, TraversalRules,
};
use relief_types::Transportation;
use relief_world::dataset::WeatherRecord;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    /// JSON dataset to load. The built-in demo world is used when unset.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Index of the demand point to deliver to.
    #[serde(default)]
    pub destination: usize,

    /// Weather changes applied before the search.
    #[serde(default)]
    pub weather: Vec<WeatherRecord>,

    /// Send every vehicle back to the depot before the search.
    #[serde(default)]
    pub reposition_vehicles: bool,
}

impl PlannerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `RELIEF_DATASET` overrides `dataset`
    /// - `RELIEF_STRATEGY` overrides `search.strategy`
    /// - `RELIEF_HEURISTIC` overrides `search.heuristic`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document parses as null rather than an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("RELIEF_DATASET") {
            self.dataset = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("RELIEF_STRATEGY") {
            self.search.strategy = val;
        }
        if let Some(val) = lookup("RELIEF_HEURISTIC") {
            self.search.heuristic = Some(val);
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Strategy name: `bfs`, `dfs`, `ids`, `ucs`, `greedy` or `a_star`.
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Heuristic name for `greedy` and `a_star`.
    #[serde(default)]
    pub heuristic: Option<String>,

    /// Terrain the delivering vehicles travel on.
    #[serde(default)]
    pub terrain: Transportation,

    /// Iterative deepening tries every depth limit below this one.
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: usize,

    /// Banned routes as `"idA,idB"` tokens.
    #[serde(default)]
    pub blocked_routes: Vec<String>,

    /// Restrict nodes and vehicles to the configured terrain.
    #[serde(default = "default_true")]
    pub terrain_filter: bool,

    /// Scale edge costs by the weather.
    #[serde(default = "default_true")]
    pub weather_costs: bool,
}

impl SearchConfig {
    /// Resolve the names into a typed request.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::UnknownStrategy`] or
    /// [`PlannerError::UnknownHeuristic`] for unregistered names.
    pub fn to_request(&self) -> Result<SearchRequest, PlannerError> {
        let strategy: Strategy = self.strategy.parse()?;
        let heuristic = self
            .heuristic
            .as_deref()
            .map(str::parse::<Heuristic>)
            .transpose()?;
        Ok(SearchRequest {
            strategy,
            heuristic,
            terrain: self.terrain,
            rules: TraversalRules {
                terrain_filter: self.terrain_filter,
                weather_costs: self.weather_costs,
            },
            max_depth_limit: self.max_depth_limit,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            heuristic: None,
            terrain: Transportation::default(),
            max_depth_limit: default_max_depth_limit(),
            blocked_routes: Vec::new(),
            terrain_filter: true,
            weather_costs: true,
        }
    }
}

fn default_strategy() -> String {
    Strategy::BreadthFirst.name().to_owned()
}

const fn default_max_depth_limit() -> usize {
    DEFAULT_MAX_DEPTH_LIMIT
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use relief_types::{NodeId, WeatherCondition};

    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = PlannerConfig::parse("").unwrap_or_else(|_| PlannerConfig {
            destination: 99,
            ..PlannerConfig::default()
        });
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.search.strategy, "bfs");
        assert_eq!(config.search.max_depth_limit, 50);
        assert!(config.search.terrain_filter);
        assert!(config.dataset.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
dataset: data/coastal-district.json
destination: 1
reposition_vehicles: true
search:
  strategy: a_star
  heuristic: time_estimate
  terrain: Air
  max_depth_limit: 12
  blocked_routes: ["1,3", "4,5"]
  terrain_filter: false
  weather_costs: false
weather:
  - node: 3
    condition: Snowy
"#;
        let result = PlannerConfig::parse(yaml);
        assert!(result.is_ok());
        let Ok(config) = result else { return };
        assert_eq!(config.dataset, Some(PathBuf::from("data/coastal-district.json")));
        assert_eq!(config.destination, 1);
        assert!(config.reposition_vehicles);
        assert_eq!(config.search.terrain, Transportation::Air);
        assert_eq!(config.search.blocked_routes.len(), 2);
        assert_eq!(
            config.weather,
            vec![WeatherRecord {
                node: NodeId(3),
                condition: WeatherCondition::Snowy,
            }]
        );

        let request = config.search.to_request();
        assert!(request.is_ok());
        let Ok(request) = request else { return };
        assert_eq!(request.strategy, Strategy::AStar);
        assert_eq!(request.heuristic, Some(Heuristic::TimeEstimate));
        assert_eq!(request.max_depth_limit, 12);
        assert!(!request.rules.terrain_filter);
        assert!(!request.rules.weather_costs);
    }

    #[test]
    fn partial_search_section_keeps_defaults() {
        let yaml = "search:\n  strategy: ucs\n";
        let config = PlannerConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.search.strategy, "ucs");
        assert_eq!(config.search.max_depth_limit, 50);
        assert!(config.search.weather_costs);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut search = SearchConfig {
            strategy: "dijkstra".to_owned(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            search.to_request(),
            Err(PlannerError::UnknownStrategy(_))
        ));

        search.strategy = "greedy".to_owned();
        search.heuristic = Some("euclid".to_owned());
        assert!(matches!(
            search.to_request(),
            Err(PlannerError::UnknownHeuristic(_))
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = PlannerConfig::default();
        config.apply_overrides(|key| match key {
            "RELIEF_DATASET" => Some("other.json".to_owned()),
            "RELIEF_STRATEGY" => Some("greedy".to_owned()),
            _ => None,
        });
        assert_eq!(config.dataset, Some(PathBuf::from("other.json")));
        assert_eq!(config.search.strategy, "greedy");
        assert!(config.search.heuristic.is_none());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = PlannerConfig::parse("search: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = PlannerConfig::from_file(Path::new("/nonexistent/relief-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
