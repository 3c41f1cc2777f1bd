//! Configuration for the geohash location store.
use crate::compute::geohash::{DEFAULT_PRECISION, MAX_PRECISION};
use serde::de::Error;

pub use geoscan_types::geo::DistanceMetric;

/// Location store configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Geohash length stored for each location
    #[serde(default = "Config::default_precision")]
    pub precision: usize,

    /// Metric used to post-filter range scan candidates
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

impl Config {
    const fn default_precision() -> usize {
        DEFAULT_PRECISION
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        assert!(
            (1..=MAX_PRECISION).contains(&precision),
            "Geohash precision must be between 1 and {}",
            MAX_PRECISION
        );

        if precision > 12 {
            log::warn!(
                "Geohash precision of {} resolves below centimeters; \
                 stored keys grow without improving query selectivity",
                precision
            );
        }

        self.precision = precision;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_PRECISION).contains(&self.precision) {
            return Err(format!(
                "Geohash precision must be between 1 and {}, got {}",
                MAX_PRECISION, self.precision
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            distance_metric: DistanceMetric::default(),
        }
    }
}
