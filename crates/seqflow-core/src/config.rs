//! Materialization tuning that downstream crates can serialize/deserialize.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static GLOBAL: Lazy<BufferConfig> = Lazy::new(|| {
    let cfg = BufferConfig::from_env();
    match cfg.validate() {
        Ok(()) => cfg,
        Err(_) => BufferConfig::default(),
    }
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Capacity of the first buffer on the first append.
    pub starting_capacity: usize,

    /// The first buffer is doubled until it reaches this size; past it,
    /// new buffers are chained instead of resizing.
    pub resize_limit: usize,

    /// Hard cap on the number of items a growable buffer accepts.
    pub max_capacity: usize,

    /// Bucket count of a fresh dedup set.
    pub set_initial_capacity: usize,

    /// A set grows once `len >= buckets * set_load_factor`.
    pub set_load_factor: f64,

    /// Maximum number of idle buffers a pool keeps for reuse.
    pub pool_max_retained: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            starting_capacity: 4,
            resize_limit: 8,
            max_capacity: usize::MAX,
            set_initial_capacity: 7,
            set_load_factor: 1.0,
            pool_max_retained: 16,
        }
    }
}

impl BufferConfig {
    /// Process-wide configuration, read once from the environment.
    /// Falls back to defaults if the environment holds an invalid combination.
    pub fn global() -> &'static BufferConfig {
        &GLOBAL
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQFLOW_STARTING_CAPACITY`
    /// - `SEQFLOW_RESIZE_LIMIT`
    /// - `SEQFLOW_MAX_CAPACITY`
    /// - `SEQFLOW_SET_INITIAL_CAPACITY`
    /// - `SEQFLOW_SET_LOAD_FACTOR`
    /// - `SEQFLOW_POOL_MAX_RETAINED`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SEQFLOW_STARTING_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.starting_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("SEQFLOW_RESIZE_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.resize_limit = v;
            }
        }

        if let Ok(s) = std::env::var("SEQFLOW_MAX_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("SEQFLOW_SET_INITIAL_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.set_initial_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("SEQFLOW_SET_LOAD_FACTOR") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.set_load_factor = v;
            }
        }

        if let Ok(s) = std::env::var("SEQFLOW_POOL_MAX_RETAINED") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.pool_max_retained = v;
            }
        }

        cfg
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_capacity == 0 {
            return Err(Error::Config("starting_capacity must be at least 1".into()));
        }
        if self.resize_limit < self.starting_capacity {
            return Err(Error::Config(format!(
                "resize_limit ({}) must not be below starting_capacity ({})",
                self.resize_limit, self.starting_capacity
            )));
        }
        if self.set_initial_capacity == 0 {
            return Err(Error::Config("set_initial_capacity must be at least 1".into()));
        }
        if !(self.set_load_factor > 0.0 && self.set_load_factor <= 1.0) {
            return Err(Error::Config(format!(
                "set_load_factor must be in (0, 1], got {}",
                self.set_load_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = BufferConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.starting_capacity, 4);
        assert_eq!(cfg.resize_limit, 8);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = BufferConfig::from_json(r#"{ "resize_limit": 32 }"#).unwrap();
        assert_eq!(cfg.resize_limit, 32);
        assert_eq!(cfg.starting_capacity, 4);
        assert_eq!(cfg.max_capacity, usize::MAX);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = BufferConfig::from_json(r#"{ "starting_capacity": 16, "resize_limit": 8 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = BufferConfig::from_json(r#"{ "set_load_factor": 1.5 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = BufferConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = BufferConfig {
            max_capacity: 1000,
            ..BufferConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(BufferConfig::from_json(&json).unwrap(), cfg);
    }
}
