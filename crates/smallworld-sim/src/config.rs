//! Simulation settings read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use smallworld_network::{AttachmentType, NetworkParams};
use smallworld_routing::RoutingSimulation;
use thiserror::Error;

/// A variable that could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected text or json, got {:?}", other)),
        }
    }
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub params: NetworkParams,
    pub cache_dir: PathBuf,
    pub simulation: RoutingSimulation,
    /// Fixed generator seed; entropy when absent
    pub seed: Option<u64>,
    pub report: ReportFormat,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            params: NetworkParams::default(),
            cache_dir: PathBuf::from("cache"),
            simulation: RoutingSimulation::default(),
            seed: None,
            report: ReportFormat::Text,
        }
    }
}

impl SimConfig {
    /// Read config from `SMALLWORLD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read config through `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let params = &mut config.params;

        if let Some(value) = lookup("SMALLWORLD_DIMENSIONS") {
            params.dimensions = parse_dimensions(&value)?;
        }
        if let Some(density) = parsed(&lookup, "SMALLWORLD_DENSITY")? {
            params.density = density;
        }
        if let Some(value) = lookup("SMALLWORLD_ATTACHMENT") {
            params.attachment = value.parse::<AttachmentType>().map_err(|e| ConfigError::Invalid {
                var: "SMALLWORLD_ATTACHMENT",
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(out_links) = parsed(&lookup, "SMALLWORLD_OUT_LINKS")? {
            params.num_out_links = out_links;
        }
        if let Some(radius) = parsed(&lookup, "SMALLWORLD_RADIUS")? {
            params.neighborhood_radius = radius;
        }
        if let Some(real) = parsed(&lookup, "SMALLWORLD_REAL_CONNECTION")? {
            params.real_connection = real;
        }

        if let Some(dir) = lookup("SMALLWORLD_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(messages) = parsed(&lookup, "SMALLWORLD_MESSAGES")? {
            config.simulation.messages = messages;
        }
        if let Some(max_hops) = parsed(&lookup, "SMALLWORLD_MAX_HOPS")? {
            config.simulation.max_hops = max_hops;
        }
        config.seed = parsed(&lookup, "SMALLWORLD_SEED")?;
        if let Some(report) = parsed(&lookup, "SMALLWORLD_REPORT")? {
            config.report = report;
        }

        Ok(config)
    }
}

fn parsed<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_dimensions(value: &str) -> Result<Vec<usize>, ConfigError> {
    value
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Invalid {
            var: "SMALLWORLD_DIMENSIONS",
            value: value.to_string(),
            reason: e.to_string(),
        })
}
