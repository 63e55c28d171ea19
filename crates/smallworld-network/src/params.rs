//! Generation parameters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallworld_topology::{Dimension, Enumeration, DEFAULT_NEIGHBORHOOD_RADIUS};

use crate::error::{Error, Result};

/// Long-range attachment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    /// Small-world links, biased toward geometrically closer targets.
    #[default]
    DistanceBiased,
    /// Preferential (Yule) links, biased toward targets with high in-degree.
    DegreeBiased,
}

impl AttachmentType {
    /// Name used in cache keys and configuration.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DistanceBiased => "distance_biased",
            Self::DegreeBiased => "degree_biased",
        }
    }
}

impl std::fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance_biased" | "small_world" | "kleinberg" => Ok(Self::DistanceBiased),
            "degree_biased" | "preferential" | "yule" => Ok(Self::DegreeBiased),
            other => Err(Error::parameter(
                "attachment",
                format!("unknown attachment type {:?}", other),
            )),
        }
    }
}

/// Everything that shapes a generated network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Axis sizes of the lattice
    pub dimensions: Vec<usize>,
    /// Probability that a cell keeps its node active
    pub density: f64,
    /// Long-range attachment model
    pub attachment: AttachmentType,
    /// Degree-biased passes; each gives every active node one new out-link
    pub num_out_links: usize,
    /// Cells within this distance are linked by the base lattice
    pub neighborhood_radius: usize,
    /// Make every long-range link bidirectional
    pub real_connection: bool,
    /// Distance-biased bin weight is `population / d^cluster_exponent`
    pub cluster_exponent: f64,
    /// Distance-biased passes; each gives every active node one new out-link
    pub far_connections: usize,
    /// Degree-biased bucket weight is `population * k^preference_exponent`
    pub preference_exponent: f64,
    /// Neighbor shell enumeration used for the base lattice
    pub enumeration: Enumeration,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            dimensions: vec![100, 100],
            density: 0.6,
            attachment: AttachmentType::DistanceBiased,
            num_out_links: 1,
            neighborhood_radius: DEFAULT_NEIGHBORHOOD_RADIUS,
            real_connection: true,
            cluster_exponent: 1.0,
            far_connections: 1,
            preference_exponent: 2.0,
            enumeration: Enumeration::Full,
        }
    }
}

impl NetworkParams {
    /// Default parameters over the given lattice.
    pub fn new(dimensions: impl Into<Vec<usize>>) -> Self {
        Self {
            dimensions: dimensions.into(),
            ..Self::default()
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_attachment(mut self, attachment: AttachmentType) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn with_out_links(mut self, num_out_links: usize) -> Self {
        self.num_out_links = num_out_links;
        self
    }

    pub fn with_neighborhood_radius(mut self, radius: usize) -> Self {
        self.neighborhood_radius = radius;
        self
    }

    pub fn with_real_connection(mut self, real_connection: bool) -> Self {
        self.real_connection = real_connection;
        self
    }

    pub fn with_far_connections(mut self, far_connections: usize) -> Self {
        self.far_connections = far_connections;
        self
    }

    pub fn with_cluster_exponent(mut self, exponent: f64) -> Self {
        self.cluster_exponent = exponent;
        self
    }

    pub fn with_preference_exponent(mut self, exponent: f64) -> Self {
        self.preference_exponent = exponent;
        self
    }

    pub fn with_enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = enumeration;
        self
    }

    /// Check every parameter and derive the lattice dimension.
    pub fn validate(&self) -> Result<Dimension> {
        let dim = Dimension::new(self.dimensions.clone())?;

        if !(0.0..=1.0).contains(&self.density) {
            return Err(Error::parameter(
                "density",
                format!("{} is outside [0, 1]", self.density),
            ));
        }
        if self.num_out_links == 0 {
            return Err(Error::parameter("num_out_links", "must be at least 1"));
        }
        if self.neighborhood_radius == 0 {
            return Err(Error::parameter("neighborhood_radius", "must be at least 1"));
        }
        if self.far_connections == 0 {
            return Err(Error::parameter("far_connections", "must be at least 1"));
        }
        for (name, value) in [
            ("cluster_exponent", self.cluster_exponent),
            ("preference_exponent", self.preference_exponent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::parameter(name, format!("{} is not a finite non-negative number", value)));
            }
        }

        Ok(dim)
    }
}
