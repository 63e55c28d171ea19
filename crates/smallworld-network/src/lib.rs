//! Smallworld Network Generation
//!
//! Builds a toroidal lattice graph and augments it with long-range links.
//!
//! # Pipeline
//!
//! 1. **Base lattice**: one node per cell, linked both ways to every cell
//!    within the neighborhood radius, then pruned so that roughly a
//!    `density` fraction of nodes stays active.
//! 2. **Attachment**: one strategy adds long-range links in place.
//!    Distance-biased attachment reproduces Kleinberg's small-world model;
//!    degree-biased attachment is a Yule-style preferential process.
//! 3. **Cache**: large networks are stored on disk keyed by their
//!    parameters and reloaded instead of rebuilt.
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces a network exactly.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use smallworld_network::{NetworkBuilder, NetworkParams, NoProgress};
//!
//! let params = NetworkParams::new(vec![5, 5])
//!     .with_density(1.0)
//!     .with_real_connection(false);
//! let mut rng = StdRng::seed_from_u64(42);
//! let network = NetworkBuilder::new(params)
//!     .build_uncached(&mut rng, &mut NoProgress)
//!     .unwrap();
//!
//! assert_eq!(network.len(), 25);
//! assert!(network.nodes().all(|n| n.out_degree() == 5));
//! ```

mod attachment;
mod build;
pub mod cache;
mod error;
mod lattice;
mod network;
mod node;
mod params;
pub mod progress;
mod select;

pub use build::{build_network, Built, CacheStatus, NetworkBuilder};
pub use cache::CacheConfig;
pub use error::{CacheError, Error, Result};
pub use lattice::build_lattice;
pub use network::Network;
pub use node::{Node, NodeId};
pub use params::{AttachmentType, NetworkParams};
pub use progress::{LogProgress, NoProgress, ProgressObserver, ProgressReport, Stage};
pub use select::select_bin;

pub use smallworld_topology::{Dimension, Enumeration, Position};
