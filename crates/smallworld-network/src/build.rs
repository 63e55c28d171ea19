//! End-to-end network construction.
//!
//! Parameters are validated first. A cache hit short-circuits the build;
//! otherwise the base lattice is built, augmented by the configured
//! attachment strategy, and written back to the cache when it is large
//! enough to be worth it.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cache::{self, CacheConfig};
use crate::error::{Error, Result};
use crate::lattice::build_lattice;
use crate::progress::{LogProgress, ProgressObserver};
use crate::{Network, NetworkParams};

/// What happened with the cache during a build.
#[derive(Debug)]
pub enum CacheStatus {
    /// Loaded from this file instead of building
    Hit(PathBuf),
    /// Built and stored at this file
    Written(PathBuf),
    /// Built and not stored (no cache configured, or too small)
    Skipped,
    /// Built, but storing it failed
    WriteFailed(Error),
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// A finished network and how the cache was involved.
#[derive(Debug)]
pub struct Built {
    pub network: Network,
    pub cache: CacheStatus,
}

/// Builds networks from a parameter set, optionally through a cache.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    params: NetworkParams,
    cache: Option<CacheConfig>,
}

impl NetworkBuilder {
    pub fn new(params: NetworkParams) -> Self {
        Self { params, cache: None }
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Build without touching the cache.
    pub fn build_uncached<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Network> {
        let mut network = build_lattice(&self.params, rng, progress)?;
        self.params.attachment.augment(&mut network, rng, progress)?;
        Ok(network)
    }

    /// Load from the cache or build, then store if large enough.
    ///
    /// Cache read failures fall back to a fresh build. Write failures are
    /// reported in [`Built::cache`] and do not fail the build.
    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Built> {
        let dim = self.params.validate()?;

        let path = self.cache.as_ref().map(|c| c.path_for(&self.params));
        if let Some(path) = &path {
            match cache::read(path, &self.params) {
                Ok(Some(network)) => {
                    info!("Loaded {} network from {}", dim, path.display());
                    return Ok(Built {
                        network,
                        cache: CacheStatus::Hit(path.clone()),
                    });
                }
                Ok(None) => {}
                Err(e) => warn!("{}; building from scratch", e),
            }
        }

        let network = self.build_uncached(rng, progress)?;

        let status = match (&self.cache, path) {
            (Some(config), Some(path)) if dim.diameter() > config.min_diameter => {
                match cache::write(&path, &network) {
                    Ok(()) => {
                        info!("Cached {} network at {}", dim, path.display());
                        CacheStatus::Written(path)
                    }
                    Err(e) => {
                        warn!("{}", e);
                        CacheStatus::WriteFailed(e)
                    }
                }
            }
            _ => CacheStatus::Skipped,
        };

        Ok(Built { network, cache: status })
    }
}

/// Build a network with an entropy-seeded generator, caching under `cache_dir`.
pub fn build_network(params: NetworkParams, cache_dir: impl AsRef<Path>) -> Result<Built> {
    let mut rng = StdRng::from_entropy();
    NetworkBuilder::new(params)
        .with_cache(CacheConfig::new(cache_dir.as_ref()))
        .build(&mut rng, &mut LogProgress)
}
