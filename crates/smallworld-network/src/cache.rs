//! On-disk cache of built networks.
//!
//! Large lattices are slow to augment, so a finished network can be stored
//! under a key derived from its parameters and reloaded instead of being
//! rebuilt. Blobs are bincode-encoded and only meant to be read back by the
//! same version of this crate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Error, Result};
use crate::{Network, NetworkParams};

/// Bumped whenever the encoded layout of [`Network`] changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Networks with a diameter at or below this are not worth caching.
pub const DEFAULT_MIN_DIAMETER: usize = 25;

/// Where and when to cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding cache files, created on first write
    pub dir: PathBuf,
    /// Only networks with a diameter above this are written
    pub min_diameter: usize,
}

impl CacheConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            min_diameter: DEFAULT_MIN_DIAMETER,
        }
    }

    pub fn with_min_diameter(mut self, min_diameter: usize) -> Self {
        self.min_diameter = min_diameter;
        self
    }

    /// Cache file for a parameter set.
    pub fn path_for(&self, params: &NetworkParams) -> PathBuf {
        self.dir.join(format!("{}.cache", cache_key(params)))
    }
}

/// `<sizes>_<density>_<attachment>_<num_out_links>`, e.g. `100_100_0.6_distance_biased_1`.
pub fn cache_key(params: &NetworkParams) -> String {
    let mut parts: Vec<String> = params.dimensions.iter().map(|s| s.to_string()).collect();
    parts.push(params.density.to_string());
    parts.push(params.attachment.to_string());
    parts.push(params.num_out_links.to_string());
    parts.join("_")
}

#[derive(Serialize)]
struct EntryRef<'a> {
    version: u32,
    network: &'a Network,
}

#[derive(Deserialize)]
struct Entry {
    version: u32,
    network: Network,
}

/// Load the network cached at `path` for `params`.
///
/// Returns `Ok(None)` when there is no file. A file written by another
/// format version, or for parameters the key does not capture, is
/// [`CacheError::Stale`].
pub fn read(path: &Path, params: &NetworkParams) -> Result<Option<Network>> {
    if !path.is_file() {
        return Ok(None);
    }
    let fail = |source: CacheError| Error::CacheRead {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(|e| fail(e.into()))?;
    let entry: Entry = bincode::deserialize(&bytes).map_err(|e| fail(e.into()))?;

    if entry.version != CACHE_FORMAT_VERSION {
        return Err(fail(CacheError::Stale {
            reason: format!(
                "format version {}, expected {}",
                entry.version, CACHE_FORMAT_VERSION
            ),
        }));
    }
    if entry.network.params() != params {
        return Err(fail(CacheError::Stale {
            reason: "generated with different parameters".to_string(),
        }));
    }

    Ok(Some(entry.network))
}

/// Store `network` at `path`, creating the parent directory if needed.
///
/// The blob is written next to the target and renamed into place, so a
/// reader never sees a partial file.
pub fn write(path: &Path, network: &Network) -> Result<()> {
    let fail = |source: CacheError| Error::CacheWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fail(e.into()))?;
    }

    let bytes = bincode::serialize(&EntryRef {
        version: CACHE_FORMAT_VERSION,
        network,
    })
    .map_err(|e| fail(e.into()))?;

    let staging = path.with_extension("cache.partial");
    fs::write(&staging, bytes).map_err(|e| fail(e.into()))?;
    fs::rename(&staging, path).map_err(|e| fail(e.into()))?;
    Ok(())
}
