//! Long-range attachment strategies.
//!
//! Both strategies take a pruned base lattice and add long-range edges in
//! place, one new out-link per active node per pass:
//!
//! - [`AttachmentType::DistanceBiased`]: targets are grouped by torus
//!   distance and a distance bin is drawn with weight
//!   `population / d^cluster_exponent` (the Kleinberg small-world model).
//! - [`AttachmentType::DegreeBiased`]: targets are grouped by in-degree and
//!   a bucket is drawn with weight `population * k^preference_exponent`
//!   (preferential attachment, Yule process).
//!
//! With `real_connection` every added edge is made bidirectional.
//!
//! A strategy that fails partway leaves the edges it already added in
//! place; the build as a whole reports the failure.

mod degree;
mod distance;

use rand::Rng;

use crate::error::Result;
use crate::progress::ProgressObserver;
use crate::{AttachmentType, Network};

impl AttachmentType {
    /// Add long-range edges to `network` according to its parameters.
    ///
    /// Returns the number of directed edges added, not counting the
    /// reverse halves of reciprocal links.
    pub fn augment<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        rng: &mut R,
        progress: &mut dyn ProgressObserver,
    ) -> Result<usize> {
        match self {
            Self::DistanceBiased => distance::augment(network, rng, progress),
            Self::DegreeBiased => degree::augment(network, rng, progress),
        }
    }
}
