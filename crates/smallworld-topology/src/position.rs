//! Lattice cell coordinates.

use std::ops::Index;

/// A cell of the lattice, one coordinate per axis.
///
/// Each coordinate lies in `[0, size)` of its axis. A `Position` does not
/// know which lattice it belongs to; [`crate::Dimension::contains`] tests
/// one against a concrete size list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position(Vec<usize>);

impl Position {
    /// Create a position from its coordinates.
    pub fn new(coords: impl Into<Vec<usize>>) -> Self {
        Self(coords.into())
    }

    /// The coordinates, axis by axis.
    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Little-endian encoding of every coordinate as `u64`.
    ///
    /// Independent of the platform word size, so it can feed a stable hash.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.0
            .iter()
            .flat_map(|&c| (c as u64).to_le_bytes())
            .collect()
    }
}

impl From<Vec<usize>> for Position {
    fn from(coords: Vec<usize>) -> Self {
        Self(coords)
    }
}

impl From<&[usize]> for Position {
    fn from(coords: &[usize]) -> Self {
        Self(coords.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Position {
    fn from(coords: [usize; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl Index<usize> for Position {
    type Output = usize;

    #[inline]
    fn index(&self, axis: usize) -> &usize {
        &self.0[axis]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
