//! Lattice dimensions and torus distance.
//!
//! A lattice is described by one size per axis. Every axis wraps around,
//! so the shortest offset between two coordinates never exceeds half the
//! axis size. That half-size is the axis *radius*, and the sum of radii is
//! the *diameter*: the largest L1 torus distance any two cells can have.

use crate::error::{Result, TopologyError};
use crate::Position;

/// Sizes of a toroidal lattice, with the derived radii and diameter.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    sizes: Vec<usize>,
    radii: Vec<usize>,
    diameter: usize,
    cells: usize,
}

impl Dimension {
    /// Create a dimension from per-axis sizes.
    ///
    /// Fails with [`TopologyError::InvalidDimension`] on an empty list, a
    /// zero-sized axis, or a cell count that does not fit in `usize`.
    pub fn new(sizes: impl Into<Vec<usize>>) -> Result<Self> {
        let sizes = sizes.into();
        if sizes.is_empty() {
            return Err(TopologyError::dimension("at least one axis is required"));
        }
        if let Some(axis) = sizes.iter().position(|&s| s == 0) {
            return Err(TopologyError::dimension(format!("axis {} has size 0", axis)));
        }
        let cells = sizes
            .iter()
            .try_fold(1usize, |acc, &s| acc.checked_mul(s))
            .ok_or_else(|| TopologyError::dimension("cell count overflows usize"))?;

        let radii: Vec<usize> = sizes.iter().map(|s| s / 2).collect();
        let diameter = radii.iter().sum();

        Ok(Self { sizes, radii, diameter, cells })
    }

    /// Per-axis sizes.
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Per-axis radii (`size / 2`, rounded down).
    #[inline]
    pub fn radii(&self) -> &[usize] {
        &self.radii
    }

    /// Size of one axis, `None` past the last axis.
    #[inline]
    pub fn size(&self, axis: usize) -> Option<usize> {
        self.sizes.get(axis).copied()
    }

    /// Radius of one axis, `None` past the last axis.
    #[inline]
    pub fn radius(&self, axis: usize) -> Option<usize> {
        self.radii.get(axis).copied()
    }

    /// Sum of the per-axis radii.
    #[inline]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of cells (product of sizes).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Whether a position has the right rank and every coordinate in range.
    pub fn contains(&self, position: &Position) -> bool {
        position.rank() == self.rank()
            && position
                .coords()
                .iter()
                .zip(&self.sizes)
                .all(|(&c, &s)| c < s)
    }

    /// Shortest distance between two coordinates on one axis.
    #[inline]
    pub fn axis_distance(&self, axis: usize, a: usize, b: usize) -> usize {
        let size = self.sizes[axis];
        let diff = a.abs_diff(b) % size;
        diff.min(size - diff)
    }

    /// L1 torus distance: per axis the shorter of the direct and the
    /// wraparound offset, summed over all axes.
    pub fn torus_distance(&self, a: &Position, b: &Position) -> usize {
        debug_assert_eq!(a.rank(), self.rank());
        debug_assert_eq!(b.rank(), self.rank());
        a.coords()
            .iter()
            .zip(b.coords())
            .enumerate()
            .map(|(axis, (&x, &y))| self.axis_distance(axis, x, y))
            .sum()
    }

    /// Apply a signed per-axis offset with wraparound on every axis.
    pub fn offset(&self, position: &Position, offset: &[i64]) -> Position {
        debug_assert_eq!(offset.len(), self.rank());
        position
            .coords()
            .iter()
            .zip(offset)
            .zip(&self.sizes)
            .map(|((&c, &o), &s)| {
                let s = s as i64;
                ((c as i64 + o).rem_euclid(s)) as usize
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Iterate over every cell of the lattice exactly once.
    ///
    /// The last axis varies fastest.
    pub fn positions(&self) -> Positions {
        Positions {
            sizes: self.sizes.clone(),
            next: Some(vec![0; self.rank()]),
            remaining: self.cells,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, s) in self.sizes.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

/// Iterator over the cartesian product of all axis ranges.
pub struct Positions {
    sizes: Vec<usize>,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next.take()?;

        // Odometer increment, last axis first
        let mut following = current.clone();
        let mut carried = true;
        for axis in (0..following.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.sizes[axis] {
                carried = false;
                break;
            }
            following[axis] = 0;
        }
        if !carried {
            self.next = Some(following);
        }

        self.remaining -= 1;
        Some(Position::new(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Positions {}
