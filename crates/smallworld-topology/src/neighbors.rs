//! Neighbor shells on the torus.
//!
//! The shell at distance `n` around a cell is every cell at exact L1 torus
//! distance `n`. Shells are built from axis offsets whose absolute values
//! sum to `n`, keeping only offsets that stay within each axis radius.
//! Past the radius the wraparound path is shorter, so such an offset would
//! land on a cell that belongs to a smaller shell.

use std::collections::BTreeSet;

use crate::{Dimension, Position};

/// How many axes a shell offset may perturb at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Enumeration {
    /// Every offset vector with L1 norm `n`.
    #[default]
    Full,
    /// Offsets with at most two non-zero axes.
    ///
    /// Identical to [`Enumeration::Full`] on one- and two-axis lattices.
    /// On three or more axes it leaves out cells that need three or more
    /// non-zero offsets, matching networks generated by earlier versions
    /// of this model.
    TwoAxis,
}

/// All admissible offset vectors for the shell at distance `n`.
pub fn shell_offsets(dim: &Dimension, n: usize, mode: Enumeration) -> BTreeSet<Vec<i64>> {
    let mut offsets = BTreeSet::new();
    if n == 0 {
        return offsets;
    }
    match mode {
        Enumeration::Full => {
            let mut current = vec![0i64; dim.rank()];
            full_offsets(dim.radii(), 0, n, &mut current, &mut offsets);
        }
        Enumeration::TwoAxis => two_axis_offsets(dim.radii(), n, &mut offsets),
    }
    offsets
}

fn full_offsets(
    radii: &[usize],
    axis: usize,
    remaining: usize,
    current: &mut Vec<i64>,
    out: &mut BTreeSet<Vec<i64>>,
) {
    if axis == radii.len() {
        if remaining == 0 {
            out.insert(current.clone());
        }
        return;
    }

    // Whatever later axes cannot absorb must be taken here
    let capacity: usize = radii[axis + 1..].iter().sum();
    let low = remaining.saturating_sub(capacity);
    let high = remaining.min(radii[axis]);

    for magnitude in low..=high {
        if magnitude == 0 {
            current[axis] = 0;
            full_offsets(radii, axis + 1, remaining, current, out);
            continue;
        }
        for sign in [1i64, -1] {
            current[axis] = sign * magnitude as i64;
            full_offsets(radii, axis + 1, remaining - magnitude, current, out);
        }
    }
    current[axis] = 0;
}

fn two_axis_offsets(radii: &[usize], n: usize, out: &mut BTreeSet<Vec<i64>>) {
    let rank = radii.len();
    if rank == 1 {
        if n <= radii[0] {
            out.insert(vec![n as i64]);
            out.insert(vec![-(n as i64)]);
        }
        return;
    }

    let n = n as i64;
    for a in 0..rank {
        for b in (a + 1)..rank {
            for i in 0..n {
                let j = n - i;
                let splits = [
                    (i, j), (-i, j), (i, -j), (-i, -j),
                    (j, i), (j, -i), (-j, i), (-j, -i),
                ];
                for (x, y) in splits {
                    if x.unsigned_abs() as usize > radii[a] || y.unsigned_abs() as usize > radii[b] {
                        continue;
                    }
                    let mut offset = vec![0i64; rank];
                    offset[a] = x;
                    offset[b] = y;
                    out.insert(offset);
                }
            }
        }
    }
}

/// Cells at exact L1 torus distance `n` from `center`.
///
/// The result never contains `center` itself, and is empty for `n = 0`
/// or when `n` exceeds what the lattice can reach.
pub fn neighbors_at_distance(
    dim: &Dimension,
    center: &Position,
    n: usize,
    mode: Enumeration,
) -> BTreeSet<Position> {
    shell_offsets(dim, n, mode)
        .iter()
        .map(|offset| dim.offset(center, offset))
        .collect()
}

/// Cells within L1 torus distance `1..=radius` of `center`.
pub fn neighborhood(
    dim: &Dimension,
    center: &Position,
    radius: usize,
    mode: Enumeration,
) -> BTreeSet<Position> {
    (1..=radius)
        .flat_map(|n| neighbors_at_distance(dim, center, n, mode))
        .collect()
}
