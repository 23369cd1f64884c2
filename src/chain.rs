//! A chain of unit cubes in 3D.

use std::ops::Deref;

use crate::{
    geometry::{bounds, distance, extent, feasible, normal_vector, Extent, Point},
    pivot::pivot_transform,
};

/// An ordered chain of cube positions. Consecutive cubes are expected to be
/// neighbours, and index 0 is the anchor that folding never moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chain {
    points: Vec<Point>,
}

impl Deref for Chain {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

impl From<Vec<Point>> for Chain {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl From<Chain> for Vec<Point> {
    fn from(value: Chain) -> Self {
        value.points
    }
}

impl FromIterator<Point> for Chain {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Chain {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn extent(&self) -> Extent {
        extent(&self.points)
    }

    /// `true` if the whole chain fits a cube with edge length `size`
    /// without overlapping itself.
    pub fn fits(&self, size: i32) -> bool {
        feasible(&self.points, size)
    }

    pub fn normal_vector(&self, i: usize) -> Point {
        normal_vector(&self.points, i)
    }

    /// All steps along the chain, in order.
    pub fn normal_vectors(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.windows(2).map(|w| w[1] - w[0])
    }

    /// `true` if the chain changes direction at `i`.
    ///
    /// The anchor and the final cube are never hinges.
    pub fn is_hinge(&self, i: usize) -> bool {
        i > 0 && i + 1 < self.points.len() && self.normal_vector(i) != self.normal_vector(i + 1)
    }

    /// Indices of all hinges, in order.
    pub fn hinges(&self) -> impl Iterator<Item = usize> + '_ {
        (1..self.points.len().saturating_sub(1)).filter(|i| self.is_hinge(*i))
    }

    /// Twist the chain by `a` quarter turns at index `i`.
    ///
    /// Everything up to and including `i` is copied unchanged, the rest of
    /// the chain is rotated about the segment entering `i`.
    pub fn twisted(&self, i: usize, a: u8) -> Chain {
        let t = pivot_transform(&self.points, i, a);

        let mut points = Vec::with_capacity(self.points.len());
        points.extend_from_slice(&self.points[..=i]);
        points.extend(self.points[i + 1..].iter().map(|p| t.apply(*p)));

        Chain { points }
    }

    /// Check that `self` is a folding of `original`: both have the same
    /// length, every step is a unit step, and the chains turn at exactly the
    /// same indices.
    pub fn is_folding_of(&self, original: &Chain) -> bool {
        if self.len() != original.len() {
            return false;
        }

        let unit_steps = self.points.windows(2).all(|w| distance(w[0], w[1]) == 1);

        unit_steps && (1..self.len()).all(|i| self.is_hinge(i) == original.is_hinge(i))
    }
}

/// Render the chain one z-layer at a time. Every cell holds the index of the
/// cube occupying it, or `.` if it is empty.
impl core::fmt::Display for Chain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (min, max) = match bounds(&self.points) {
            Some(b) => b,
            None => return write!(f, "<empty chain>"),
        };

        let width = format!("{}", self.points.len().saturating_sub(1)).len();
        let dim_x = max.x.abs_diff(min.x) as usize + 1;
        let dim_y = max.y.abs_diff(min.y) as usize + 1;
        let dim_z = max.z.abs_diff(min.z) as usize + 1;

        let mut cells = vec![None; dim_x * dim_y * dim_z];
        for (idx, p) in self.points.iter().enumerate() {
            let (x, y, z) = (
                p.x.abs_diff(min.x) as usize,
                p.y.abs_diff(min.y) as usize,
                p.z.abs_diff(min.z) as usize,
            );
            cells[(z * dim_y + y) * dim_x + x].get_or_insert(idx);
        }

        let separator = "-".repeat(dim_x * (width + 1) - 1);

        for z in 0..dim_z {
            writeln!(f, "{separator} z = {}", min.z + z as i32)?;
            for y in (0..dim_y).rev() {
                let row: Vec<_> = (0..dim_x)
                    .map(|x| match cells[(z * dim_y + y) * dim_x + x] {
                        Some(idx) => format!("{idx:>width$}"),
                        None => format!("{:>width$}", "."),
                    })
                    .collect();
                writeln!(f, "{}", row.join(" "))?;
            }
        }

        write!(f, "{separator}")
    }
}
