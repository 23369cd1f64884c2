//! Exact affine transforms on the integer lattice.
//!
//! Every rotation used by the solver is a multiple of 90°, so the sine
//! and cosine of each angle is one of `-1`, `0` or `1` and all arithmetic
//! stays in integers.

use std::ops::Mul;

use crate::geometry::{Axis, Point};

/// `sin(a * 90°)` for `a` quarter turns.
const SIN: [i32; 4] = [0, 1, 0, -1];
/// `cos(a * 90°)` for `a` quarter turns.
const COS: [i32; 4] = [1, 0, -1, 0];

/// A 4x4 homogeneous transform, stored row-major.
///
/// Points are treated as column vectors, so `a * b` is the transform that
/// applies `b` first and `a` second.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Transform {
    m: [[i32; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        let mut m = [[0; 4]; 4];

        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }

        Transform { m }
    }
}

/// Validate `a` and return its sine and cosine.
fn sin_cos(a: u8) -> (i32, i32) {
    assert!(a <= 3, "quarter turns must be in 0..=3, got {a}");
    (SIN[a as usize], COS[a as usize])
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]],
    };

    /// The row-major matrix of this transform.
    pub fn rows(&self) -> [[i32; 4]; 4] {
        self.m
    }

    /// Rotate by `a` quarter turns about the x axis.
    pub fn rotate_x(a: u8) -> Self {
        let (s, c) = sin_cos(a);

        #[rustfmt::skip]
        let m = [
            [1, 0,  0, 0],
            [0, c, -s, 0],
            [0, s,  c, 0],
            [0, 0,  0, 1],
        ];

        Self { m }
    }

    /// Rotate by `a` quarter turns about the y axis.
    pub fn rotate_y(a: u8) -> Self {
        let (s, c) = sin_cos(a);

        #[rustfmt::skip]
        let m = [
            [ c, 0, s, 0],
            [ 0, 1, 0, 0],
            [-s, 0, c, 0],
            [ 0, 0, 0, 1],
        ];

        Self { m }
    }

    /// Rotate by `a` quarter turns about the z axis.
    pub fn rotate_z(a: u8) -> Self {
        let (s, c) = sin_cos(a);

        #[rustfmt::skip]
        let m = [
            [c, -s, 0, 0],
            [s,  c, 0, 0],
            [0,  0, 1, 0],
            [0,  0, 0, 1],
        ];

        Self { m }
    }

    /// Rotate by `a` quarter turns about `axis`.
    pub fn rotate(axis: Axis, a: u8) -> Self {
        match axis {
            Axis::X => Self::rotate_x(a),
            Axis::Y => Self::rotate_y(a),
            Axis::Z => Self::rotate_z(a),
        }
    }

    /// Translate by `offset`.
    pub fn translate(offset: Point) -> Self {
        let Point { x, y, z } = offset;

        #[rustfmt::skip]
        let m = [
            [1, 0, 0, x],
            [0, 1, 0, y],
            [0, 0, 1, z],
            [0, 0, 0, 1],
        ];

        Self { m }
    }

    /// Apply this transform to `p`.
    pub fn apply(&self, p: Point) -> Point {
        let v = [p.x, p.y, p.z, 1];
        let row = |r: usize| -> i32 { (0..4).map(|k| self.m[r][k] * v[k]).sum() };

        debug_assert_eq!(row(3), 1, "transform is not affine");

        Point::new(row(0), row(1), row(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn linear(t: &Transform) -> [[i32; 3]; 3] {
        let m = t.rows();
        let mut out = [[0; 3]; 3];
        for r in 0..3 {
            for c in 0..3 {
                out[r][c] = m[r][c];
            }
        }
        out
    }

    fn determinant(m: [[i32; 3]; 3]) -> i32 {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    #[test]
    fn rotations_are_proper_orthogonal() {
        for axis in AXES {
            for a in 0..4 {
                let m = linear(&Transform::rotate(axis, a));

                for i in 0..3 {
                    for j in 0..3 {
                        let dot: i32 = (0..3).map(|k| m[k][i] * m[k][j]).sum();
                        assert_eq!(dot, (i == j) as i32, "{axis:?} {a}");
                    }
                }

                assert_eq!(determinant(m), 1, "{axis:?} {a}");
            }
        }
    }

    #[test]
    fn zero_turns_is_identity() {
        for axis in AXES {
            assert_eq!(Transform::rotate(axis, 0), Transform::IDENTITY);
        }

        let p = Point::new(3, -7, 11);
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }

    #[test]
    fn quarter_turns() {
        let x = Point::new(1, 0, 0);
        let y = Point::new(0, 1, 0);
        let z = Point::new(0, 0, 1);

        assert_eq!(Transform::rotate_z(1).apply(x), y);
        assert_eq!(Transform::rotate_x(1).apply(y), z);
        assert_eq!(Transform::rotate_y(1).apply(z), x);
        assert_eq!(Transform::rotate_z(2).apply(x), -x);
        assert_eq!(Transform::rotate_z(3).apply(x), -y);
    }

    #[test]
    fn four_quarter_turns_compose_to_identity() {
        for axis in AXES {
            let quarter = Transform::rotate(axis, 1);
            let full = quarter * quarter * quarter * quarter;
            assert_eq!(full, Transform::IDENTITY);
            assert_eq!(quarter * quarter, Transform::rotate(axis, 2));
        }
    }

    #[test]
    fn composition_order() {
        let p = Point::new(1, 0, 0);
        let shift = Transform::translate(Point::new(0, 0, 5));
        let turn = Transform::rotate_y(1);

        // `turn` first: (1, 0, 0) -> (0, 0, -1) -> (0, 0, 4)
        assert_eq!((shift * turn).apply(p), Point::new(0, 0, 4));
        // `shift` first: (1, 0, 0) -> (1, 0, 5) -> (5, 0, -1)
        assert_eq!((turn * shift).apply(p), Point::new(5, 0, -1));
    }

    #[test]
    fn translation() {
        let t = Transform::translate(Point::new(1, 2, 3));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(1, 2, 3));
        assert_eq!(
            (t * Transform::translate(Point::new(-1, -2, -3))),
            Transform::IDENTITY
        );
    }

    #[test]
    #[should_panic]
    fn too_many_quarter_turns() {
        Transform::rotate_x(4);
    }
}
