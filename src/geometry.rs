//! Integer lattice primitives shared by the rest of the crate.

use std::ops::{Add, Neg, Sub};

use hashbrown::HashSet;

/// A point (or vector) on the integer lattice.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The axis along which `self` points, if `self` is a unit vector
    /// along exactly one axis (the sign is ignored).
    pub fn axis(&self) -> Option<Axis> {
        match (self.x.abs(), self.y.abs(), self.z.abs()) {
            (1, 0, 0) => Some(Axis::X),
            (0, 1, 0) => Some(Axis::Y),
            (0, 0, 1) => Some(Axis::Z),
            _ => None,
        }
    }
}

impl From<(i32, i32, i32)> for Point {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the three coordinate axes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The per-axis span of a set of points, `max - min` in each axis.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct Extent {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Extent {
    /// `true` if every axis spans strictly less than `size`
    pub fn fits(&self, size: i32) -> bool {
        let Ok(size) = u32::try_from(size) else {
            return false;
        };

        self.x < size && self.y < size && self.z < size
    }
}

/// Manhattan distance between `a` and `b`.
///
/// Exact for any pair of points on the `i32` lattice.
pub fn distance(a: Point, b: Point) -> u64 {
    u64::from(a.x.abs_diff(b.x)) + u64::from(a.y.abs_diff(b.y)) + u64::from(a.z.abs_diff(b.z))
}

/// The smallest and largest corner of the bounding box of `points`, or `None`
/// if `points` is empty.
pub fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let (first, rest) = points.split_first()?;

    let mut min = *first;
    let mut max = *first;

    for p in rest {
        min = Point::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Point::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }

    Some((min, max))
}

/// Per-axis extent of `points`. An empty slice has zero extent.
pub fn extent(points: &[Point]) -> Extent {
    match bounds(points) {
        Some((min, max)) => Extent {
            x: max.x.abs_diff(min.x),
            y: max.y.abs_diff(min.y),
            z: max.z.abs_diff(min.z),
        },
        None => Extent::default(),
    }
}

/// `true` if `points` fits inside a cube with edge length `size` and no two
/// points coincide.
pub fn feasible(points: &[Point], size: i32) -> bool {
    if !extent(points).fits(size) {
        return false;
    }

    let mut seen = HashSet::with_capacity(points.len());
    points.iter().all(|p| seen.insert(*p))
}

/// The step taken from `points[i - 1]` to `points[i]`.
///
/// Panics if `i` is 0 or out of bounds.
pub fn normal_vector(points: &[Point], i: usize) -> Point {
    assert!(
        i > 0 && i < points.len(),
        "normal vector index {i} out of range for a chain of length {}",
        points.len()
    );

    points[i] - points[i - 1]
}

#[test]
pub fn manhattan_distance() {
    let a = Point::new(1, -2, 3);
    let b = Point::new(-1, 2, 3);

    assert_eq!(distance(a, b), 6);
    assert_eq!(distance(b, a), 6);
    assert_eq!(distance(a, a), 0);

    let far = Point::new(i32::MAX, 0, 0);
    let near = Point::new(i32::MIN, 0, 0);
    assert_eq!(distance(far, near), u64::from(u32::MAX));

    let low = Point::new(i32::MIN, i32::MIN, i32::MIN);
    let high = Point::new(i32::MAX, i32::MAX, i32::MAX);
    assert_eq!(distance(low, high), 3 * u64::from(u32::MAX));
}

#[test]
pub fn extent_of_points() {
    let points = [
        Point::new(0, 0, 0),
        Point::new(2, -1, 0),
        Point::new(1, 1, 1),
    ];

    assert_eq!(extent(&points), Extent { x: 2, y: 2, z: 1 });
    assert_eq!(extent(&[]), Extent::default());
    assert_eq!(extent(&points[..1]), Extent::default());

    let wide = [Point::new(i32::MIN, 0, 0), Point::new(i32::MAX, 0, 0)];
    assert_eq!(extent(&wide), Extent { x: u32::MAX, y: 0, z: 0 });
    assert!(!extent(&wide).fits(3));
    assert!(!feasible(&wide, i32::MAX));
}

#[test]
pub fn feasibility() {
    let line: Vec<_> = (0..3).map(|x| Point::new(x, 0, 0)).collect();

    assert!(feasible(&line, 3));
    assert!(!feasible(&line, 2));

    let mut doubled = line.clone();
    doubled.push(Point::new(1, 0, 0));
    assert!(!feasible(&doubled, 3));
}

#[test]
pub fn unit_axes() {
    assert_eq!(Point::new(0, -1, 0).axis(), Some(Axis::Y));
    assert_eq!(Point::new(0, 0, 1).axis(), Some(Axis::Z));
    assert_eq!(Point::new(1, 1, 0).axis(), None);
    assert_eq!(Point::new(2, 0, 0).axis(), None);
    assert_eq!(Point::ORIGIN.axis(), None);
}

#[test]
#[should_panic]
pub fn normal_vector_at_anchor() {
    normal_vector(&[Point::ORIGIN, Point::new(1, 0, 0)], 0);
}
