//! The flat description of a snake: a path on the 2D lattice.

use hashbrown::HashMap;

use crate::{
    chain::Chain,
    geometry::{distance, Point},
};

/// The snake from the classic 3x3x3 puzzle, laid out flat.
#[rustfmt::skip]
pub const REFERENCE_PATH: [(i32, i32); 27] = [
    (0, 0), (1, 0), (2, 0), (2, 1), (3, 1), (3, 2), (3, 3), (4, 3), (4, 4),
    (4, 5), (5, 5), (5, 6), (6, 6), (7, 6), (7, 7), (7, 8), (8, 8), (8, 9),
    (9, 9), (9, 10), (9, 11), (10, 11), (11, 11), (11, 12), (11, 13), (12, 13), (13, 13),
];

/// The ways in which a snake description can be unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The path has fewer than two cubes.
    TooShort { len: usize },
    /// Two consecutive points are not neighbours.
    NotAdjacent {
        index: usize,
        from: (i32, i32),
        to: (i32, i32),
    },
    /// The same point occurs twice.
    Duplicate {
        first: usize,
        second: usize,
        point: (i32, i32),
    },
    /// The target cube has no volume.
    ZeroSize,
    /// The target cube is wider than the lattice.
    SizeTooLarge { size: usize },
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::TooShort { len } => {
                write!(f, "A snake needs at least 2 cubes, but only {len} were given")
            }
            InputError::NotAdjacent { index, from, to } => write!(
                f,
                "Cubes {} {from:?} and {index} {to:?} are not neighbours",
                index - 1
            ),
            InputError::Duplicate {
                first,
                second,
                point,
            } => write!(f, "Cubes {first} and {second} both occupy {point:?}"),
            InputError::ZeroSize => write!(f, "The target cube size must be at least 1"),
            InputError::SizeTooLarge { size } => {
                write!(f, "A cube size of {size} is larger than {}", i32::MAX)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Check a target cube edge length and convert it to lattice units.
pub fn cube_size(size: usize) -> Result<i32, InputError> {
    if size == 0 {
        return Err(InputError::ZeroSize);
    }

    i32::try_from(size).map_err(|_| InputError::SizeTooLarge { size })
}

/// A validated snake: at least two points, every step a unit step, and no
/// point visited twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakePath {
    points: Vec<(i32, i32)>,
}

impl TryFrom<Vec<(i32, i32)>> for SnakePath {
    type Error = InputError;

    fn try_from(value: Vec<(i32, i32)>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl SnakePath {
    /// Validate `points` and wrap them in a [`SnakePath`].
    pub fn new(points: Vec<(i32, i32)>) -> Result<Self, InputError> {
        if points.len() < 2 {
            return Err(InputError::TooShort { len: points.len() });
        }

        let lift = |(x, y): (i32, i32)| Point::new(x, y, 0);

        for (index, w) in points.windows(2).enumerate() {
            if distance(lift(w[0]), lift(w[1])) != 1 {
                return Err(InputError::NotAdjacent {
                    index: index + 1,
                    from: w[0],
                    to: w[1],
                });
            }
        }

        let mut seen = HashMap::with_capacity(points.len());
        for (second, point) in points.iter().enumerate() {
            if let Some(first) = seen.insert(*point, second) {
                return Err(InputError::Duplicate {
                    first,
                    second,
                    point: *point,
                });
            }
        }

        Ok(Self { points })
    }

    /// The snake from the classic 3x3x3 puzzle.
    pub fn reference() -> Self {
        Self {
            points: REFERENCE_PATH.to_vec(),
        }
    }

    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lift the path into 3D, placing every cube at `z = 0`.
    pub fn lift(&self) -> Chain {
        self.points.iter().map(|(x, y)| Point::new(*x, *y, 0)).collect()
    }
}

/// Draw the path on a grid with `y` growing upwards. Every occupied cell
/// holds the index of its cube.
impl core::fmt::Display for SnakePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let chain = self.lift();
        let (min, max) = match crate::geometry::bounds(&chain) {
            Some(b) => b,
            None => return Ok(()),
        };

        let width = format!("{}", self.points.len() - 1).len();
        let index_of: HashMap<_, _> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, i))
            .collect();

        let mut lines = Vec::new();
        for y in (min.y..=max.y).rev() {
            let row: Vec<_> = (min.x..=max.x)
                .map(|x| match index_of.get(&(x, y)) {
                    Some(i) => format!("{i:>width$}"),
                    None => " ".repeat(width),
                })
                .collect();
            lines.push(row.join(" ").trim_end().to_string());
        }

        write!(f, "{}", lines.join("\n"))
    }
}
