//! Fold a snake cube puzzle into a solid cube.
//!
//! A snake is a chain of unit cubes, threaded on an elastic so that every
//! cube can be twisted against its neighbour in quarter turns. Flat, the
//! snake is a path on the 2D lattice ([`SnakePath`]). The [`Solver`] searches
//! for the twists that fold that path into a cube of a given size.

#[cfg(test)]
mod test;

pub mod chain;
pub mod chain_file;
pub mod geometry;
pub mod path;
pub mod pivot;
pub mod solver;
pub mod transform;

pub use chain::Chain;
pub use geometry::Point;
pub use path::{cube_size, InputError, SnakePath, REFERENCE_PATH};
pub use solver::{SearchOutcome, Solution, Solver, Twist};
pub use transform::Transform;
