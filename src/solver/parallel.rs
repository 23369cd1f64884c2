//! Splitting the search over the rayon thread pool.
//!
//! The top of the search tree is expanded breadth first until there are
//! enough independent subtrees to keep every CPU busy. Each subtree is then
//! walked depth first by a single worker. The first worker to find a
//! folding stores it and raises the `found` flag, which makes all other
//! workers stop at their next branch.

use std::{sync::atomic::Ordering, time::Instant};

use parking_lot::Mutex;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use super::{Entered, Frame, SearchOutcome, Solution, Solver, Walk};

/// How many subtrees to aim for per available CPU. More subtrees even out
/// the wildly different subtree sizes.
const TASKS_PER_CPU: usize = 8;

enum Split {
    Found(Solution),
    Tasks(Vec<Frame>),
    Interrupted,
}

impl Solver {
    /// Run the search on the rayon thread pool.
    ///
    /// Reports some folding if one exists, but not necessarily the one that
    /// [`Solver::solve`] would report.
    pub fn solve_parallel(&self) -> SearchOutcome {
        let root = match self.start() {
            Ok(root) => root,
            Err(outcome) => return outcome,
        };

        let deadline = self.deadline();
        let target = num_cpus::get() * TASKS_PER_CPU;

        let tasks = match self.split(root, target, deadline) {
            Split::Found(solution) => return self.finish(Walk::Found(solution)),
            Split::Interrupted => return self.finish(Walk::Interrupted),
            Split::Tasks(tasks) => tasks,
        };

        let result = Mutex::new(None);

        tasks.into_par_iter().for_each(|task| {
            if self.found.load(Ordering::Relaxed) {
                return;
            }

            if let Walk::Found(solution) = self.walk(vec![task], deadline) {
                let mut result = result.lock();
                if result.is_none() {
                    *result = Some(solution);
                }
                self.found.store(true, Ordering::Relaxed);
            }
        });

        match result.into_inner() {
            Some(solution) => SearchOutcome::Solved(solution),
            None => self.finish(Walk::Interrupted),
        }
    }

    /// Expand `root` one level of hinges at a time until at least `target`
    /// subtrees are pending, or nothing is left to expand.
    fn split(&self, root: Frame, target: usize, deadline: Option<Instant>) -> Split {
        let mut frontier = vec![root];

        while !frontier.is_empty() && frontier.len() < target {
            if self.should_stop(deadline) {
                return Split::Interrupted;
            }

            let mut next = Vec::with_capacity(frontier.len() * 4);

            for mut frame in frontier {
                let idx = frame.idx + 1;

                while let Some((chain, twists)) = frame.next_child() {
                    match self.enter(chain, idx, twists) {
                        Entered::Dead => {}
                        Entered::Solved(solution) => return Split::Found(solution),
                        Entered::Branch(child) => {
                            self.visit();
                            next.push(child);
                        }
                    }
                }
            }

            frontier = next;
        }

        Split::Tasks(frontier)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::path::SnakePath;

    use super::*;

    #[test]
    fn parallel_agrees_on_impossible_snakes() {
        let path = SnakePath::new(vec![(0, 0), (1, 0), (2, 0), (3, 0)]).unwrap();
        let solver = Solver::new(&path, 3).unwrap();

        assert_eq!(solver.solve_parallel(), SearchOutcome::NoSolution);
    }

    #[test]
    fn parallel_finds_small_folding() {
        let path =
            SnakePath::new(vec![(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2), (3, 3), (4, 3)])
                .unwrap();
        let solver = Solver::new(&path, 2).unwrap();

        let solution = solver.solve_parallel().into_solution().unwrap();
        assert!(solution.chain.fits(2));
        assert!(solution.chain.is_folding_of(solver.root()));
    }

    #[test]
    fn parallel_zero_timeout() {
        let solver = Solver::new(&SnakePath::reference(), 3)
            .unwrap()
            .with_timeout(Duration::ZERO);

        assert_eq!(solver.solve_parallel(), SearchOutcome::TimedOut);
    }
}
