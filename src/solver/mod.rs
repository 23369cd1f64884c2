//! Depth-first search for a folding of a snake into a cube.
//!
//! The search walks the chain from the anchor towards the tail. Straight
//! runs are passed through, and at every hinge the remaining tail is
//! twisted by 0, 1, 2 and 3 quarter turns in that order. A branch is
//! abandoned as soon as the committed prefix no longer fits the target cube
//! or runs into itself.
//!
//! Instead of recursing, the search keeps an explicit stack of [`Frame`]s,
//! one per hinge on the current branch. Backtracking pops a frame.

use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use indicatif::ProgressBar;

use crate::{
    chain::Chain,
    geometry::feasible,
    path::{cube_size, InputError, SnakePath},
};

mod parallel;

/// The twist applied at a single hinge.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Twist {
    /// Index of the cube that the tail was rotated around.
    pub hinge: usize,
    /// Rotation in quarter turns, `0..=3`.
    pub quarter_turns: u8,
}

impl core::fmt::Display for Twist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.hinge, self.quarter_turns)
    }
}

/// A folded snake, along with the twists that produced it from the flat
/// snake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub chain: Chain,
    pub twists: Vec<Twist>,
}

/// The result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    /// Every branch was exhausted without finding a folding.
    NoSolution,
    /// The deadline passed before the search could finish.
    TimedOut,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(s) => Some(s),
            _ => None,
        }
    }
}

/// A hinge on the current branch: the chain as it was when the hinge was
/// reached, and the next twist to try there.
struct Frame {
    chain: Chain,
    idx: usize,
    next_turn: u8,
    twists: Vec<Twist>,
}

impl Frame {
    fn new(chain: Chain, idx: usize, twists: Vec<Twist>) -> Self {
        Self {
            chain,
            idx,
            next_turn: 0,
            twists,
        }
    }

    /// Produce the chain for the next untried twist at this hinge.
    fn next_child(&mut self) -> Option<(Chain, Vec<Twist>)> {
        if self.next_turn > 3 {
            return None;
        }

        let quarter_turns = self.next_turn;
        self.next_turn += 1;

        let chain = self.chain.twisted(self.idx, quarter_turns);
        let mut twists = self.twists.clone();
        twists.push(Twist {
            hinge: self.idx,
            quarter_turns,
        });

        Some((chain, twists))
    }
}

/// What lies at a given position of the search.
enum Entered {
    /// The committed prefix does not fit.
    Dead,
    Solved(Solution),
    /// A hinge that still needs twisting.
    Branch(Frame),
}

/// How a walk over (part of) the search tree ended.
enum Walk {
    Found(Solution),
    Exhausted,
    /// Stopped early, either because the deadline passed or because another
    /// worker found a solution.
    Interrupted,
}

/// Searches for a way to fold a snake into a cube.
pub struct Solver {
    root: Chain,
    size: i32,
    timeout: Option<Duration>,
    bar: Option<ProgressBar>,
    visited: AtomicUsize,
    found: AtomicBool,
    timed_out: AtomicBool,
}

impl Solver {
    /// Create a solver that folds `path` into a cube with edge length `size`.
    pub fn new(path: &SnakePath, size: usize) -> Result<Self, InputError> {
        Ok(Self {
            root: path.lift(),
            size: cube_size(size)?,
            timeout: None,
            bar: None,
            visited: AtomicUsize::new(0),
            found: AtomicBool::new(false),
            timed_out: AtomicBool::new(false),
        })
    }

    /// Give up once `timeout` has passed since the start of a search.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Increment `bar` for every hinge the search expands.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.bar = Some(bar);
        self
    }

    /// The flat chain the search starts from.
    pub fn root(&self) -> &Chain {
        &self.root
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// The amount of hinges expanded by the most recent search.
    pub fn visited(&self) -> usize {
        self.visited.load(Ordering::Relaxed)
    }

    /// Run the search on the current thread and report the first folding
    /// found, in order of increasing twists from the anchor outwards.
    pub fn solve(&self) -> SearchOutcome {
        let root = match self.start() {
            Ok(root) => root,
            Err(outcome) => return outcome,
        };

        let deadline = self.deadline();
        let walk = self.walk(vec![root], deadline);
        self.finish(walk)
    }

    /// Reset the bookkeeping from any previous search and enter the root.
    ///
    /// Returns `Err` if the outcome is known without any searching.
    fn start(&self) -> Result<Frame, SearchOutcome> {
        self.visited.store(0, Ordering::Relaxed);
        self.found.store(false, Ordering::Relaxed);
        self.timed_out.store(false, Ordering::Relaxed);

        // More cubes than cells can never fit.
        let cells = (self.size as u64).saturating_pow(3);
        if self.root.len() as u64 > cells {
            return Err(SearchOutcome::NoSolution);
        }

        match self.enter(self.root.clone(), 1, Vec::new()) {
            Entered::Dead => Err(SearchOutcome::NoSolution),
            Entered::Solved(solution) => Err(SearchOutcome::Solved(solution)),
            Entered::Branch(frame) => {
                self.visit();
                Ok(frame)
            }
        }
    }

    fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|t| Instant::now() + t)
    }

    fn finish(&self, walk: Walk) -> SearchOutcome {
        match walk {
            Walk::Found(solution) => {
                self.found.store(true, Ordering::Relaxed);
                SearchOutcome::Solved(solution)
            }
            Walk::Interrupted if self.timed_out.load(Ordering::Relaxed) => SearchOutcome::TimedOut,
            Walk::Exhausted | Walk::Interrupted => SearchOutcome::NoSolution,
        }
    }

    fn visit(&self) {
        self.visited.fetch_add(1, Ordering::Relaxed);
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// `true` if the search should stop exploring new branches.
    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        if self.found.load(Ordering::Relaxed) {
            return true;
        }

        match deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.timed_out.store(true, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }

    /// Move forward from `idx` until the prefix stops fitting, the chain
    /// ends, or a hinge is reached.
    fn enter(&self, chain: Chain, mut idx: usize, twists: Vec<Twist>) -> Entered {
        loop {
            if !feasible(&chain[..=idx], self.size) {
                return Entered::Dead;
            }

            if idx + 1 == chain.len() {
                return Entered::Solved(Solution { chain, twists });
            }

            if !chain.is_hinge(idx) {
                idx += 1;
                continue;
            }

            return Entered::Branch(Frame::new(chain, idx, twists));
        }
    }

    /// Exhaust the subtrees below `stack`, depth first.
    fn walk(&self, mut stack: Vec<Frame>, deadline: Option<Instant>) -> Walk {
        while let Some(frame) = stack.last_mut() {
            if self.should_stop(deadline) {
                return Walk::Interrupted;
            }

            let idx = frame.idx + 1;
            let Some((chain, twists)) = frame.next_child() else {
                stack.pop();
                continue;
            };

            match self.enter(chain, idx, twists) {
                Entered::Dead => {}
                Entered::Solved(solution) => return Walk::Found(solution),
                Entered::Branch(child) => {
                    self.visit();
                    stack.push(child);
                }
            }
        }

        Walk::Exhausted
    }
}
