use std::collections::HashSet;

use crate::{
    chain_file::{read_path, write_folding, Compression},
    geometry::{extent, feasible, Extent, Point},
    SearchOutcome, SnakePath, Solver,
};

fn solve(points: Vec<(i32, i32)>, size: usize) -> SearchOutcome {
    let path = SnakePath::new(points).unwrap();
    Solver::new(&path, size).unwrap().solve()
}

#[test]
pub fn corner_already_fits() {
    let outcome = solve(vec![(0, 0), (1, 0), (1, 1)], 2);

    let expected: Vec<_> = [(0, 0, 0), (1, 0, 0), (1, 1, 0)]
        .into_iter()
        .map(Point::from)
        .collect();

    let solution = outcome.into_solution().unwrap();
    assert_eq!(solution.chain.points(), expected.as_slice());
    assert!(solution.chain.fits(2));
}

#[test]
pub fn straight_snake_has_no_folding() {
    let outcome = solve(vec![(0, 0), (1, 0), (2, 0), (3, 0)], 3);

    assert_eq!(outcome, SearchOutcome::NoSolution);
}

#[test]
pub fn reference_puzzle() {
    let path = SnakePath::reference();
    let solver = Solver::new(&path, 3).unwrap();

    let solution = solver.solve().into_solution().unwrap();
    let chain = &solution.chain;

    assert_eq!(chain.len(), 27);
    assert_eq!(extent(chain), Extent { x: 2, y: 2, z: 2 });

    let distinct: HashSet<_> = chain.iter().collect();
    assert_eq!(distinct.len(), 27);

    assert!(chain.is_folding_of(&path.lift()));
    assert!(solver.visited() > 0);

    // Replaying the reported twists on the flat snake gives the same cube.
    let replayed = solution
        .twists
        .iter()
        .fold(path.lift(), |c, t| c.twisted(t.hinge, t.quarter_turns));
    assert_eq!(&replayed, chain);
}

#[test]
pub fn reference_puzzle_in_parallel() {
    let path = SnakePath::reference();
    let solver = Solver::new(&path, 3).unwrap();

    let solution = solver.solve_parallel().into_solution().unwrap();

    assert!(solution.chain.fits(3));
    assert_eq!(solution.chain.extent(), Extent { x: 2, y: 2, z: 2 });
    assert!(solution.chain.is_folding_of(&path.lift()));
}

#[test]
pub fn sequential_search_is_deterministic() {
    let path = SnakePath::reference();
    let a = Solver::new(&path, 3).unwrap().solve();
    let b = Solver::new(&path, 3).unwrap().solve();

    assert_eq!(a, b);
}

#[test]
pub fn infeasible_prefixes_stay_infeasible() {
    let chain = SnakePath::reference().lift();

    let first_bad = (1..=chain.len())
        .find(|n| !feasible(&chain[..*n], 3))
        .unwrap();

    for n in first_bad..=chain.len() {
        assert!(!feasible(&chain[..n], 3), "prefix of length {n}");
    }
}

#[test]
pub fn validation_matches_definition() {
    let candidates: Vec<Vec<(i32, i32)>> = vec![
        vec![(0, 0), (1, 0)],
        vec![(0, 0), (0, -1), (1, -1)],
        vec![(0, 0), (2, 0)],
        vec![(0, 0), (1, 1)],
        vec![(0, 0), (1, 0), (0, 0)],
        vec![(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)],
        vec![(0, 0)],
        vec![],
    ];

    for points in candidates {
        let adjacent = points
            .windows(2)
            .all(|w| (w[0].0 - w[1].0).abs() + (w[0].1 - w[1].1).abs() == 1);
        let distinct = points.iter().collect::<HashSet<_>>().len() == points.len();
        let expected = points.len() >= 2 && adjacent && distinct;

        assert_eq!(
            SnakePath::new(points.clone()).is_ok(),
            expected,
            "{points:?}"
        );
    }
}

#[test]
pub fn solve_from_file_and_store_result() {
    let text = "0,0\n1,0\n1,1\n2,1\n2,2\n3,2\n";

    let path = SnakePath::new(read_path(text.as_bytes()).unwrap()).unwrap();
    let solution = Solver::new(&path, 2)
        .unwrap()
        .solve()
        .into_solution()
        .unwrap();

    let bytes = write_folding(&solution.chain, Compression::Gzip, Vec::new()).unwrap();
    let stored = crate::chain_file::read_folding(bytes.as_slice()).unwrap();

    assert_eq!(stored, solution.chain);
    assert!(stored.is_folding_of(&path.lift()));
}
