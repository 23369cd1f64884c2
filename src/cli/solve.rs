use std::time::{Duration, Instant};

use snakecube::{chain_file, SearchOutcome, Solution, Solver};

use crate::{describe, exit, finish_bar, load_path, unknown_bar_with_pos, SolveOpts};

fn print_solution(solution: &Solution) {
    println!("{}", solution.chain);
    println!();

    let twists: Vec<_> = solution.twists.iter().map(ToString::to_string).collect();
    println!("Twists (hinge:quarter turns): {}", twists.join(" "));
    println!();

    for p in solution.chain.iter() {
        println!("{p}");
    }
}

fn save_solution(opts: &SolveOpts, solution: &Solution) {
    let Some(output) = &opts.output else {
        return;
    };

    match chain_file::write_folding_file(&solution.chain, opts.compression.into(), output) {
        Ok(_) => println!("Wrote folding to {output} ({:?})", opts.compression),
        Err(e) => exit(&format!("Failed to write folding to {output}. Error: {e}")),
    }
}

pub fn solve(opts: &SolveOpts) {
    let name = describe(opts.path.as_deref());
    let path = load_path(opts.path.as_deref());
    let k = opts.size;

    let bar = unknown_bar_with_pos(true);
    bar.set_message("hinges expanded");
    bar.println(format!(
        "Folding {name} ({} cubes) into a {k}x{k}x{k} cube",
        path.len()
    ));

    let mut solver = match Solver::new(&path, k) {
        Ok(s) => s.with_progress(bar.clone()),
        Err(e) => {
            bar.abandon();
            exit(&format!("Error: {e}."));
        }
    };

    if let Some(timeout) = opts.timeout {
        bar.println(format!("Giving up after {timeout} s"));
        solver = solver.with_timeout(Duration::from_secs(timeout));
    }

    let start = Instant::now();

    let outcome = if opts.no_parallelism {
        solver.solve()
    } else {
        solver.solve_parallel()
    };

    finish_bar(&bar, start.elapsed(), solver.visited(), &outcome);

    match outcome {
        SearchOutcome::Solved(solution) => {
            println!();
            print_solution(&solution);
            save_solution(opts, &solution);
        }
        SearchOutcome::NoSolution => exit(&format!(
            "{name} cannot be folded into a {k}x{k}x{k} cube."
        )),
        SearchOutcome::TimedOut => exit("Timed out before the search finished."),
    }
}
