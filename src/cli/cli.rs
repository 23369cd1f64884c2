use std::time::Duration;

use clap::{Args, Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use snakecube::{chain_file, cube_size, Chain, SearchOutcome, SnakePath};

mod solve;
use solve::solve;

fn finish_bar(bar: &ProgressBar, duration: Duration, visited: usize, outcome: &SearchOutcome) {
    let time = duration.as_micros();
    let secs = time / 1_000_000;
    let micros = time % 1_000_000;

    bar.set_style(ProgressStyle::with_template("[{elapsed_precise}] {pos} {msg}").unwrap());

    let result = match outcome {
        SearchOutcome::Solved(_) => "Found a folding",
        SearchOutcome::NoSolution => "No folding exists",
        SearchOutcome::TimedOut => "Gave up",
    };

    bar.finish_with_message(format!(
        "hinges expanded. {result} after {visited} hinges in {secs}.{micros:06} s"
    ));
}

fn unknown_bar_with_pos(with_pos: bool) -> ProgressBar {
    let template = if with_pos {
        "[{elapsed_precise}] [{spinner:10.cyan/blue}] {pos} {msg}"
    } else {
        "[{elapsed_precise}] [{spinner:10.cyan/blue}] {msg}"
    };

    let style = ProgressStyle::with_template(template)
        .unwrap()
        .tick_strings(&[
            ">---------",
            "=>--------",
            "<=>-------",
            "-<=>------",
            "--<=>-----",
            "---<=>----",
            "----<=>---",
            "-----<=>--",
            "------<=>-",
            "-------<=>",
            "--------<=",
            "---------<",
            "--------<=",
            "-------<=>",
            "------<=>-",
            "-----<=>--",
            "---<=>----",
            "--<=>-----",
            "-<=>------",
            "<=>-------",
            "=>--------",
        ]);

    let bar = ProgressBar::new_spinner().with_style(style);

    bar.enable_steady_tick(Duration::from_millis(66));

    bar
}

#[derive(Clone, Parser)]
#[clap(name = "snakecube", about = "Fold snake cube puzzles into cubes")]
pub enum Opts {
    /// Search for a way to fold a snake into a cube
    Solve(SolveOpts),
    /// Check a snake description and show it
    Validate(ValidateArgs),
    /// Check that a folding file is a valid folding of a snake
    Check(CheckArgs),
}

#[derive(Clone, Args)]
pub struct SolveOpts {
    /// The snake description to fold.
    ///
    /// Defaults to the classic 27 cube snake.
    pub path: Option<String>,

    /// The edge length of the cube to fold into.
    #[clap(long, short = 'k', default_value_t = 3)]
    pub size: usize,

    /// Disable parallelism.
    #[clap(long, short = 'p')]
    pub no_parallelism: bool,

    /// Give up after this many seconds.
    #[clap(long, short = 't')]
    pub timeout: Option<u64>,

    /// Write the folding to this file.
    #[clap(long, short = 'o')]
    pub output: Option<String>,

    /// Compress the written folding file
    #[clap(long, short = 'z', value_enum, default_value = "none")]
    pub compression: Compression,
}

#[derive(Clone, Args)]
pub struct ValidateArgs {
    /// The snake description to check.
    ///
    /// Defaults to the classic 27 cube snake.
    pub path: Option<String>,
}

#[derive(Clone, Args)]
pub struct CheckArgs {
    /// The snake description that was folded
    pub path: String,

    /// The folding to check
    pub folding: String,

    /// The edge length of the cube the folding should fit in.
    #[clap(long, short = 'k', default_value_t = 3)]
    pub size: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Compression {
    None,
    Gzip,
}

impl From<Compression> for chain_file::Compression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => chain_file::Compression::None,
            Compression::Gzip => chain_file::Compression::Gzip,
        }
    }
}

fn exit(msg: &str) -> ! {
    println!("{msg}");
    std::process::exit(1);
}

/// Load and validate the snake at `path`, or the reference snake if no
/// path is given.
pub fn load_path(path: Option<&str>) -> SnakePath {
    let path = match path {
        Some(path) => path,
        None => return SnakePath::reference(),
    };

    let points = match chain_file::read_path_file(path) {
        Ok(p) => p,
        Err(e) => exit(&format!("Failed to read snake file {path}. Error: {e}")),
    };

    match SnakePath::new(points) {
        Ok(p) => p,
        Err(e) => exit(&format!("Error: {path} is not a valid snake. {e}.")),
    }
}

fn describe(path: Option<&str>) -> &str {
    path.unwrap_or("the reference snake")
}

pub fn validate(opts: &ValidateArgs) {
    let name = describe(opts.path.as_deref());
    println!("Validating {name}");

    let path = load_path(opts.path.as_deref());

    println!("Input OK, {} cubes", path.len());
    println!();
    println!("{path}");
    println!();

    let chain = path.lift();
    let hinges = chain.hinges().count();
    println!("Steps ({hinges} hinges):");
    for (i, normal) in chain.normal_vectors().enumerate() {
        let marker = if chain.is_hinge(i + 1) { " <- hinge" } else { "" };
        println!("{:>4}: {normal}{marker}", i + 1);
    }
}

pub fn check(opts: &CheckArgs) {
    let path = load_path(Some(opts.path.as_str()));

    let folding: Chain = match chain_file::read_folding_file(&opts.folding) {
        Ok(f) => f,
        Err(e) => exit(&format!(
            "Failed to read folding file {}. Error: {e}",
            opts.folding
        )),
    };

    if !folding.is_folding_of(&path.lift()) {
        exit(&format!(
            "Error: {} is not a folding of {}",
            opts.folding, opts.path
        ));
    }

    let size = match cube_size(opts.size) {
        Ok(size) => size,
        Err(e) => exit(&format!("Error: {e}.")),
    };

    let e = folding.extent();
    if !e.fits(size) {
        exit(&format!(
            "Error: a {}x{}x{} folding does not fit a {size}x{size}x{size} cube",
            u64::from(e.x) + 1,
            u64::from(e.y) + 1,
            u64::from(e.z) + 1
        ));
    }

    if !folding.fits(size) {
        exit("Error: two cubes of the folding overlap");
    }

    println!(
        "Success: {} is a valid folding of {} into a {size}x{size}x{size} cube",
        opts.folding, opts.path
    );
}

fn main() {
    let opts = Opts::parse();

    match opts {
        Opts::Solve(s) => solve(&s),
        Opts::Validate(v) => validate(&v),
        Opts::Check(c) => check(&c),
    }
}
