//! Paper Roll Removal
//!
//! Simulates forklifts clearing a warehouse grid of paper rolls. A roll
//! can only be reached while fewer than 4 of its 8 neighbors are rolls;
//! each round removes every reachable roll at once and may unlock deeper
//! ones for the next round. The simulator reports the accessible count,
//! runs the erosion to its terminal state, and provides terminal and
//! windowed views of the round-by-round progress.

mod visualization;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use rollout::{Eroder, Grid};

/// Simulates iterative removal of accessible paper rolls from a grid.
#[derive(Parser)]
#[command(name = "rollout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grid file (one row per line, `@` = roll).
    input: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print how many rolls are accessible right now.
    Count,
    /// Run the erosion to completion and print the totals.
    Run,
    /// Print every round to the terminal, highlighting removals in red.
    Trace,
    /// Step through the rounds in an interactive window.
    Display,
}

fn main() {
    let cli = Cli::parse();

    let grid = match load_grid(&cli.input) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Failed to load {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Command::Count) => {
            println!("{} rolls accessible", grid.count_accessible());
        }
        Some(Command::Run) => run_simulation(grid),
        Some(Command::Trace) => run_trace(grid),
        Some(Command::Display) => run_display(grid),
        None => {
            // default: run the simulation, then open the viewer
            run_simulation(grid.clone());
            println!("Controls: Left/Right step through frames, R restarts");
            run_display(grid);
        }
    }
}

/// Reads and parses a grid file.
fn load_grid(path: &Path) -> Result<Grid, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(Grid::from_text(&text)?)
}

/// Runs the erosion to its terminal state and prints the totals.
fn run_simulation(grid: Grid) {
    let mut eroder = Eroder::new(grid);
    println!("{} rolls accessible before any removal", eroder.count_accessible_now());

    let summary = eroder.run_to_completion();
    println!(
        "Removed {} rolls in {} rounds; {} remain boxed in",
        summary.total_removed, summary.rounds, summary.remaining
    );
}

/// Prints the full round-by-round trace, marking the rolls about to be
/// removed in ANSI red.
fn run_trace(grid: Grid) {
    let mut eroder = Eroder::new(grid);

    println!("Initial state ({} rolls):", eroder.grid().roll_count());
    print!("{}", eroder.grid().render());

    loop {
        let before = eroder.grid().clone();
        let Some(round) = eroder.step() else { break };

        let highlight = round.removed.iter().copied().collect();
        println!(
            "\nRound {}: removing {} rolls (shown in red):",
            round.index,
            round.removed.len()
        );
        print!("{}", before.render_highlighted(&highlight));
        println!("\nAfter removal ({} remaining):", round.remaining);
        print!("{}", eroder.grid().render());
    }

    let summary = eroder.run_to_completion();
    println!(
        "\nTotal removed: {} in {} rounds ({} remaining)",
        summary.total_removed, summary.rounds, summary.remaining
    );
}

/// Opens the interactive frame viewer for a full run.
fn run_display(grid: Grid) {
    let frames = visualization::compute_frames(grid);
    visualization::display(frames);
}
