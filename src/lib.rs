//! Paper Roll Removal Library
//!
//! Simulates forklifts clearing a warehouse grid of paper rolls. A roll is
//! accessible only while fewer than 4 of its 8 surrounding cells also hold
//! rolls; each round removes every accessible roll at once, which can
//! unlock rolls deeper in the block for the next round. Erosion continues
//! until nothing accessible remains, which either clears the grid or
//! leaves a permanently boxed-in core.

pub mod eroder;
pub mod grid;

pub use eroder::{Eroder, Round, Rounds, RunSummary};
pub use grid::{Grid, GridError, Pos};
