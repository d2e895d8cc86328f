//! Iterative removal of accessible rolls, one synchronous round at a time.
//!
//! Each round evaluates accessibility against a single pre-round snapshot,
//! then clears every accessible roll in one batch. Evaluating and removing
//! cell-by-cell instead would let earlier removals unblock later cells in
//! the same round, making results depend on scan order.

use crate::grid::{Grid, Pos};

/// One completed removal round. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// 1-based round index.
    pub index: usize,
    /// Positions cleared this round, in row-major order.
    pub removed: Vec<Pos>,
    /// Rolls still on the grid after this round.
    pub remaining: usize,
}

/// Totals reported by [`Eroder::run_to_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of rounds that removed at least one roll.
    pub rounds: usize,
    /// Rolls removed across all rounds.
    pub total_removed: usize,
    /// Rolls left permanently boxed in at the terminal state.
    pub remaining: usize,
}

/// Drives erosion over an exclusively-owned [`Grid`].
///
/// The grid mutates in place round by round. Rounds are not reversible;
/// rerunning a simulation means constructing a new `Eroder` from the
/// original snapshot. [`Eroder::with_history`] keeps an immutable copy of
/// the grid after every round for consumers that render progress.
pub struct Eroder {
    grid: Grid,
    rounds_run: usize,
    total_removed: usize,
    /// `Some` when snapshots are retained; `history[0]` is the initial
    /// grid, `history[k]` the state after round `k`.
    history: Option<Vec<Grid>>,
}

impl Eroder {
    /// Erodes in place without retaining snapshots.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            rounds_run: 0,
            total_removed: 0,
            history: None,
        }
    }

    /// Erodes while keeping a per-round snapshot copy of the grid.
    pub fn with_history(grid: Grid) -> Self {
        let initial = grid.clone();
        Self {
            grid,
            rounds_run: 0,
            total_removed: 0,
            history: Some(vec![initial]),
        }
    }

    /// The current grid state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// How many rolls could be removed right now, ignoring the cascade
    /// that later rounds would unlock. Does not mutate the grid.
    pub fn count_accessible_now(&self) -> usize {
        self.grid.count_accessible()
    }

    /// Runs one round: finds all accessible rolls against the current
    /// state, then clears them in a single batch.
    ///
    /// Returns `None` at the terminal state (no roll accessible); the grid
    /// is left untouched and repeated calls keep returning `None`.
    pub fn step(&mut self) -> Option<Round> {
        let removed = self.grid.accessible_positions();
        if removed.is_empty() {
            return None;
        }

        self.grid.clear_all(&removed);
        self.rounds_run += 1;
        self.total_removed += removed.len();

        if let Some(history) = &mut self.history {
            history.push(self.grid.clone());
        }

        Some(Round {
            index: self.rounds_run,
            removed,
            remaining: self.grid.roll_count(),
        })
    }

    /// Steps until no roll is accessible.
    ///
    /// Terminates in at most rows x cols rounds: every emitted round
    /// removes at least one roll and the roll count is bounded below by
    /// zero.
    pub fn run_to_completion(&mut self) -> RunSummary {
        while self.step().is_some() {}
        RunSummary {
            rounds: self.rounds_run,
            total_removed: self.total_removed,
            remaining: self.grid.roll_count(),
        }
    }

    /// Lazy pull-based round sequence; each `next()` is one [`step`].
    ///
    /// [`step`]: Eroder::step
    pub fn rounds(&mut self) -> Rounds<'_> {
        Rounds { eroder: self }
    }

    /// Retained snapshots, if this eroder was built with
    /// [`Eroder::with_history`].
    pub fn history(&self) -> Option<&[Grid]> {
        self.history.as_deref()
    }
}

/// Iterator adapter over [`Eroder::step`]. Finite: ends at the terminal
/// state.
pub struct Rounds<'a> {
    eroder: &'a mut Eroder,
}

impl Iterator for Rounds<'_> {
    type Item = Round;

    fn next(&mut self) -> Option<Round> {
        self.eroder.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 10x10 example grid from the puzzle statement.
    const EXAMPLE: [&str; 10] = [
        "..@@.@@@@.",
        "@@@.@.@.@@",
        "@@@@@.@.@@",
        "@.@@@@..@.",
        "@@.@@@@.@@",
        ".@@@@@@@.@",
        ".@.@.@.@@@",
        "@.@@@.@@@@",
        ".@@@@@@@@.",
        "@.@.@@@.@.",
    ];

    fn eroder(lines: &[&str]) -> Eroder {
        Eroder::new(Grid::from_lines(lines).unwrap())
    }

    #[test]
    fn test_two_by_two_clears_in_one_round() {
        // every cell has at most 3 neighbors in a 2x2 grid
        let mut eroder = eroder(&["@@", "@@"]);
        let summary = eroder.run_to_completion();
        assert_eq!(
            summary,
            RunSummary {
                rounds: 1,
                total_removed: 4,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_single_empty_cell_does_nothing() {
        let mut eroder = eroder(&["."]);
        assert_eq!(eroder.count_accessible_now(), 0);
        let summary = eroder.run_to_completion();
        assert_eq!(
            summary,
            RunSummary {
                rounds: 0,
                total_removed: 0,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_single_roll_is_removed_in_one_round() {
        let mut eroder = eroder(&["@"]);
        let round = eroder.step().unwrap();
        assert_eq!(round.index, 1);
        assert_eq!(round.removed, vec![(0, 0)]);
        assert_eq!(round.remaining, 0);
        assert!(eroder.step().is_none());
    }

    #[test]
    fn test_full_three_by_three_erodes_inward() {
        // corners (3 neighbors) go first, then the edge midpoints, then
        // the freed center
        let mut eroder = eroder(&["@@@", "@@@", "@@@"]);
        let counts: Vec<usize> = eroder.rounds().map(|round| round.removed.len()).collect();
        assert_eq!(counts, vec![4, 4, 1]);
        assert_eq!(eroder.grid().roll_count(), 0);
    }

    #[test]
    fn test_full_four_by_four_locks_after_one_round() {
        // removing the corners leaves every survivor with 4+ neighbors
        let mut eroder = eroder(&["@@@@", "@@@@", "@@@@", "@@@@"]);
        let summary = eroder.run_to_completion();
        assert_eq!(
            summary,
            RunSummary {
                rounds: 1,
                total_removed: 4,
                remaining: 12
            }
        );
    }

    #[test]
    fn test_terminal_step_is_idempotent() {
        let mut eroder = eroder(&["@@@@", "@@@@", "@@@@", "@@@@"]);
        eroder.run_to_completion();

        let terminal = eroder.grid().clone();
        assert!(eroder.step().is_none());
        assert!(eroder.step().is_none());
        assert_eq!(eroder.grid(), &terminal);

        // rerunning reports zero additional work
        let summary = eroder.run_to_completion();
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.total_removed, 4);
    }

    #[test]
    fn test_boxed_in_roll_unlocks_once_neighbors_thin_out() {
        // center starts with 8 roll neighbors; after the first round only
        // the 4 edge midpoints remain around it, after the second it is
        // free
        let grid = Grid::from_lines(&["@@@", "@@@", "@@@"]).unwrap();
        let mut eroder = Eroder::new(grid);

        assert!(!eroder.grid().is_accessible((1, 1)));
        eroder.step().unwrap();
        assert_eq!(eroder.grid().roll_neighbors((1, 1)), 4);
        assert!(!eroder.grid().is_accessible((1, 1)));
        eroder.step().unwrap();
        assert_eq!(eroder.grid().roll_neighbors((1, 1)), 0);
        assert!(eroder.grid().is_accessible((1, 1)));
    }

    #[test]
    fn test_roll_count_strictly_decreases_per_round() {
        let mut eroder = eroder(&EXAMPLE);
        let mut previous = eroder.grid().roll_count();
        for round in eroder.rounds() {
            assert!(round.remaining < previous);
            previous = round.remaining;
        }
    }

    #[test]
    fn test_round_count_is_bounded_by_cell_count() {
        let mut eroder = eroder(&EXAMPLE);
        let bound = eroder.grid().rows() * eroder.grid().cols();
        let summary = eroder.run_to_completion();
        assert!(summary.rounds <= bound);
    }

    #[test]
    fn test_example_grid_reference_run() {
        let mut eroder = eroder(&EXAMPLE);
        assert_eq!(eroder.grid().roll_count(), 71);
        assert_eq!(eroder.count_accessible_now(), 13);

        let counts: Vec<usize> = eroder.rounds().map(|round| round.removed.len()).collect();
        assert_eq!(counts, vec![13, 12, 7, 5, 2, 1, 1, 1, 1]);
        // 28 rolls stay permanently boxed in
        assert_eq!(eroder.grid().roll_count(), 28);
        assert_eq!(eroder.count_accessible_now(), 0);
    }

    #[test]
    fn test_example_grid_summary() {
        let mut eroder = eroder(&EXAMPLE);
        let summary = eroder.run_to_completion();
        assert_eq!(
            summary,
            RunSummary {
                rounds: 9,
                total_removed: 43,
                remaining: 28
            }
        );
    }

    #[test]
    fn test_history_keeps_initial_and_per_round_snapshots() {
        let grid = Grid::from_lines(&["@@@", "@@@", "@@@"]).unwrap();
        let initial = grid.clone();
        let mut eroder = Eroder::with_history(grid);
        let summary = eroder.run_to_completion();

        let history = eroder.history().unwrap();
        assert_eq!(history.len(), summary.rounds + 1);
        assert_eq!(&history[0], &initial);
        assert_eq!(history[1].render(), ".@.\n@@@\n.@.\n");
        assert_eq!(history[2].render(), "...\n.@.\n...\n");
        assert_eq!(history.last().unwrap(), eroder.grid());
    }

    #[test]
    fn test_new_does_not_retain_history() {
        let mut eroder = eroder(&["@@", "@@"]);
        eroder.run_to_completion();
        assert!(eroder.history().is_none());
    }
}
