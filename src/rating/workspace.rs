//! Reusable scratch storage for batch updates

use crate::rating::functions::{expected_score, g};
use crate::rating::glicko2::Rating;

/// Per-opponent `g` and `E` tables reused across batch updates
///
/// A workspace belongs to whoever drives the updates (one per worker when
/// ratings are processed in parallel). Its buffers only ever grow; every
/// call rewrites the first `n` entries before they are read.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    g_table: Vec<f64>,
    e_table: Vec<f64>,
}

impl Workspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workspace pre-sized for batches of `capacity` opponents
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            g_table: Vec::with_capacity(capacity),
            e_table: Vec::with_capacity(capacity),
        }
    }

    /// Largest batch the workspace can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.g_table.capacity().min(self.e_table.capacity())
    }

    /// Fill the tables for a player rated `mu` against `opponents`
    pub(crate) fn tabulate(&mut self, mu: f64, opponents: &[Rating]) -> (&[f64], &[f64]) {
        self.g_table.clear();
        self.e_table.clear();

        for opponent in opponents {
            let weight = g(opponent.deviation_internal());
            self.g_table.push(weight);
            self.e_table
                .push(expected_score(weight, opponent.rating_internal(), mu));
        }

        (&self.g_table, &self.e_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_grows_and_keeps_capacity() {
        let mut workspace = Workspace::new();
        assert_eq!(workspace.capacity(), 0);

        let opponents = vec![Rating::default(); 8];
        let (g_table, e_table) = workspace.tabulate(0.0, &opponents);
        assert_eq!(g_table.len(), 8);
        assert_eq!(e_table.len(), 8);
        assert!(workspace.capacity() >= 8);

        let (g_table, e_table) = workspace.tabulate(0.0, &opponents[..2]);
        assert_eq!(g_table.len(), 2);
        assert_eq!(e_table.len(), 2);
        assert!(workspace.capacity() >= 8);
    }

    #[test]
    fn test_smaller_batch_does_not_see_stale_entries() {
        let mut workspace = Workspace::with_capacity(4);
        let strong = Rating::new(2200.0, 50.0, 0.06).unwrap();
        let weak = Rating::new(900.0, 300.0, 0.06).unwrap();

        workspace.tabulate(0.0, &[strong, strong, strong, strong]);
        let (g_table, e_table) = workspace.tabulate(0.0, &[weak]);

        assert_eq!(g_table, &[g(weak.deviation_internal())]);
        assert!(e_table[0] > 0.5);
    }
}
