//! Bounded, fitness-sorted record of the best solutions seen in a run.

use serde::{Deserialize, Serialize};

use smokescreen_core::constants::LEADERBOARD_CAPACITY;

/// Immutable snapshot of one solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub fitness: f64,
    pub params: Vec<f64>,
}

/// Best distinct solutions, sorted by descending fitness.
///
/// [`Leaderboard::offer`] is the only way in, so the capacity and ordering
/// hold after every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<SolutionRecord>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Insert a solution. Returns whether it made the board.
    ///
    /// Parameter vectors already on the board are ignored. Ties keep the
    /// earlier entry ahead.
    pub fn offer(&mut self, fitness: f64, params: &[f64]) -> bool {
        if self.capacity == 0 || self.entries.iter().any(|e| e.params == params) {
            return false;
        }
        let index = self.entries.partition_point(|e| e.fitness >= fitness);
        if index >= self.capacity {
            return false;
        }
        self.entries.insert(
            index,
            SolutionRecord {
                fitness,
                params: params.to_vec(),
            },
        );
        self.entries.truncate(self.capacity);
        true
    }

    pub fn entries(&self) -> &[SolutionRecord] {
        &self.entries
    }

    pub fn best(&self) -> Option<&SolutionRecord> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_entries(self) -> Vec<SolutionRecord> {
        self.entries
    }
}
