//! Per-level runtime state: move budget, level index, completion.

use serde::{Deserialize, Serialize};

/// Mutable state that lives alongside the grid while a level is played.
///
/// The budget is a move counter, not a clock: each accepted swipe spends
/// one, time-bonus goals add some back, and an empty budget blocks further
/// swipes without interrupting animations already running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRuntimeState {
    /// Remaining swipes.
    pub budget: u32,

    /// Index of the level in its campaign (0 for standalone puzzles).
    pub level_index: usize,

    /// Set once every Start tile has been used up.
    pub complete: bool,
}

impl LevelRuntimeState {
    /// Fresh state for a level.
    #[must_use]
    pub const fn new(budget: u32, level_index: usize) -> Self {
        Self {
            budget,
            level_index,
            complete: false,
        }
    }

    #[must_use]
    pub const fn has_budget(&self) -> bool {
        self.budget > 0
    }

    /// Spend one move. Returns false if the budget was already empty.
    pub fn spend(&mut self) -> bool {
        match self.budget.checked_sub(1) {
            Some(rest) => {
                self.budget = rest;
                true
            }
            None => false,
        }
    }

    /// Add moves, saturating at `u32::MAX`.
    pub fn grant(&mut self, amount: u32) {
        self.budget = self.budget.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_until_empty() {
        let mut state = LevelRuntimeState::new(2, 0);
        assert!(state.spend());
        assert!(state.spend());
        assert!(!state.has_budget());
        assert!(!state.spend());
        assert_eq!(state.budget, 0);
    }

    #[test]
    fn test_grant_saturates() {
        let mut state = LevelRuntimeState::new(u32::MAX - 1, 3);
        state.grant(5);
        assert_eq!(state.budget, u32::MAX);
        assert_eq!(state.level_index, 3);
        assert!(!state.complete);
    }
}
