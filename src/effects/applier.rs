//! Applying a claim to the level.
//!
//! The `EffectApplier` interprets the goal reached by the resolver and
//! mutates grid and runtime state:
//!
//! | goal | tiles that turn Jubilant | other effect |
//! |---|---|---|
//! | Score | whole claim path | none |
//! | Bomb | the goal only | goal leaves the grid when its animation ends |
//! | TimeBonus | the goal only | budget += goal bonus |
//!
//! Afterwards it recomputes level completion: a level is complete once
//! every Start tile is used up. Completion is reported, never acted on.

use log::info;

use crate::connectivity::Claim;
use crate::core::{GoalKind, Grid, LevelRuntimeState, TileId};
use crate::events::Event;

/// Applies claim effects to grid and runtime state.
pub struct EffectApplier;

impl EffectApplier {
    /// Apply the effect of `claim` and return the resulting events.
    ///
    /// A claim whose goal is missing or not a Goal tile is ignored.
    pub fn apply(grid: &mut Grid, state: &mut LevelRuntimeState, claim: &Claim) -> Vec<Event> {
        let mut events = Vec::new();

        let Some((kind, bonus)) = grid
            .tile(claim.goal)
            .and_then(|goal| goal.goal_kind().map(|kind| (kind, goal.bonus())))
        else {
            return events;
        };

        info!("goal {} claimed ({kind:?})", claim.goal);
        events.push(Event::GoalClaimed {
            tile: claim.goal,
            goal: kind,
        });

        match kind {
            GoalKind::Score => {
                for &id in &claim.path {
                    Self::jubilate(grid, id, &mut events);
                }
            }
            GoalKind::Bomb => {
                Self::jubilate(grid, claim.goal, &mut events);
            }
            GoalKind::TimeBonus => {
                Self::jubilate(grid, claim.goal, &mut events);
                if bonus > 0 {
                    state.grant(bonus);
                    events.push(Event::BudgetChanged(state.budget));
                }
            }
        }

        if !state.complete && Self::is_level_complete(grid) {
            state.complete = true;
            info!("level {} complete", state.level_index);
            events.push(Event::LevelComplete);
        }

        events
    }

    /// Whether every Start tile on the grid is used up.
    ///
    /// A grid without Start tiles counts as complete.
    #[must_use]
    pub fn is_level_complete(grid: &Grid) -> bool {
        grid.start_tiles().all(|t| t.used_up())
    }

    fn jubilate(grid: &mut Grid, id: TileId, events: &mut Vec<Event>) {
        if let Some(tile) = grid.tile_mut(id) {
            if tile.jubilate() {
                events.push(Event::TileJubilant(id));
            }
        }
    }
}
