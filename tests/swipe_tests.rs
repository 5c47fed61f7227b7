//! Swipe validation integration tests.
//!
//! Covers every rejection reason, the precedence between them, budget
//! accounting, and that refused swipes leave the puzzle untouched.

use pipe_swipe::core::{Direction, EngineConfig, GoalKind, Grid, PipeShape, Position, TileId, TileSpec};
use pipe_swipe::engine::Puzzle;
use pipe_swipe::events::{Event, SwipeRejection};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// A 4x2 board with no start, so nothing ever resolves:
///
/// ```text
/// y=1  .  .  .  .
/// y=0  P  .  G  B
/// ```
///
/// P is a movable pipe, G a goal (fixed), B a plain blocker.
fn board(budget: u32) -> Puzzle {
    let mut grid = Grid::new(4, 2);
    grid.place(pos(0, 0), TileSpec::pipe(PipeShape::Horizontal)).unwrap();
    grid.place(pos(2, 0), TileSpec::goal(GoalKind::Score, [Direction::Left])).unwrap();
    grid.place(pos(3, 0), TileSpec::plain()).unwrap();
    Puzzle::from_grid(grid, budget, EngineConfig::default())
}

fn layout(puzzle: &Puzzle) -> Vec<(TileId, Position)> {
    puzzle.grid().tiles().map(|t| (t.id(), t.position())).collect()
}

fn rejection(puzzle: &mut Puzzle, from: Position, to: Position) -> Option<SwipeRejection> {
    puzzle.submit_swipe(from, to).rejection()
}

// =============================================================================
// Acceptance
// =============================================================================

/// Test that a valid swipe moves the tile immediately and spends one move.
#[test]
fn test_accepted_swipe_moves_tile() {
    let mut puzzle = board(3);
    let id = puzzle.grid().tile_id_at(pos(0, 0)).unwrap();

    assert!(puzzle.submit_swipe(pos(0, 0), pos(1, 0)).is_accepted());
    assert_eq!(puzzle.grid().tile_id_at(pos(1, 0)), Some(id));
    assert!(puzzle.grid().is_free(pos(0, 0)));
    assert_eq!(puzzle.budget(), 2);

    let events = puzzle.step(0.0);
    assert_eq!(
        events,
        vec![
            Event::TileMoved {
                tile: id,
                from: pos(0, 0),
                to: pos(1, 0),
            },
            Event::BudgetChanged(2),
        ]
    );
}

/// Test that a tile can move up and back down once it settles.
#[test]
fn test_swipe_in_all_directions() {
    let mut puzzle = board(10);
    let path = [pos(0, 1), pos(1, 1), pos(1, 0), pos(0, 0)];
    let mut here = pos(0, 0);
    for next in path {
        assert!(puzzle.submit_swipe(here, next).is_accepted(), "{here} -> {next}");
        puzzle.settle(0.05, 100);
        here = next;
    }
    assert_eq!(puzzle.budget(), 6);
    assert!(puzzle.grid().is_consistent());
}

// =============================================================================
// Rejections
// =============================================================================

/// Test each rejection reason in isolation.
#[test]
fn test_rejection_reasons() {
    let mut puzzle = board(3);

    assert_eq!(rejection(&mut puzzle, pos(0, 0), pos(0, 0)), Some(SwipeRejection::SameCell));
    assert_eq!(rejection(&mut puzzle, pos(0, 0), pos(-1, 0)), Some(SwipeRejection::OutOfBounds));
    assert_eq!(rejection(&mut puzzle, pos(9, 9), pos(0, 0)), Some(SwipeRejection::OutOfBounds));
    assert_eq!(rejection(&mut puzzle, pos(1, 1), pos(1, 0)), Some(SwipeRejection::NoTile));
    assert_eq!(rejection(&mut puzzle, pos(2, 0), pos(2, 1)), Some(SwipeRejection::NotMovable));
    assert_eq!(rejection(&mut puzzle, pos(3, 0), pos(2, 0)), Some(SwipeRejection::DestinationOccupied));
    assert_eq!(rejection(&mut puzzle, pos(0, 0), pos(1, 1)), Some(SwipeRejection::NotAdjacent));
    assert_eq!(rejection(&mut puzzle, pos(0, 0), pos(0, 2)), Some(SwipeRejection::OutOfBounds));

    assert_eq!(puzzle.budget(), 3);
}

/// Test that a tile still sliding cannot be swiped again.
#[test]
fn test_busy_tile_rejected() {
    let mut puzzle = board(3);
    assert!(puzzle.submit_swipe(pos(0, 0), pos(1, 0)).is_accepted());
    assert_eq!(rejection(&mut puzzle, pos(1, 0), pos(1, 1)), Some(SwipeRejection::TileBusy));

    puzzle.settle(0.05, 100);
    assert!(puzzle.submit_swipe(pos(1, 0), pos(1, 1)).is_accepted());
}

/// Test that an empty budget wins over every other reason.
#[test]
fn test_budget_checked_first() {
    let mut puzzle = board(0);
    assert_eq!(rejection(&mut puzzle, pos(0, 0), pos(0, 0)), Some(SwipeRejection::BudgetExhausted));
    assert_eq!(rejection(&mut puzzle, pos(5, 5), pos(1, 1)), Some(SwipeRejection::BudgetExhausted));
}

/// Test that a refused swipe reports itself and changes nothing else.
#[test]
fn test_rejected_swipe_is_noop() {
    let mut puzzle = board(3);
    let before = layout(&puzzle);

    let result = puzzle.submit_swipe(pos(0, 0), pos(2, 1));
    assert!(!result.is_accepted());
    assert_eq!(layout(&puzzle), before);
    assert_eq!(puzzle.budget(), 3);
    assert!(!puzzle.is_animating());

    let events = puzzle.step(0.0);
    assert_eq!(events, vec![Event::SwipeRejected(SwipeRejection::NotAdjacent)]);
}

// =============================================================================
// Budget
// =============================================================================

/// Test budget exhaustion: one move allowed, the second valid swipe refused.
#[test]
fn test_budget_exhaustion() {
    let mut puzzle = board(1);

    assert!(puzzle.submit_swipe(pos(0, 0), pos(1, 0)).is_accepted());
    let events = puzzle.settle(0.05, 100);
    assert!(events.contains(&Event::BudgetChanged(0)));
    assert!(events.contains(&Event::BudgetExhausted));
    assert_eq!(puzzle.budget(), 0);

    // Geometrically valid, but no moves remain.
    let before = layout(&puzzle);
    assert_eq!(rejection(&mut puzzle, pos(1, 0), pos(1, 1)), Some(SwipeRejection::BudgetExhausted));
    assert_eq!(layout(&puzzle), before);
    assert_eq!(puzzle.budget(), 0);
}

/// Test that budget exhaustion is reported exactly once.
#[test]
fn test_budget_exhausted_event_once() {
    let mut puzzle = board(2);
    puzzle.submit_swipe(pos(0, 0), pos(1, 0));
    puzzle.settle(0.05, 100);
    puzzle.submit_swipe(pos(1, 0), pos(1, 1));
    puzzle.submit_swipe(pos(1, 1), pos(0, 1));

    let events = puzzle.settle(0.05, 100);
    let exhausted = events.iter().filter(|e| **e == Event::BudgetExhausted).count();
    assert_eq!(exhausted, 1);
    assert!(events.contains(&Event::SwipeRejected(SwipeRejection::BudgetExhausted)));
}
