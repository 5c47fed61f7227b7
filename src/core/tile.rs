//! Tiles: per-cell entities with pipe ports and a motion lifecycle.
//!
//! ## Kinds
//!
//! A single `Tile` record carries a `TileKind` tag; behaviour that differs
//! per kind (movable, removable, default ports) is selected by matching on
//! the tag:
//!
//! | kind | movable | removable |
//! |---|---|---|
//! | Plain | yes | no |
//! | Pipe | yes | no |
//! | Start | no | no |
//! | Goal(Score / TimeBonus) | no | no |
//! | Goal(Bomb) | no | yes |
//!
//! ## Motion
//!
//! ```text
//! Idle ──swipe──▶ Swiping ──progress ≥ 1──▶ Idle
//!   any (not Removed) ──claim──▶ Jubilant ──done──▶ Idle | Removed
//! ```
//!
//! Motion is cosmetic timing only. A tile's `position` changes the moment
//! a swipe is accepted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::EngineConfig;
use super::direction::{Direction, Position};
use super::entity::TileId;

/// Open pipe edges of a tile, in declaration order, without duplicates.
pub type Ports = SmallVec<[Direction; 4]>;

/// Collect ports, dropping repeated directions but keeping first-seen order.
pub(crate) fn collect_ports(ports: impl IntoIterator<Item = Direction>) -> Ports {
    let mut out = Ports::new();
    for dir in ports {
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    out
}

/// What a goal does when it is claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    /// Every tile on the claim path celebrates.
    Score,
    /// The goal celebrates and then vacates its cell.
    Bomb,
    /// The goal celebrates and adds to the move budget.
    TimeBonus,
}

/// The six two-port pipe pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeShape {
    /// Straight, 0°: left–right.
    Horizontal,
    /// Straight, 90°: up–down.
    Vertical,
    /// L, 0°: up–right.
    UpRight,
    /// L, 90°: right–down.
    RightDown,
    /// R, 0°: down–left.
    DownLeft,
    /// R, 90°: left–up.
    LeftUp,
}

impl PipeShape {
    /// The two ports of this pipe.
    #[must_use]
    pub const fn ports(self) -> [Direction; 2] {
        match self {
            PipeShape::Horizontal => [Direction::Left, Direction::Right],
            PipeShape::Vertical => [Direction::Up, Direction::Down],
            PipeShape::UpRight => [Direction::Up, Direction::Right],
            PipeShape::RightDown => [Direction::Right, Direction::Down],
            PipeShape::DownLeft => [Direction::Down, Direction::Left],
            PipeShape::LeftUp => [Direction::Left, Direction::Up],
        }
    }
}

/// Kind tag of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// A portless, movable blocker.
    Plain,
    /// A source of connections.
    Start,
    /// A connection target.
    Goal { goal: GoalKind, bonus: u32 },
    /// A movable two-port pipe.
    Pipe(PipeShape),
}

impl TileKind {
    /// Whether swipes may relocate tiles of this kind.
    #[must_use]
    pub const fn default_movable(self) -> bool {
        matches!(self, TileKind::Plain | TileKind::Pipe(_))
    }

    /// Whether a claim deletes tiles of this kind from the grid.
    #[must_use]
    pub const fn default_removable(self) -> bool {
        matches!(
            self,
            TileKind::Goal {
                goal: GoalKind::Bomb,
                ..
            }
        )
    }
}

/// Motion/claim lifecycle of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MotionState {
    /// At rest.
    Idle,
    /// Travelling from `origin` to `destination`; `progress` runs 0.0 → 1.0.
    Swiping {
        origin: Position,
        destination: Position,
        progress: f32,
    },
    /// Celebrating a claim; cannot be swiped.
    Jubilant { elapsed: f32 },
    /// Terminal: the tile left the grid.
    Removed,
}

/// Transition reported by [`Tile::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionChange {
    /// Swiping → Idle.
    Settled,
    /// Jubilant → Idle (`removed == false`) or Jubilant → Removed.
    JubilationFinished { removed: bool },
}

/// Description of a tile before it is placed on a grid.
///
/// ```
/// use pipe_swipe::core::{Direction, GoalKind, TileSpec};
///
/// let start = TileSpec::start([Direction::Right]);
/// assert!(!start.movable());
///
/// let bomb = TileSpec::goal(GoalKind::Bomb, [Direction::Left]);
/// assert!(bomb.removable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub kind: TileKind,
    pub ports: Ports,
}

impl TileSpec {
    /// A tile with explicit kind and ports.
    pub fn new(kind: TileKind, ports: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            kind,
            ports: collect_ports(ports),
        }
    }

    /// A portless plain tile.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(TileKind::Plain, [])
    }

    /// A pipe with the ports of its shape.
    #[must_use]
    pub fn pipe(shape: PipeShape) -> Self {
        Self::new(TileKind::Pipe(shape), shape.ports())
    }

    /// A pipe with arbitrary ports (e.g. a four-way junction).
    pub fn custom_pipe(shape: PipeShape, ports: impl IntoIterator<Item = Direction>) -> Self {
        Self::new(TileKind::Pipe(shape), ports)
    }

    /// A Start tile.
    pub fn start(ports: impl IntoIterator<Item = Direction>) -> Self {
        Self::new(TileKind::Start, ports)
    }

    /// A Goal tile with no bonus.
    pub fn goal(goal: GoalKind, ports: impl IntoIterator<Item = Direction>) -> Self {
        Self::new(TileKind::Goal { goal, bonus: 0 }, ports)
    }

    /// A time-bonus Goal tile.
    pub fn time_bonus(bonus: u32, ports: impl IntoIterator<Item = Direction>) -> Self {
        Self::new(
            TileKind::Goal {
                goal: GoalKind::TimeBonus,
                bonus,
            },
            ports,
        )
    }

    /// Map a level tile code to a spec.
    ///
    /// `Ok(None)` is the void code 0. Unknown codes are returned as `Err`.
    pub fn from_code(code: i32, config: &EngineConfig) -> Result<Option<Self>, i32> {
        let spec = match code {
            0 => return Ok(None),
            1 => Self::plain(),
            2 => Self::start(config.start_ports.iter().copied()),
            3 => Self::goal(GoalKind::Score, config.goal_ports.iter().copied()),
            4 => Self::pipe(PipeShape::Horizontal),
            5 => Self::pipe(PipeShape::Vertical),
            6 => Self::pipe(PipeShape::UpRight),
            7 => Self::pipe(PipeShape::RightDown),
            8 => Self::pipe(PipeShape::DownLeft),
            9 => Self::pipe(PipeShape::LeftUp),
            10 => Self::goal(GoalKind::Bomb, config.goal_ports.iter().copied()),
            11 => Self::time_bonus(config.time_bonus, config.goal_ports.iter().copied()),
            other => return Err(other),
        };
        Ok(Some(spec))
    }

    /// Default movability for this spec's kind.
    #[must_use]
    pub fn movable(&self) -> bool {
        self.kind.default_movable()
    }

    /// Default removability for this spec's kind.
    #[must_use]
    pub fn removable(&self) -> bool {
        self.kind.default_removable()
    }
}

/// A tile placed on a grid.
///
/// Fields are read-only outside the crate; the grid owns `position`, and
/// the swipe controller and effect applier drive the lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    position: Position,
    kind: TileKind,
    ports: Ports,
    movable: bool,
    removable: bool,
    used_up: bool,
    motion: MotionState,
}

impl Tile {
    pub(crate) fn from_spec(id: TileId, position: Position, spec: TileSpec) -> Self {
        Self {
            id,
            position,
            movable: spec.movable(),
            removable: spec.removable(),
            kind: spec.kind,
            ports: spec.ports,
            used_up: false,
            motion: MotionState::Idle,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Authoritative grid coordinate.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    #[must_use]
    pub fn ports(&self) -> &[Direction] {
        &self.ports
    }

    /// Whether this tile has an open port facing `dir`.
    #[must_use]
    pub fn has_port(&self, dir: Direction) -> bool {
        self.ports.contains(&dir)
    }

    #[must_use]
    pub fn movable(&self) -> bool {
        self.movable
    }

    #[must_use]
    pub fn removable(&self) -> bool {
        self.removable
    }

    /// True once the tile took part in a winning match.
    #[must_use]
    pub fn used_up(&self) -> bool {
        self.used_up
    }

    #[must_use]
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.motion, MotionState::Idle)
    }

    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self.kind, TileKind::Start)
    }

    /// The goal kind, if this is a Goal tile.
    #[must_use]
    pub fn goal_kind(&self) -> Option<GoalKind> {
        match self.kind {
            TileKind::Goal { goal, .. } => Some(goal),
            _ => None,
        }
    }

    /// Bonus carried by a Goal tile (0 for everything else).
    #[must_use]
    pub fn bonus(&self) -> u32 {
        match self.kind {
            TileKind::Goal { bonus, .. } => bonus,
            _ => 0,
        }
    }

    /// A Goal that has not been claimed yet.
    #[must_use]
    pub fn is_open_goal(&self) -> bool {
        self.goal_kind().is_some() && !self.used_up
    }

    /// Whether the swipe controller may pick this tile up right now.
    #[must_use]
    pub fn can_swipe(&self) -> bool {
        self.movable && self.is_idle()
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Idle → Swiping. The logical position moves immediately.
    pub(crate) fn begin_swipe(&mut self, origin: Position, destination: Position) {
        self.position = destination;
        self.motion = MotionState::Swiping {
            origin,
            destination,
            progress: 0.0,
        };
    }

    /// Any non-Removed state → Jubilant.
    ///
    /// Returns false if the tile was already removed.
    pub(crate) fn jubilate(&mut self) -> bool {
        if matches!(self.motion, MotionState::Removed) {
            return false;
        }
        self.used_up = true;
        self.movable = false;
        self.motion = MotionState::Jubilant { elapsed: 0.0 };
        true
    }

    /// Advance the current animation by `dt` seconds.
    pub(crate) fn advance(&mut self, dt: f32, config: &EngineConfig) -> Option<MotionChange> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match &mut self.motion {
            MotionState::Idle | MotionState::Removed => None,
            MotionState::Swiping { progress, .. } => {
                *progress += dt * config.effective_swipe_speed();
                if *progress >= 1.0 {
                    self.motion = MotionState::Idle;
                    Some(MotionChange::Settled)
                } else {
                    None
                }
            }
            MotionState::Jubilant { elapsed } => {
                *elapsed += dt;
                if *elapsed >= config.effective_jubilation_duration() {
                    let removed = self.removable;
                    self.motion = if removed {
                        MotionState::Removed
                    } else {
                        MotionState::Idle
                    };
                    Some(MotionChange::JubilationFinished { removed })
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(spec: TileSpec) -> Tile {
        Tile::from_spec(TileId(0), Position::new(0, 0), spec)
    }

    #[test]
    fn test_code_mapping() {
        let config = EngineConfig::default();
        assert_eq!(TileSpec::from_code(0, &config), Ok(None));
        assert_eq!(TileSpec::from_code(12, &config), Err(12));
        assert_eq!(TileSpec::from_code(-1, &config), Err(-1));

        let plain = TileSpec::from_code(1, &config).unwrap().unwrap();
        assert!(plain.ports.is_empty());
        assert!(plain.movable());

        let start = TileSpec::from_code(2, &config).unwrap().unwrap();
        assert_eq!(start.kind, TileKind::Start);
        assert_eq!(start.ports.len(), 4);

        let bomb = TileSpec::from_code(10, &config).unwrap().unwrap();
        assert!(bomb.removable());
        assert!(!bomb.movable());

        let bonus = TileSpec::from_code(11, &config).unwrap().unwrap();
        assert_eq!(
            bonus.kind,
            TileKind::Goal {
                goal: GoalKind::TimeBonus,
                bonus: config.time_bonus
            }
        );
    }

    #[test]
    fn test_pipe_codes_have_two_ports() {
        let config = EngineConfig::default();
        for code in 4..=9 {
            let spec = TileSpec::from_code(code, &config).unwrap().unwrap();
            assert_eq!(spec.ports.len(), 2, "code {code}");
            assert!(spec.movable());
            assert!(!spec.removable());
        }
    }

    #[test]
    fn test_swipe_settles() {
        let config = EngineConfig::default();
        let mut tile = placed(TileSpec::pipe(PipeShape::Horizontal));
        tile.begin_swipe(Position::new(0, 0), Position::new(1, 0));

        assert_eq!(tile.position(), Position::new(1, 0));
        assert!(!tile.can_swipe());
        assert_eq!(tile.advance(0.1, &config), None);
        assert_eq!(tile.advance(0.1, &config), Some(MotionChange::Settled));
        assert!(tile.is_idle());
    }

    #[test]
    fn test_jubilation_keeps_tile() {
        let config = EngineConfig::default();
        let mut tile = placed(TileSpec::pipe(PipeShape::Vertical));

        assert!(tile.jubilate());
        assert!(tile.used_up());
        assert!(!tile.movable());
        assert_eq!(tile.advance(0.05, &config), None);
        assert_eq!(
            tile.advance(0.5, &config),
            Some(MotionChange::JubilationFinished { removed: false })
        );
        assert!(tile.is_idle());
        assert!(!tile.can_swipe());
    }

    #[test]
    fn test_removable_jubilation_ends_removed() {
        let config = EngineConfig::default();
        let mut tile = placed(TileSpec::goal(GoalKind::Bomb, [Direction::Left]));

        tile.jubilate();
        assert_eq!(
            tile.advance(1.0, &config),
            Some(MotionChange::JubilationFinished { removed: true })
        );
        assert_eq!(tile.motion(), MotionState::Removed);
        assert!(!tile.jubilate());
        assert_eq!(tile.advance(1.0, &config), None);
    }

    #[test]
    fn test_negative_delta_does_not_rewind() {
        let config = EngineConfig::default();
        let mut tile = placed(TileSpec::plain());
        tile.begin_swipe(Position::new(0, 0), Position::new(0, 1));
        tile.advance(-5.0, &config);
        match tile.motion() {
            MotionState::Swiping { progress, .. } => assert_eq!(progress, 0.0),
            other => panic!("unexpected state {other:?}"),
        }
    }
}
