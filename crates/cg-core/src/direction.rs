//! One-way road directions and intersection turn permissions.
//!
//! The integer codes are part of the persisted record format:
//!
//! | Code | Meaning                     |
//! |------|-----------------------------|
//! | `0`  | East (+x)                   |
//! | `1`  | West (−x)                   |
//! | `2`  | North (+y)                  |
//! | `3`  | South (−y)                  |
//! | `-1` | intersection (no direction) |
//! | `-2` | access road (not routed)    |

// ── Axis ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// East/West traffic.
    Horizontal,
    /// North/South traffic.
    Vertical,
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    East = 0,
    West = 1,
    North = 2,
    South = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Decode a persisted direction code; `None` for anything outside `0..=3`.
    pub const fn from_code(code: i32) -> Option<Direction> {
        match code {
            0 => Some(Direction::East),
            1 => Some(Direction::West),
            2 => Some(Direction::North),
            3 => Some(Direction::South),
            _ => None,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::Horizontal,
            Direction::North | Direction::South => Axis::Vertical,
        }
    }

    /// Exit direction after a right turn.
    pub const fn turn_right(self) -> Direction {
        match self {
            Direction::East => Direction::South,
            Direction::West => Direction::North,
            Direction::North => Direction::East,
            Direction::South => Direction::West,
        }
    }

    /// Exit direction after a left turn.
    pub const fn turn_left(self) -> Direction {
        match self {
            Direction::East => Direction::North,
            Direction::West => Direction::South,
            Direction::North => Direction::West,
            Direction::South => Direction::East,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::East => "East",
            Direction::West => "West",
            Direction::North => "North",
            Direction::South => "South",
        };
        f.write_str(s)
    }
}

// ── TurnRule ──────────────────────────────────────────────────────────────────

/// The single turn permitted to traffic arriving along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnRule {
    Right,
    Left,
    #[default]
    NoTurn,
}

impl TurnRule {
    pub const fn code(self) -> i32 {
        match self {
            TurnRule::Right => 0,
            TurnRule::Left => 1,
            TurnRule::NoTurn => -1,
        }
    }

    /// `0` is right, `1` is left, every other code means no turn.
    pub const fn from_code(code: i32) -> TurnRule {
        match code {
            0 => TurnRule::Right,
            1 => TurnRule::Left,
            _ => TurnRule::NoTurn,
        }
    }

    /// Exit taken by traffic arriving in `incoming`, if any.
    pub const fn apply(self, incoming: Direction) -> Option<Direction> {
        match self {
            TurnRule::Right => Some(incoming.turn_right()),
            TurnRule::Left => Some(incoming.turn_left()),
            TurnRule::NoTurn => None,
        }
    }
}

// ── DirectionSet ──────────────────────────────────────────────────────────────

/// Small bitset of directions; iteration order is East, West, North, South.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}
