//! Shared types and constants
//!
//! Pure data used by every other crate: piece kinds, rotation states, board
//! cells, player commands and the timing constants of the speed curve. Nothing
//! here performs I/O.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Rows grow downward from
//! row 0 at the top; columns grow rightward from column 0.
//!
//! # Speed Curve
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 500 | Gravity interval at the start of a game |
//! | `DROP_STEP_MS` | 10 | Interval reduction per threshold |
//! | `ROWS_PER_STEP` | 10 | Cleared rows per threshold |
//! | `DROP_FLOOR_MS` | 100 | Interval floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{CellTag, Command, PieceKind, Rotation};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert!(CellTag::Obstacle.is_obstacle());
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! ```

/// Default board width in cells
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: u16 = 20;

/// Gravity interval when a game starts (milliseconds per row)
pub const INITIAL_DROP_MS: u32 = 500;

/// How much the gravity interval shrinks per threshold
pub const DROP_STEP_MS: u32 = 10;

/// Cleared rows needed to reach the next threshold
pub const ROWS_PER_STEP: u32 = 10;

/// Gravity interval floor; once reached the interval is frozen
pub const DROP_FLOOR_MS: u32 = 100;

/// The seven tetromino piece kinds
///
/// - **I**: horizontal bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("brick"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Single uppercase letter used by the preview and HUD
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states, cycling North → East → South → West → North
///
/// `North` is the spawn orientation and has index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for an index, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Index of this rotation (0..=3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Next rotation clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Tag carried by an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellTag {
    /// Cell belongs to a piece of this kind (active or locked)
    Piece(PieceKind),
    /// Indestructible filler; a row holding one never counts as complete.
    /// Off-board reads to the sides and below also report this tag.
    Obstacle,
}

impl CellTag {
    pub fn is_obstacle(&self) -> bool {
        matches!(self, CellTag::Obstacle)
    }

    pub fn piece(&self) -> Option<PieceKind> {
        match self {
            CellTag::Piece(kind) => Some(*kind),
            CellTag::Obstacle => None,
        }
    }
}

impl From<PieceKind> for CellTag {
    fn from(kind: PieceKind) -> Self {
        CellTag::Piece(kind)
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(tag)`: occupied
pub type Cell = Option<CellTag>;

/// Player commands routed from the input mapper to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Rotate the active piece one step clockwise, in place
    Rotate,
    /// Move one column left
    MoveLeft,
    /// Move one column right
    MoveRight,
    /// Move one row down
    SoftDrop,
    /// Move down until blocked
    HardDrop,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(Command::Rotate),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Rotate => "rotate",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_curve_constants() {
        assert_eq!(INITIAL_DROP_MS, 500);
        assert_eq!(DROP_STEP_MS, 10);
        assert_eq!(ROWS_PER_STEP, 10);
        assert_eq!(DROP_FLOOR_MS, 100);
    }

    #[test]
    fn rotation_index_wraps() {
        for i in 0..12 {
            assert_eq!(Rotation::from_index(i).index(), i % 4);
        }
    }

    #[test]
    fn obstacle_is_not_a_piece() {
        assert_eq!(CellTag::Obstacle.piece(), None);
        assert_eq!(CellTag::from(PieceKind::J).piece(), Some(PieceKind::J));
        assert!(!CellTag::Piece(PieceKind::J).is_obstacle());
    }

    #[test]
    fn command_names_roundtrip() {
        for cmd in [
            Command::Rotate,
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }
}
