use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Orthogonal neighbours in a fixed north, east, south, west order.
    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean(self, other: Pos) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Classification of a single cave tile.
///
/// The discriminants are the contract consumed by renderers and game logic
/// when mapping cells to sprites or collision behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum CellKind {
    #[default]
    Invalid = -1,
    Wall = 0,
    Floor = 1,
}

impl CellKind {
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Invalid),
            0 => Some(Self::Wall),
            1 => Some(Self::Floor),
            _ => None,
        }
    }

    pub fn is_floor(self) -> bool {
        self == Self::Floor
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Invalid => '?',
            Self::Wall => '#',
            Self::Floor => '.',
        }
    }
}

impl From<CellKind> for i8 {
    fn from(kind: CellKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i8> for CellKind {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown cell code {code}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Pos,
    pub kind: CellKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: f32,
    pub height: f32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self { width: 32.0, height: 32.0 }
    }
}
