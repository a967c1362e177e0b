use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Visible state of a single tile, as any driver sees it.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum Cell {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

impl Cell {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => f.write_str("?"),
            Self::Flagged => f.write_str("F"),
            Self::Mine => f.write_str("*"),
            Self::Revealed { adjacent } => write!(f, "{adjacent}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellError(pub String);

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cell token: {:?}", self.0)
    }
}

impl std::error::Error for ParseCellError {}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "?" => Ok(Self::Hidden),
            "F" => Ok(Self::Flagged),
            "*" => Ok(Self::Mine),
            digit => match digit.parse::<u8>() {
                Ok(adjacent) if adjacent <= 8 => Ok(Self::Revealed { adjacent }),
                _ => Err(ParseCellError(token.to_string())),
            },
        }
    }
}

/// Zero-based board coordinate.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn params(self) -> GameParams {
        let (rows, cols, mines) = match self {
            Self::Easy => (5, 5, 3),
            Self::Medium => (8, 8, 10),
            Self::Hard => (10, 10, 20),
        };
        GameParams {
            rows,
            cols,
            mines,
            ..GameParams::default()
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Construction parameters for a game. A missing `seed` means a fresh one is
/// drawn when the first tile is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameParams {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub seed: Option<u64>,
}

impl GameParams {
    /// Tile count, `None` when the shape does not fit in a `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Mine count for a given density, rounded and capped so one safe tile remains.
    /// Shapes too large to count are left untouched.
    pub fn with_density(mut self, density: f64) -> Self {
        let Some(cells) = self.cells() else {
            return self;
        };
        let wanted = (cells as f64 * density.clamp(0.0, 1.0)).round() as usize;
        self.mines = wanted.min(cells.saturating_sub(1));
        self
    }
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            mines: 3,
            seed: Some(42),
        }
    }
}
