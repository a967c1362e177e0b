//! Consumer-side view of rendered board text.
//!
//! The engine renders one line per row with space-separated cell tokens. Drivers
//! parse that text back with [`BoardView`] instead of reaching into engine state.

use std::{fmt, str::FromStr};

use crate::models::{Cell, ParseCellError, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    Empty,
    Cell(ParseCellError),
    Ragged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("board text has no rows"),
            Self::Cell(e) => write!(f, "{e}"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
        }
    }
}

impl std::error::Error for ParseBoardError {}

impl From<ParseCellError> for ParseBoardError {
    fn from(value: ParseCellError) -> Self {
        Self::Cell(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    cells: Vec<Vec<Cell>>,
}

impl BoardView {
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Positions still hidden and unflagged, in row-major order.
    pub fn hidden_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_hidden())
                    .map(move |(col, _)| Pos::new(row, col))
            })
            .collect()
    }

    pub fn count(&self, wanted: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == wanted).count()
    }
}

impl FromStr for BoardView {
    type Err = ParseBoardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let cells = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(str::parse::<Cell>)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<Vec<Cell>>, _>>()?;

        let expected = cells.first().map(Vec::len).ok_or(ParseBoardError::Empty)?;
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ParseBoardError::Ragged {
                row,
                expected,
                found,
            });
        }

        Ok(Self { cells })
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
