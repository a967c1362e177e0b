use std::fmt;

/// Rejected construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    EmptyBoard { rows: usize, cols: usize },
    BoardTooLarge { rows: usize, cols: usize, max_cells: usize },
    TooManyMines { mines: usize, max: usize },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard { rows, cols } => {
                write!(f, "board must have at least one row and column, got {rows}x{cols}")
            }
            Self::BoardTooLarge {
                rows,
                cols,
                max_cells,
            } => write!(f, "a {rows}x{cols} board exceeds the limit of {max_cells} tiles"),
            Self::TooManyMines { mines, max } => {
                write!(f, "{mines} mines requested but at most {max} fit with a safe first move")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// Non-fatal rejection of a driver action. The game is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    GameOver,
    OutOfBounds { row: usize, col: usize },
    UnknownAction(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => f.write_str("Game is already over."),
            Self::OutOfBounds { row, col } => write!(f, "Invalid coordinates: ({row}, {col})"),
            Self::UnknownAction(_) => f.write_str("Invalid action."),
        }
    }
}

impl std::error::Error for ActionError {}
