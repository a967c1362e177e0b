use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::Pos;

/// The action vocabulary understood by the engine. Unflagging is a second `Flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ActionKind {
    #[serde(rename = "reveal")]
    Reveal,
    #[serde(rename = "flag")]
    Flag,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActionError(pub String);

impl fmt::Display for UnknownActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {:?}", self.0)
    }
}

impl std::error::Error for UnknownActionError {}

impl FromStr for ActionKind {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reveal" => Ok(Self::Reveal),
            "flag" => Ok(Self::Flag),
            other => Err(UnknownActionError(other.to_string())),
        }
    }
}

/// One move chosen by a driver. Coordinates are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Action {
    pub action: ActionKind,
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn reveal(pos: Pos) -> Self {
        Self {
            action: ActionKind::Reveal,
            row: pos.row,
            col: pos.col,
        }
    }

    pub fn flag(pos: Pos) -> Self {
        Self {
            action: ActionKind::Flag,
            row: pos.row,
            col: pos.col,
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}

/// Score summary. `steps` counts tiles that are revealed or flagged, not moves made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    pub won: bool,
    pub revealed: usize,
    pub steps: usize,
}
