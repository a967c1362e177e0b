//! Shared types for the minesweeper engine and the drivers that play it:
//! visible cells, coordinates, game parameters, the action vocabulary, the
//! score summary and a parser for rendered board text.

pub mod board;
pub mod models;
pub mod protocol;
