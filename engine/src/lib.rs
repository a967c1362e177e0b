//! Single-player minesweeper engine driven through a small text protocol.
//!
//! [`MinesweeperApi`] is the entry point for drivers: it renders the board as
//! text, validates `reveal`/`flag` actions and reports the score. Mines are
//! placed on the first reveal, seeded, away from the clicked tile.
//!
//! ```
//! use minesweeper_engine::{GameParams, MinesweeperApi};
//!
//! let mut api = MinesweeperApi::new(GameParams::default()).unwrap();
//! assert_eq!(api.get_board().lines().count(), 5);
//!
//! let board = api.perform_action("reveal", 2, 2).unwrap();
//! assert!(!board.contains('*'));
//! println!("{:?}", api.get_score());
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod logic;

pub use agent::{Agent, RandomAgent, play_game};
pub use api::MinesweeperApi;
pub use error::{ActionError, ParamsError};
pub use logic::{Game, GameState};

// Re-export common types for convenience
pub use minesweeper_common::{board::*, models::*, protocol::*};
