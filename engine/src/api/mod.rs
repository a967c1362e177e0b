use tracing::{info, instrument, warn};

use minesweeper_common::{
    models::{GameParams, Pos},
    protocol::{Action, ActionKind, Score},
};

use crate::{
    error::{ActionError, ParamsError},
    logic::Game,
};

/// Validating front door to a [`Game`]. Drivers talk to this, never to tiles.
#[derive(Debug, Clone)]
pub struct MinesweeperApi {
    game: Game,
}

impl MinesweeperApi {
    pub fn new(params: GameParams) -> Result<Self, ParamsError> {
        info!(
            "Initializing minesweeper API with {} rows, {} cols, {} mines, seed={:?}",
            params.rows, params.cols, params.mines, params.seed
        );
        Ok(Self {
            game: Game::new(params)?,
        })
    }

    /// Current visible board as text.
    pub fn get_board(&self) -> String {
        self.game.render()
    }

    /// Validates a raw action name and coordinates, applies it and returns the new board.
    #[instrument(level = "trace", skip(self))]
    pub fn perform_action(
        &mut self,
        action: &str,
        row: usize,
        col: usize,
    ) -> Result<String, ActionError> {
        if self.game.is_terminal() {
            warn!("Rejecting {} on finished game", action);
            return Err(ActionError::GameOver);
        }

        let pos = Pos::new(row, col);
        if !self.game.contains(pos) {
            warn!("Rejecting {} at invalid coordinates {}", action, pos);
            return Err(ActionError::OutOfBounds { row, col });
        }

        match action.parse::<ActionKind>() {
            Ok(ActionKind::Reveal) => self.game.reveal(pos),
            Ok(ActionKind::Flag) => self.game.flag(pos),
            Err(_) => {
                warn!("Rejecting unknown action {:?}", action);
                return Err(ActionError::UnknownAction(action.to_string()));
            }
        }

        Ok(self.game.render())
    }

    pub fn apply(&mut self, action: Action) -> Result<String, ActionError> {
        self.perform_action(action.action.as_str(), action.row, action.col)
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_terminal()
    }

    pub fn get_score(&self) -> Score {
        self.game.score()
    }

    /// Shape, mine count and the seed in use.
    pub fn params(&self) -> GameParams {
        self.game.params()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}
