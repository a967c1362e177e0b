//! Drivers that play a game through the text protocol.
//!
//! An [`Agent`] only ever sees the rendered board, parsed into a [`BoardView`],
//! and answers with an [`Action`] or `None` to stop playing.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::{debug, error, info, warn};

use minesweeper_common::{board::BoardView, protocol::{Action, Score}};

use crate::api::MinesweeperApi;

pub trait Agent {
    fn select_action(&mut self, board: &BoardView) -> Option<Action>;
}

/// Reveals a uniformly random hidden, unflagged tile each turn.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &BoardView) -> Option<Action> {
        let hidden = board.hidden_positions();
        hidden.choose(&mut self.rng).copied().map(Action::reveal)
    }
}

/// Runs `agent` against `api` until the game ends or the agent gives up.
pub fn play_game<A: Agent + ?Sized>(api: &mut MinesweeperApi, agent: &mut A) -> Score {
    while !api.is_game_over() {
        let board: BoardView = match api.get_board().parse() {
            Ok(board) => board,
            Err(e) => {
                error!("Rendered board did not parse: {}", e);
                break;
            }
        };

        let Some(action) = agent.select_action(&board) else {
            info!("Agent stopped before the game ended");
            break;
        };

        match api.apply(action) {
            Ok(board) => debug!("{} {}\n{}", action.action, action.pos(), board),
            Err(e) => {
                warn!("Agent chose a rejected action: {}", e);
                break;
            }
        }
    }

    let score = api.get_score();
    info!(
        "Game finished: won={}, revealed={}, steps={}",
        score.won, score.revealed, score.steps
    );
    score
}
