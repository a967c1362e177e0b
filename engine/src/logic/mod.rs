use std::iter;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use minesweeper_common::{
    models::{Cell, GameParams, Pos},
    protocol::Score,
};

use crate::{
    data::{Field, RevealedState},
    error::ParamsError,
};

/// Lifecycle of a game. Mines exist only once the game has left `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Uninitialized,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Largest board accepted, in tiles.
pub const MAX_CELLS: usize = 1 << 20;

/// Checks the shape and mine count, returning the tile count.
fn validate_params(params: &GameParams) -> Result<usize, ParamsError> {
    if params.rows == 0 || params.cols == 0 {
        return Err(ParamsError::EmptyBoard {
            rows: params.rows,
            cols: params.cols,
        });
    }

    let cells = params
        .cells()
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or(ParamsError::BoardTooLarge {
            rows: params.rows,
            cols: params.cols,
            max_cells: MAX_CELLS,
        })?;

    let max = cells - 1;
    if params.mines > max {
        return Err(ParamsError::TooManyMines {
            mines: params.mines,
            max,
        });
    }

    Ok(cells)
}

#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    mines: usize,
    seed: Option<u64>,
    revealed: usize,
    total_safe: usize,
    state: GameState,
}

impl Game {
    #[instrument(level = "trace")]
    pub fn new(params: GameParams) -> Result<Self, ParamsError> {
        let cells = validate_params(&params)?;
        info!(
            "Creating new game: {}x{} with {} mines, seed {:?}",
            params.rows, params.cols, params.mines, params.seed
        );
        Ok(Self {
            field: Field::new(params.rows, params.cols),
            mines: params.mines,
            seed: params.seed,
            revealed: 0,
            total_safe: cells - params.mines,
            state: GameState::Uninitialized,
        })
    }

    /// Construction parameters, with the seed actually in use.
    pub fn params(&self) -> GameParams {
        GameParams {
            rows: self.field.rows,
            cols: self.field.cols,
            mines: self.mines,
            seed: self.seed,
        }
    }

    pub fn rows(&self) -> usize {
        self.field.rows
    }

    pub fn cols(&self) -> usize {
        self.field.cols
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    /// The seed in use. `None` until the first reveal for games created without one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total_safe(&self) -> usize {
        self.total_safe
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.field.validate_pos(&pos)
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.field.tile(pos).map(Cell::from)
    }

    /// Mine layout, empty until the first reveal has placed the mines.
    pub fn mine_positions(&self) -> Vec<Pos> {
        self.field.mine_positions()
    }

    pub fn adjacent(&self, pos: Pos) -> Option<u8> {
        self.field.tile(pos).filter(|t| !t.mine).map(|t| t.adjacent)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn score(&self) -> Score {
        Score {
            won: self.state == GameState::Won,
            revealed: self.revealed,
            steps: self.field.touched(),
        }
    }

    pub fn render(&self) -> String {
        self.field.render()
    }

    /// Seeds the generator exactly once and samples mines outside the opening.
    fn place_mines(&mut self, first: Pos) {
        let seed = *self.seed.get_or_insert_with(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        let first_index = self.field.index(first);
        let forbidden: Vec<usize> = self
            .field
            .neighbors(first)
            .chain(iter::once(first))
            .map(|pos| self.field.index(pos))
            .collect();
        let mut candidates: Vec<usize> = (0..self.field.tiles.len())
            .filter(|i| !forbidden.contains(i))
            .collect();

        if candidates.len() < self.mines {
            warn!(
                "Board too dense for a safe opening around {}, only sparing the clicked tile",
                first
            );
            candidates = (0..self.field.tiles.len())
                .filter(|&i| i != first_index)
                .collect();
        }

        for i in index::sample(&mut rng, candidates.len(), self.mines).into_iter() {
            self.field.tiles[candidates[i]].mine = true;
        }
        self.field.compute_adjacent();

        info!("Placed {} mines with seed {}", self.mines, seed);
    }

    /// Reveals from `start` outward through zero tiles. Returns how many tiles opened.
    fn flood_fill(&mut self, start: Pos) -> usize {
        let mut frontier = vec![start];
        let mut opened = 0;

        while let Some(pos) = frontier.pop() {
            let Some(tile) = self.field.tile_mut(pos) else {
                continue;
            };
            if !tile.is_hidden() {
                continue;
            }

            tile.revealed = RevealedState::Revealed;
            opened += 1;

            if tile.adjacent == 0 {
                frontier.extend(
                    self.field
                        .neighbors(pos)
                        .filter(|&n| self.field.tile(n).is_some_and(|t| t.is_hidden())),
                );
            }
        }

        self.revealed += opened;
        opened
    }

    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn reveal(&mut self, pos: Pos) {
        if self.is_terminal() {
            debug!("Ignoring reveal on finished game at {}", pos);
            return;
        }

        let Some(status) = self.field.tile(pos).map(|t| t.revealed) else {
            warn!("Invalid reveal position: {}", pos);
            return;
        };
        match status {
            RevealedState::Flagged => {
                debug!("Ignoring reveal on flagged tile {}", pos);
                return;
            }
            RevealedState::Revealed => {
                debug!("Ignoring reveal on revealed tile {}", pos);
                return;
            }
            RevealedState::Hidden => {}
        }

        if self.state == GameState::Uninitialized {
            self.place_mines(pos);
            self.state = GameState::Active;
        }

        if let Some(tile) = self.field.tile_mut(pos)
            && tile.mine
        {
            tile.revealed = RevealedState::Revealed;
            self.state = GameState::Lost;
            warn!("Mine revealed at {} - game over!", pos);
            return;
        }

        let opened = self.flood_fill(pos);

        if self.revealed == self.total_safe {
            self.state = GameState::Won;
            info!("Game won! All {} safe tiles revealed.", self.total_safe);
        } else {
            debug!(
                "Revealed {} tiles, {}/{} safe tiles open",
                opened, self.revealed, self.total_safe
            );
        }
    }

    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn flag(&mut self, pos: Pos) {
        if self.is_terminal() {
            debug!("Ignoring flag on finished game at {}", pos);
            return;
        }

        let Some(tile) = self.field.tile_mut(pos) else {
            warn!("Invalid flag position: {}", pos);
            return;
        };
        match tile.revealed {
            RevealedState::Hidden => {
                tile.revealed = RevealedState::Flagged;
                debug!("Tile {} flagged", pos);
            }
            RevealedState::Flagged => {
                tile.revealed = RevealedState::Hidden;
                debug!("Tile {} unflagged", pos);
            }
            RevealedState::Revealed => {
                debug!("Ignoring flag on revealed tile {}", pos);
            }
        }
    }
}
