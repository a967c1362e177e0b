use std::io::{self, BufRead, Write};

use minesweeper_engine::{
    ActionError, GameState, MinesweeperApi, RandomAgent, Score,
    config::{AgentKind, Config},
    play_game,
};
use serde::Serialize;
use tracing::{info, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const USAGE: &str = "Commands: reveal ROW COL | flag ROW COL | unflag ROW COL | quit (rows and columns start at 1)";

/// Rows and columns are shown 1-based to players; the engine is 0-based.
fn to_zero_based(row: usize, col: usize) -> Option<(usize, usize)> {
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

/// Final line printed to stdout.
#[derive(Debug, Serialize)]
struct Summary {
    state: GameState,
    seed: Option<u64>,
    #[serde(flatten)]
    score: Score,
}

impl Summary {
    fn new(api: &MinesweeperApi) -> Self {
        Self {
            state: api.game().state(),
            seed: api.params().seed,
            score: api.get_score(),
        }
    }
}

/// Applies one player command given in 1-based coordinates and returns the
/// text shown back: the new board or the rejection message.
fn respond(api: &mut MinesweeperApi, action: &str, row: usize, col: usize) -> String {
    if api.is_game_over() {
        return ActionError::GameOver.to_string();
    }
    let Some((r, c)) = to_zero_based(row, col) else {
        return ActionError::OutOfBounds { row, col }.to_string();
    };
    match api.perform_action(action, r, c) {
        Ok(board) => board,
        Err(ActionError::OutOfBounds { .. }) => ActionError::OutOfBounds { row, col }.to_string(),
        Err(e) => e.to_string(),
    }
}

fn play_interactive(api: &mut MinesweeperApi) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{USAGE}")?;
    writeln!(stdout, "{}", api.get_board())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        let (action, row, col) = match words.as_slice() {
            [] => continue,
            ["quit" | "q"] => break,
            [action, row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => (*action, row, col),
                _ => {
                    writeln!(stdout, "{USAGE}")?;
                    continue;
                }
            },
            _ => {
                writeln!(stdout, "{USAGE}")?;
                continue;
            }
        };
        let action = if action == "unflag" { "flag" } else { action };

        let response = respond(api, action, row, col);
        writeln!(stdout, "{response}")?;

        if api.is_game_over() {
            break;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = Config::from_env();
    info!(
        "Starting minesweeper: {}x{} with {} mines, agent {:?}",
        config.params.rows, config.params.cols, config.params.mines, config.agent
    );

    let mut api = MinesweeperApi::new(config.params)?;
    match config.agent {
        AgentKind::Human => play_interactive(&mut api)?,
        AgentKind::Random => {
            play_game(&mut api, &mut RandomAgent::new(config.agent_seed));
            println!("{}", api.get_board());
        }
    }

    if !api.is_game_over() {
        warn!("Game abandoned before it ended");
    }
    println!("{}", serde_json::to_string(&Summary::new(&api))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use minesweeper_engine::GameParams;

    use super::*;

    fn single_tile() -> MinesweeperApi {
        MinesweeperApi::new(GameParams {
            rows: 1,
            cols: 1,
            mines: 0,
            seed: Some(1),
        })
        .unwrap()
    }

    #[test]
    fn finished_game_is_reported_before_coordinates() {
        let mut api = single_tile();
        assert_eq!(respond(&mut api, "reveal", 1, 1), "0");
        assert!(api.is_game_over());

        assert_eq!(respond(&mut api, "reveal", 0, 1), "Game is already over.");
        assert_eq!(respond(&mut api, "flag", 9, 9), "Game is already over.");
    }

    #[test]
    fn coordinates_are_echoed_one_based() {
        let mut api = MinesweeperApi::new(GameParams::default()).unwrap();
        assert_eq!(respond(&mut api, "reveal", 0, 1), "Invalid coordinates: (0, 1)");
        assert_eq!(respond(&mut api, "flag", 6, 1), "Invalid coordinates: (6, 1)");
        assert_eq!(respond(&mut api, "dig", 1, 1), "Invalid action.");

        let board = respond(&mut api, "flag", 5, 5);
        assert_eq!(board, api.get_board());
        assert!(board.ends_with('F'));
    }

    #[test]
    fn summary_carries_state_and_seed() {
        let mut api = single_tile();
        let json = serde_json::to_value(Summary::new(&api)).unwrap();
        assert_eq!(json["state"], "uninitialized");
        assert_eq!(json["seed"], 1);
        assert_eq!(json["won"], false);

        respond(&mut api, "reveal", 1, 1);
        let json = serde_json::to_value(Summary::new(&api)).unwrap();
        assert_eq!(json["state"], "won");
        assert_eq!(json["won"], true);
        assert_eq!(json["revealed"], 1);
        assert_eq!(json["steps"], 1);
    }
}
