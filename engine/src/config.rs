use std::{env, str::FromStr};

use tracing::{debug, warn};

use minesweeper_common::models::{Difficulty, GameParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Human,
    Random,
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown agent: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub params: GameParams,
    pub agent: AgentKind,
    pub agent_seed: u64,
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
    }
}

fn parse_seed(lookup: &impl Fn(&str) -> Option<String>, default: Option<u64>) -> Option<u64> {
    match lookup("MINESWEEPER_SEED") {
        None => default,
        Some(raw) if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("random") => None,
        Some(raw) => match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("Ignoring invalid MINESWEEPER_SEED={:?}", raw);
                default
            }
        },
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Unset or invalid
    /// values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let difficulty = parse_or(&lookup, "MINESWEEPER_DIFFICULTY", Difficulty::Easy);
        let preset = difficulty.params();

        let mut params = GameParams {
            rows: parse_or(&lookup, "MINESWEEPER_ROWS", preset.rows),
            cols: parse_or(&lookup, "MINESWEEPER_COLS", preset.cols),
            mines: parse_or(&lookup, "MINESWEEPER_MINES", preset.mines),
            seed: parse_seed(&lookup, preset.seed),
        };
        if let Some(density) = lookup("MINESWEEPER_MINE_DENSITY")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
        {
            params = params.with_density(density);
        }

        let config = Self {
            params,
            agent: parse_or(&lookup, "MINESWEEPER_AGENT", AgentKind::Human),
            agent_seed: parse_or(&lookup, "MINESWEEPER_AGENT_SEED", 0),
        };
        debug!("Loaded configuration: {:?}", config);
        config
    }
}
