//! Property tests over random boards, seeds and action sequences.

use std::collections::BTreeSet;

use minesweeper_engine::{Cell, Game, GameParams, GameState, Pos, data::neighbors};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Move {
    Reveal(Pos),
    Flag(Pos),
}

fn apply(game: &mut Game, mv: Move) {
    match mv {
        Move::Reveal(pos) => game.reveal(pos),
        Move::Flag(pos) => game.flag(pos),
    }
}

/// Board shape, mine count leaving room for a full safe opening, seed and first click.
fn opening() -> impl Strategy<Value = (GameParams, Pos)> {
    (3usize..=10, 3usize..=10)
        .prop_flat_map(|(rows, cols)| {
            (
                Just(rows),
                Just(cols),
                0..=rows * cols - 9,
                any::<u64>(),
                0..rows,
                0..cols,
            )
        })
        .prop_map(|(rows, cols, mines, seed, row, col)| {
            (
                GameParams {
                    rows,
                    cols,
                    mines,
                    seed: Some(seed),
                },
                Pos::new(row, col),
            )
        })
}

/// An opening followed by a sequence of moves that may stray off the board.
fn session() -> impl Strategy<Value = (GameParams, Pos, Vec<Move>)> {
    opening().prop_flat_map(|(params, first)| {
        let mv = (any::<bool>(), 0..params.rows + 1, 0..params.cols + 1).prop_map(
            |(reveal, row, col)| {
                let pos = Pos::new(row, col);
                if reveal {
                    Move::Reveal(pos)
                } else {
                    Move::Flag(pos)
                }
            },
        );
        (Just(params), Just(first), prop::collection::vec(mv, 0..40))
    })
}

fn visible_mines(game: &Game) -> Vec<Pos> {
    (0..game.rows())
        .flat_map(|row| (0..game.cols()).map(move |col| Pos::new(row, col)))
        .filter(|&pos| game.cell(pos) == Some(Cell::Mine))
        .collect()
}

proptest! {
    #[test]
    fn first_click_opening_is_mine_free((params, first) in opening()) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);

        let mines: BTreeSet<Pos> = game.mine_positions().into_iter().collect();
        prop_assert_eq!(mines.len(), params.mines);
        prop_assert!(!mines.contains(&first));
        for n in neighbors(params.rows, params.cols, first) {
            prop_assert!(!mines.contains(&n));
        }
        prop_assert_ne!(game.state(), GameState::Lost);
        prop_assert_eq!(game.adjacent(first), Some(0));
    }

    #[test]
    fn seed_and_click_fix_the_layout((params, first) in opening()) {
        let mut a = Game::new(params).unwrap();
        let mut b = Game::new(params).unwrap();
        a.reveal(first);
        b.reveal(first);

        prop_assert_eq!(a.mine_positions(), b.mine_positions());
        prop_assert_eq!(a.render(), b.render());
        for row in 0..params.rows {
            for col in 0..params.cols {
                let pos = Pos::new(row, col);
                prop_assert_eq!(a.adjacent(pos), b.adjacent(pos));
            }
        }
    }

    #[test]
    fn revealed_count_only_grows((params, first, moves) in session()) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);
        let mut last = game.revealed();

        for mv in moves {
            apply(&mut game, mv);
            prop_assert!(game.revealed() >= last);
            prop_assert!(game.revealed() <= game.total_safe());
            last = game.revealed();
        }
    }

    #[test]
    fn only_a_direct_reveal_shows_a_mine((params, first, moves) in session()) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);
        prop_assert!(visible_mines(&game).is_empty());

        for mv in moves {
            let was_terminal = game.is_terminal();
            apply(&mut game, mv);
            let shown = visible_mines(&game);
            match (was_terminal, game.state(), mv) {
                (false, GameState::Lost, Move::Reveal(pos)) => {
                    prop_assert_eq!(shown, vec![pos]);
                }
                (_, GameState::Lost, _) => {
                    prop_assert_eq!(shown.len(), 1);
                }
                _ => {
                    prop_assert!(shown.is_empty());
                }
            }
        }
    }

    #[test]
    fn terminal_games_ignore_moves((params, first, moves) in session()) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);

        let mut frozen = None;
        for mv in moves {
            if frozen.is_none() && game.is_terminal() {
                frozen = Some((game.render(), game.score()));
            }
            apply(&mut game, mv);
            if let Some((board, score)) = &frozen {
                prop_assert_eq!(&game.render(), board);
                prop_assert_eq!(&game.score(), score);
            }
        }
    }

    #[test]
    fn won_iff_all_safe_tiles_revealed((params, first, moves) in session()) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);
        for mv in moves {
            apply(&mut game, mv);
        }

        let all_open = game.revealed() == game.total_safe();
        prop_assert_eq!(game.score().won, game.state() == GameState::Won);
        if game.state() != GameState::Lost {
            prop_assert_eq!(game.score().won, all_open);
        }
        if game.state() == GameState::Won {
            prop_assert!(game.is_terminal());
        }
    }

    #[test]
    fn double_flag_is_identity(
        (params, first, moves) in session(),
        row in 0usize..10,
        col in 0usize..10
    ) {
        let mut game = Game::new(params).unwrap();
        game.reveal(first);
        for mv in moves {
            apply(&mut game, mv);
        }

        let pos = Pos::new(row % params.rows, col % params.cols);
        let board = game.render();
        let score = game.score();
        game.flag(pos);
        game.flag(pos);
        prop_assert_eq!(game.render(), board);
        prop_assert_eq!(game.score(), score);
    }
}
