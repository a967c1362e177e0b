use minesweeper_common::models::{Cell, Pos};

/// Cover state of a tile. A tile is never flagged and revealed at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealedState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub mine: bool,
    /// Mines among the Moore neighbors; meaningless on a mine.
    pub adjacent: u8,
    pub revealed: RevealedState,
}

impl Tile {
    pub fn is_revealed(&self) -> bool {
        self.revealed == RevealedState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.revealed == RevealedState::Flagged
    }

    pub fn is_hidden(&self) -> bool {
        self.revealed == RevealedState::Hidden
    }
}

impl From<&Tile> for Cell {
    fn from(value: &Tile) -> Self {
        match value.revealed {
            RevealedState::Hidden => Self::Hidden,
            RevealedState::Flagged => Self::Flagged,
            RevealedState::Revealed if value.mine => Self::Mine,
            RevealedState::Revealed => Self::Revealed {
                adjacent: value.adjacent,
            },
        }
    }
}

static DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Moore neighborhood of `pos`, clipped to a `rows x cols` board.
pub fn neighbors(rows: usize, cols: usize, pos: Pos) -> impl Iterator<Item = Pos> {
    DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Pos::new(row, col))
    })
}

/// Row-major grid of tiles. The only owner of tile state.
#[derive(Debug, Clone)]
pub struct Field {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<Tile>,
}

impl Field {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![Tile::default(); rows * cols],
        }
    }

    pub fn validate_pos(&self, pos: &Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn pos(&self, index: usize) -> Pos {
        Pos::new(index / self.cols, index % self.cols)
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if !self.validate_pos(&pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    pub fn tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        if !self.validate_pos(&pos) {
            return None;
        }
        let index = self.index(pos);
        self.tiles.get_mut(index)
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<> {
        neighbors(self.rows, self.cols, pos)
    }

    fn count_adjacent_mines(&self, pos: Pos) -> u8 {
        self.neighbors(pos)
            .filter(|&n| self.tile(n).is_some_and(|t| t.mine))
            .count() as u8
    }

    /// Recomputes `adjacent` for every safe tile from the current mine layout.
    pub fn compute_adjacent(&mut self) {
        for index in 0..self.tiles.len() {
            if self.tiles[index].mine {
                continue;
            }
            let adjacent = self.count_adjacent_mines(self.pos(index));
            self.tiles[index].adjacent = adjacent;
        }
    }

    pub fn mine_positions(&self) -> Vec<Pos> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.mine)
            .map(|(index, _)| self.pos(index))
            .collect()
    }

    /// Tiles the player has touched: revealed or flagged.
    pub fn touched(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_hidden()).count()
    }

    pub fn render(&self) -> String {
        self.tiles
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|tile| Cell::from(tile).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut positions: Vec<Pos>) -> Vec<Pos> {
        positions.sort();
        positions
    }

    #[test]
    fn neighbors_are_clipped_at_edges() {
        assert_eq!(
            sorted(neighbors(3, 3, Pos::new(0, 0)).collect()),
            vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
        assert_eq!(neighbors(3, 3, Pos::new(1, 1)).count(), 8);
        assert_eq!(neighbors(3, 4, Pos::new(2, 1)).count(), 5);
        assert_eq!(neighbors(1, 1, Pos::new(0, 0)).count(), 0);
        assert_eq!(neighbors(1, 5, Pos::new(0, 4)).count(), 1);
    }

    #[test]
    fn adjacent_counts_follow_mines() {
        let mut field = Field::new(3, 3);
        for pos in [Pos::new(0, 0), Pos::new(2, 2)] {
            field.tile_mut(pos).unwrap().mine = true;
        }
        field.compute_adjacent();

        let counts: Vec<u8> = field.tiles.iter().map(|t| t.adjacent).collect();
        assert_eq!(counts, [0, 1, 0, 1, 2, 1, 0, 1, 0]);
        assert_eq!(field.mine_positions(), vec![Pos::new(0, 0), Pos::new(2, 2)]);
    }

    #[test]
    fn render_uses_visible_tokens() {
        let mut field = Field::new(2, 3);
        field.tile_mut(Pos::new(0, 0)).unwrap().mine = true;
        field.compute_adjacent();
        assert_eq!(field.render(), "? ? ?\n? ? ?");

        field.tile_mut(Pos::new(0, 0)).unwrap().revealed = RevealedState::Revealed;
        field.tile_mut(Pos::new(0, 1)).unwrap().revealed = RevealedState::Revealed;
        field.tile_mut(Pos::new(1, 2)).unwrap().revealed = RevealedState::Flagged;
        field.tile_mut(Pos::new(1, 1)).unwrap().revealed = RevealedState::Revealed;
        assert_eq!(field.render(), "* 1 ?\n? 1 F");
        assert_eq!(field.touched(), 4);
    }

    #[test]
    fn out_of_range_positions_have_no_tile() {
        let field = Field::new(2, 2);
        assert!(field.tile(Pos::new(2, 0)).is_none());
        assert!(field.tile(Pos::new(0, 2)).is_none());
        assert!(field.tile(Pos::new(1, 1)).is_some());
    }
}
