use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { y: 0, x: 0 };

    /// Four-connected neighbours in north, east, south, west order.
    ///
    /// Every breadth-first and flood-fill pass in the crate expands in this
    /// order, which fixes their tie-breaks.
    pub fn cardinal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// State of a single grid cell.
///
/// `Wall` must stay the first variant: a freshly allocated grid is all
/// `CellState::default()`, and every generator starts from solid rock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CellState {
    #[default]
    Wall,
    Floor,
    Door,
}

impl CellState {
    pub fn is_passable(self) -> bool {
        matches!(self, Self::Floor | Self::Door)
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Door => '+',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Floor),
            '+' => Some(Self::Door),
            _ => None,
        }
    }
}

/// Semantic role of a room. `Normal` is the untagged default.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RoomTag {
    #[default]
    Normal,
    Boss,
    Treasure,
    Safe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_wall_and_normal() {
        assert_eq!(CellState::default(), CellState::Wall);
        assert_eq!(RoomTag::default(), RoomTag::Normal);
    }

    #[test]
    fn glyphs_map_back_to_cell_states() {
        for state in [CellState::Wall, CellState::Floor, CellState::Door] {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(state));
        }
        assert_eq!(CellState::from_glyph('x'), None);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Pos { y: 3, x: 10 };
        let b = Pos { y: 7, x: 2 };
        assert_eq!(manhattan(a, b), 12);
        assert_eq!(manhattan(b, a), 12);
    }
}
