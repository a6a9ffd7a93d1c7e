use serde::{Deserialize, Serialize};

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty,
    ShipPart,
}

/// What has happened to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Default,
    Shot,
    Destroyed,
}

/// One board position. `Copy`, so every read out of a grid is a value copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellType,
    pub state: CellState,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: CellType::Empty,
        state: CellState::Default,
    };

    pub const SHIP: Cell = Cell {
        kind: CellType::ShipPart,
        state: CellState::Default,
    };

    pub fn is_ship(&self) -> bool {
        self.kind == CellType::ShipPart
    }

    /// Not yet shot, revealed or destroyed.
    pub fn is_untouched(&self) -> bool {
        self.state == CellState::Default
    }
}
