//! The 10×10 board and the diagonal-adjacency placement rule.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellType};
use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Fixed-size board, stored column-major (`cells[x][y]`) to match the wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a board where every cell is `Empty/Default`.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.x()][at.y()]
    }

    pub fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.x()][at.y()] = cell;
    }

    pub fn cell_mut(&mut self, at: Coord) -> &mut Cell {
        &mut self.cells[at.x()][at.y()]
    }

    /// Visit every cell column by column.
    pub fn for_each_cell<F: FnMut(Coord, &Cell)>(&self, mut f: F) {
        for at in Coord::all() {
            f(at, &self.cells[at.x()][at.y()]);
        }
    }

    /// Iterate over `(coordinate, cell)` pairs column by column.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::all().map(move |at| (at, self.get(at)))
    }

    /// Raw column-major cell matrix.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Coordinates of every `ShipPart` cell, in column-major order.
    pub fn ship_tiles(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_ship())
            .map(|(at, _)| at)
            .collect()
    }

    /// Number of `ShipPart` cells regardless of state.
    pub fn ship_tile_count(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_ship()).count()
    }

    /// Ship cells nobody has fired at yet. Zero means the fleet is gone.
    pub fn remaining_ship_tiles(&self) -> usize {
        self.iter()
            .filter(|(_, cell)| cell.is_ship() && cell.is_untouched())
            .count()
    }

    /// True iff any in-bounds diagonal neighbour of `at` is a ship part.
    ///
    /// The check does not care which ship the neighbour belongs to, so it also
    /// forbids bending a single ship around a corner.
    pub fn is_diagonally_adjacent_to_ship(&self, at: Coord) -> bool {
        at.diagonals().any(|d| self.get(d).is_ship())
    }

    /// Flip a cell between `Empty` and `ShipPart`, returning the new type.
    pub fn toggle_ship(&mut self, at: Coord) -> CellType {
        let cell = self.cell_mut(at);
        cell.kind = match cell.kind {
            CellType::Empty => CellType::ShipPart,
            CellType::ShipPart => CellType::Empty,
        };
        cell.kind
    }

    /// Build a grid with ship parts at the given coordinates.
    pub fn with_ships<I: IntoIterator<Item = Coord>>(tiles: I) -> Self {
        let mut grid = Self::new();
        for at in tiles {
            grid.set(at, Cell::SHIP);
        }
        grid
    }
}
