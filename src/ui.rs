//! Text rendering of board snapshots for the terminal client.

use std::fmt::Write;

use crate::cell::{Cell, CellState, CellType};
use crate::common::Coord;
use crate::config::BOARD_SIZE;
use crate::grid::Grid;
use crate::protocol::BoardInfo;

fn glyph(cell: Cell) -> char {
    match (cell.kind, cell.state) {
        (CellType::Empty, CellState::Default) => '.',
        (CellType::ShipPart, CellState::Default) => 'S',
        (CellType::Empty, _) => 'o',
        (CellType::ShipPart, CellState::Shot) => 'X',
        (CellType::ShipPart, CellState::Destroyed) => '#',
    }
}

/// Render one board with x across and y down.
pub fn render_grid(grid: &Grid) -> Vec<String> {
    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);
    let mut header = String::from("   ");
    for x in 0..BOARD_SIZE {
        let _ = write!(header, " {}", x);
    }
    lines.push(header);
    for y in 0..BOARD_SIZE {
        let mut row = format!("{:2} ", y);
        for x in 0..BOARD_SIZE {
            if let Some(at) = Coord::from_indices(x, y) {
                let _ = write!(row, " {}", glyph(grid.get(at)));
            }
        }
        lines.push(row);
    }
    lines
}

/// Both boards side by side, own fleet on the left.
pub fn render_boards(info: &BoardInfo) -> String {
    let mine = render_grid(&info.my_board);
    let theirs = render_grid(&info.enemy_board);
    let width = mine.first().map(String::len).unwrap_or(0);

    let mut out = format!("{:<width$}    {}\n", "Your fleet", "Enemy waters", width = width);
    for (left, right) in mine.iter().zip(theirs.iter()) {
        let _ = writeln!(out, "{:<width$}    {}", left, right, width = width);
    }
    out
}
