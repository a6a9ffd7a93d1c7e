mod common;

use common::{at, grid_with};
use salvo::{Cell, CellState, CellType, Coord, Grid, BOARD_SIZE};

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new();
    let mut visited = 0;
    grid.for_each_cell(|_, cell| {
        assert_eq!(*cell, Cell::EMPTY);
        visited += 1;
    });
    assert_eq!(visited, BOARD_SIZE * BOARD_SIZE);
    assert_eq!(grid.ship_tile_count(), 0);
}

#[test]
fn test_get_set() {
    let mut grid = Grid::new();
    let cell = Cell {
        kind: CellType::ShipPart,
        state: CellState::Shot,
    };
    grid.set(at(3, 7), cell);
    assert_eq!(grid.get(at(3, 7)), cell);
    assert_eq!(grid.get(at(7, 3)), Cell::EMPTY);
    // column-major storage
    assert_eq!(grid.cells()[3][7], cell);
}

#[test]
fn test_coord_bounds() {
    assert!(Coord::new(0, 0).is_some());
    assert!(Coord::new(9, 9).is_some());
    assert!(Coord::new(-1, 0).is_none());
    assert!(Coord::new(0, 10).is_none());
    assert!(Coord::new(10, 3).is_none());
    assert_eq!(Coord::all().count(), 100);
}

#[test]
fn test_corner_has_one_diagonal() {
    assert_eq!(at(0, 0).diagonals().collect::<Vec<_>>(), vec![at(1, 1)]);
    assert_eq!(at(9, 0).diagonals().count(), 1);
    assert_eq!(at(5, 5).diagonals().count(), 4);
    assert_eq!(at(0, 5).orthogonals().count(), 3);
}

#[test]
fn test_empty_grid_never_diagonally_adjacent() {
    let grid = Grid::new();
    assert!(Coord::all().all(|c| !grid.is_diagonally_adjacent_to_ship(c)));
}

#[test]
fn test_diagonal_adjacency() {
    let grid = grid_with(&[at(4, 4)]);
    for c in [at(3, 3), at(5, 3), at(3, 5), at(5, 5)] {
        assert!(grid.is_diagonally_adjacent_to_ship(c), "{} should touch", c);
    }
    // orthogonal neighbours and the cell itself do not count
    for c in [at(4, 3), at(3, 4), at(4, 4), at(6, 6)] {
        assert!(!grid.is_diagonally_adjacent_to_ship(c), "{} should not touch", c);
    }
}

#[test]
fn test_diagonal_adjacency_at_edges() {
    let grid = grid_with(&[at(1, 1)]);
    assert!(grid.is_diagonally_adjacent_to_ship(at(0, 0)));
    assert!(grid.is_diagonally_adjacent_to_ship(at(0, 2)));
    assert!(!grid.is_diagonally_adjacent_to_ship(at(0, 1)));
}

#[test]
fn test_toggle_ship_is_involution() {
    let mut grid = Grid::new();
    assert_eq!(grid.toggle_ship(at(2, 2)), CellType::ShipPart);
    assert_eq!(grid.toggle_ship(at(2, 2)), CellType::Empty);
    assert_eq!(grid, Grid::new());
}

#[test]
fn test_remaining_ship_tiles() {
    let mut grid = grid_with(&[at(0, 0), at(0, 1), at(5, 5)]);
    assert_eq!(grid.remaining_ship_tiles(), 3);
    grid.cell_mut(at(0, 0)).state = CellState::Shot;
    grid.cell_mut(at(5, 5)).state = CellState::Destroyed;
    // shooting water does not change anything
    grid.cell_mut(at(9, 9)).state = CellState::Shot;
    assert_eq!(grid.remaining_ship_tiles(), 1);
    assert_eq!(grid.ship_tile_count(), 3);
}
