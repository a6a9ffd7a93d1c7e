mod common;

use common::{at, column_fleet, cruiser_fleet, grid_with};
use salvo::{extract_ships, is_fleet_valid, CellState, ShipLayout};

fn sorted_lengths(cells: &[salvo::Coord]) -> Vec<usize> {
    let mut lens: Vec<usize> = extract_ships(&grid_with(cells)).iter().map(|s| s.len()).collect();
    lens.sort_unstable();
    lens
}

#[test]
fn test_extract_straight_ships() {
    let cells = [at(1, 1), at(2, 1), at(3, 1), at(6, 4), at(6, 5)];
    let ships = extract_ships(&grid_with(&cells));
    assert_eq!(ships.len(), 2);
    assert_eq!(
        ships[0].coords().collect::<Vec<_>>(),
        vec![at(1, 1), at(2, 1), at(3, 1)]
    );
    assert_eq!(ships[1].coords().collect::<Vec<_>>(), vec![at(6, 4), at(6, 5)]);
}

#[test]
fn test_extract_walks_both_ways_from_seed() {
    // seed is the lowest coordinate; the walk must still reach the far end
    let cells = [at(0, 9), at(0, 8), at(0, 7)];
    let ships = extract_ships(&grid_with(&cells));
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].len(), 3);
}

#[test]
fn test_extract_ignores_diagonals() {
    let cells = [at(3, 3), at(4, 4)];
    assert_eq!(sorted_lengths(&cells), vec![1, 1]);
}

#[test]
fn test_extract_carries_cell_state() {
    let mut grid = grid_with(&[at(5, 0), at(5, 1)]);
    grid.cell_mut(at(5, 1)).state = CellState::Shot;
    let ships = extract_ships(&grid);
    assert_eq!(ships[0].cells()[0].state, CellState::Default);
    assert_eq!(ships[0].cells()[1].state, CellState::Shot);
    assert!(!ships[0].is_all_shot());
}

#[test]
fn test_l_shape_is_claimed_by_one_seed() {
    // (0,0) seeds a ship that takes the whole row and the whole column
    let cells = [at(0, 0), at(1, 0), at(2, 0), at(0, 1), at(0, 2)];
    let layout = ShipLayout::from_grid(&grid_with(&cells));
    assert_eq!(layout.ships().len(), 1);
    assert_eq!(layout.ships()[0].len(), 5);
}

#[test]
fn test_layout_lookup() {
    let layout = ShipLayout::from_grid(&grid_with(&column_fleet()));
    let ship = layout.ship_at(at(2, 3)).unwrap();
    assert_eq!(ship.len(), 4);
    assert!(ship.contains(at(2, 0)));
    assert!(layout.ship_at(at(1, 1)).is_none());
}

#[test]
fn test_valid_fleets() {
    assert!(is_fleet_valid(&grid_with(&column_fleet())));
    assert!(is_fleet_valid(&grid_with(&cruiser_fleet())));
    assert_eq!(sorted_lengths(&column_fleet()), vec![2, 3, 3, 4, 5]);
}

#[test]
fn test_partial_fleet_invalid() {
    assert!(!is_fleet_valid(&grid_with(&[at(0, 0), at(0, 1)])));
    let mut cells = column_fleet();
    cells.pop();
    assert!(!is_fleet_valid(&grid_with(&cells)));
}

#[test]
fn test_right_count_wrong_shape_invalid() {
    // 17 cells as one 10-long and one 7-long ship
    let mut cells: Vec<_> = (0..10).map(|y| at(0, y)).collect();
    cells.extend((0..7).map(|y| at(5, y)));
    assert_eq!(cells.len(), 17);
    assert!(!is_fleet_valid(&grid_with(&cells)));

    // 17 cells with the lengths 5, 4, 4, 2, 2
    let mut cells: Vec<_> = (0..5).map(|y| at(0, y)).collect();
    cells.extend((0..4).map(|y| at(2, y)));
    cells.extend((0..4).map(|y| at(4, y)));
    cells.extend((0..2).map(|y| at(6, y)));
    cells.extend((0..2).map(|y| at(8, y)));
    assert_eq!(cells.len(), 17);
    assert!(!is_fleet_valid(&grid_with(&cells)));
}

#[test]
fn test_extra_cell_invalid() {
    let mut cells = column_fleet();
    cells.push(at(9, 9));
    assert!(!is_fleet_valid(&grid_with(&cells)));
}
