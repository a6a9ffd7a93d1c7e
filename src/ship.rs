//! Ship topology: grouping occupied cells into straight ships, and fleet validation.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;

use crate::cell::{CellState, CellType};
use crate::common::Coord;
use crate::config::{BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS};
use crate::grid::Grid;

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// One segment of a ship together with its state at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipCell {
    pub at: Coord,
    pub state: CellState,
}

/// A maximal straight run of ship parts. Derived from a grid, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<ShipCell>,
}

impl Ship {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Segments sorted by coordinate.
    pub fn cells(&self) -> &[ShipCell] {
        &self.cells
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(|c| c.at)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.iter().any(|c| c.at == at)
    }

    /// Every segment has been hit and the ship is not yet marked destroyed.
    pub fn is_all_shot(&self) -> bool {
        self.cells.iter().all(|c| c.state == CellState::Shot)
    }
}

/// Ships of a grid plus a coordinate index for O(1) membership lookups.
#[derive(Debug, Clone, Default)]
pub struct ShipLayout {
    ships: Vec<Ship>,
    owner: HashMap<Coord, usize>,
}

impl ShipLayout {
    /// Group the grid's ship parts into ships.
    ///
    /// Seeds are taken in coordinate order. From each unclaimed seed the walk
    /// goes outward along each axis and stops at the first gap, board edge, or
    /// cell already claimed by an earlier ship. Diagonals are never followed.
    pub fn from_grid(grid: &Grid) -> Self {
        let occupied: BTreeSet<Coord> = grid.ship_tiles().into_iter().collect();
        let mut layout = ShipLayout::default();

        for &seed in &occupied {
            if layout.owner.contains_key(&seed) {
                continue;
            }
            let mut members = vec![seed];
            for (dx, dy) in DIRECTIONS {
                let mut cursor = seed;
                while let Some(next) = cursor.offset(dx, dy) {
                    if !occupied.contains(&next) || layout.owner.contains_key(&next) {
                        break;
                    }
                    members.push(next);
                    cursor = next;
                }
            }
            members.sort();

            let index = layout.ships.len();
            for &at in &members {
                layout.owner.insert(at, index);
            }
            layout.ships.push(Ship {
                cells: members
                    .into_iter()
                    .map(|at| ShipCell {
                        at,
                        state: grid.get(at).state,
                    })
                    .collect(),
            });
        }
        layout
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn into_ships(self) -> Vec<Ship> {
        self.ships
    }

    /// The ship a coordinate belongs to, if any.
    pub fn ship_at(&self, at: Coord) -> Option<&Ship> {
        self.owner.get(&at).map(|&i| &self.ships[i])
    }

    /// Ship lengths in ascending order.
    pub fn lengths(&self) -> Vec<usize> {
        let mut lens: Vec<usize> = self.ships.iter().map(Ship::len).collect();
        lens.sort_unstable();
        lens
    }
}

/// Extract every ship on the grid.
pub fn extract_ships(grid: &Grid) -> Vec<Ship> {
    ShipLayout::from_grid(grid).into_ships()
}

/// True iff the grid's ship parts form exactly the required fleet.
///
/// This is a multiset comparison of ship lengths, so 17 cells in the wrong
/// shapes (one long ship, an L-bend) are rejected.
pub fn is_fleet_valid(grid: &Grid) -> bool {
    if grid.ship_tile_count() != TOTAL_SHIP_CELLS {
        return false;
    }
    let mut required = FLEET;
    required.sort_unstable();
    ShipLayout::from_grid(grid).lengths() == required
}

/// Generate a random layout of the required fleet.
///
/// No ship touches another, orthogonally or diagonally, so the result always
/// passes [`is_fleet_valid`]. Returns `None` if no layout was found in time,
/// which does not happen on a 10×10 board in practice.
pub fn random_fleet<R: Rng>(rng: &mut R) -> Option<Grid> {
    'layout: for _ in 0..1000 {
        let mut grid = Grid::new();
        for &len in FLEET.iter() {
            if !place_random_ship(rng, &mut grid, len) {
                continue 'layout;
            }
        }
        return Some(grid);
    }
    None
}

fn place_random_ship<R: Rng>(rng: &mut R, grid: &mut Grid, len: usize) -> bool {
    for _ in 0..100 {
        let horizontal: bool = rng.random();
        let (max_x, max_y) = if horizontal {
            (BOARD_SIZE - len, BOARD_SIZE - 1)
        } else {
            (BOARD_SIZE - 1, BOARD_SIZE - len)
        };
        let x = rng.random_range(0..=max_x);
        let y = rng.random_range(0..=max_y);
        let cells: Vec<Coord> = (0..len)
            .filter_map(|i| {
                if horizontal {
                    Coord::from_indices(x + i, y)
                } else {
                    Coord::from_indices(x, y + i)
                }
            })
            .collect();

        let clear = cells.iter().all(|&at| {
            !grid.get(at).is_ship()
                && !grid.is_diagonally_adjacent_to_ship(at)
                && at.orthogonals().all(|n| !grid.get(n).is_ship())
        });
        if clear {
            for at in cells {
                grid.cell_mut(at).kind = CellType::ShipPart;
            }
            return true;
        }
    }
    false
}
