//! Shot resolution: hit/miss/sink detection and the reveal rules.

use crate::cell::CellState;
use crate::common::{ActionError, Coord};
use crate::grid::Grid;
use crate::ship::{Ship, ShipLayout};

/// Result of a shot at a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotResult {
    Miss,
    Hit,
    /// The shot finished a ship; carries the ship as it was before being marked destroyed.
    Sunk(Ship),
}

impl ShotResult {
    /// Hits and sinks keep the turn; misses pass it.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotOutcome {
    pub at: Coord,
    pub result: ShotResult,
    /// Halo cells that became visible because a ship sank.
    pub revealed: Vec<Coord>,
    /// Defender ship cells still `Default` after the shot.
    pub remaining: usize,
}

impl ShotOutcome {
    pub fn fleet_destroyed(&self) -> bool {
        self.remaining == 0
    }
}

/// Fire at `at` on `defender`, recording what the shooter learns in `view`.
///
/// Every cell written to `view` is a value copy of the defender's cell taken
/// after all mutations of this shot.
pub fn fire(defender: &mut Grid, view: &mut Grid, at: Coord) -> Result<ShotOutcome, ActionError> {
    if !view.get(at).is_untouched() {
        return Err(ActionError::AlreadyShot);
    }

    defender.cell_mut(at).state = CellState::Shot;

    let mut result = ShotResult::Miss;
    let mut revealed = Vec::new();

    if defender.get(at).is_ship() {
        result = ShotResult::Hit;
        let layout = ShipLayout::from_grid(defender);
        if let Some(ship) = layout.ship_at(at).filter(|s| s.is_all_shot()) {
            for segment in ship.coords() {
                defender.cell_mut(segment).state = CellState::Destroyed;
                for neighbour in segment.diagonals().chain(segment.orthogonals()) {
                    if defender.get(neighbour).is_untouched() {
                        defender.cell_mut(neighbour).state = CellState::Shot;
                        view.set(neighbour, defender.get(neighbour));
                        revealed.push(neighbour);
                    }
                }
            }
            // Earlier hits on this ship were copied as `Shot`; refresh them.
            for segment in ship.coords() {
                view.set(segment, defender.get(segment));
            }
            result = ShotResult::Sunk(ship.clone());
        }
    }

    view.set(at, defender.get(at));

    Ok(ShotOutcome {
        at,
        result,
        revealed,
        remaining: defender.remaining_ship_tiles(),
    })
}
