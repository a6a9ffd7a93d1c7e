//! Common types: board coordinates, room and player identities, action errors.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{BOARD_SIZE, ROOM_ID_LEN};

/// A position on the board, guaranteed to be within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    x: usize,
    y: usize,
}

impl Coord {
    /// Validate raw wire coordinates. Returns `None` when either axis is out of bounds.
    pub fn new(x: i32, y: i32) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Self::from_indices(x, y)
    }

    pub fn from_indices(x: usize, y: usize) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn x(self) -> usize {
        self.x
    }

    pub fn y(self) -> usize {
        self.y
    }

    /// Neighbour at the given offset, if it stays on the board.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Self::from_indices(x, y)
    }

    /// In-bounds diagonal neighbours (up to four).
    pub fn diagonals(self) -> impl Iterator<Item = Coord> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds orthogonal neighbours (up to four).
    pub fn orthogonals(self) -> impl Iterator<Item = Coord> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Every coordinate on the board, column by column.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Coord { x, y }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Five-digit numeric room name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomId {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ROOM_ID_LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(RoomId(s.to_string()))
        } else {
            Err(ActionError::MalformedRoomId)
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identity of a connected player, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Reasons an inbound action was not applied.
///
/// These never reach the wire as errors: the registry logs them and drops the
/// action, except for the join-flow variants which have their own signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Room name is not exactly five ASCII digits.
    MalformedRoomId,
    /// Coordinates fall outside the board.
    OutOfBounds,
    /// Connection has not joined any room.
    NotInRoom,
    /// Connection is already a member of a room.
    AlreadyInRoom,
    /// Room already holds two players.
    RoomFull,
    /// Action is not legal in the current phase.
    WrongPhase,
    /// Shooter is not the player whose turn it is.
    NotYourTurn,
    /// Player already signalled readiness.
    AlreadyReady,
    /// A diagonal neighbour of the cell is occupied.
    DiagonalConflict,
    /// Placed cells do not form the required fleet.
    InvalidFleet,
    /// The shooter already fired at this cell.
    AlreadyShot,
    /// Player is not a member of this match.
    UnknownPlayer,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MalformedRoomId => write!(f, "Room id must be five digits"),
            ActionError::OutOfBounds => write!(f, "Coordinates are out of bounds"),
            ActionError::NotInRoom => write!(f, "Connection is not in a room"),
            ActionError::AlreadyInRoom => write!(f, "Connection is already in a room"),
            ActionError::RoomFull => write!(f, "Room is full"),
            ActionError::WrongPhase => write!(f, "Action not allowed in the current phase"),
            ActionError::NotYourTurn => write!(f, "Not this player's turn"),
            ActionError::AlreadyReady => write!(f, "Player is already ready"),
            ActionError::DiagonalConflict => write!(f, "Cell touches a ship diagonally"),
            ActionError::InvalidFleet => write!(f, "Fleet does not match the required ships"),
            ActionError::AlreadyShot => write!(f, "Cell was already shot"),
            ActionError::UnknownPlayer => write!(f, "Player is not part of this match"),
        }
    }
}

impl std::error::Error for ActionError {}
