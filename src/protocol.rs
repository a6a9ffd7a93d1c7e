//! Messages exchanged between the match server and its clients.

use serde::{Deserialize, Serialize};

use crate::common::PlayerId;
use crate::game::Phase;
use crate::grid::Grid;

/// Current protocol version, sent in the welcome message.
pub const PROTOCOL_VERSION: u8 = 1;

/// Actions a player sends to the match it has joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    JoinRoom { room: String },
    PlaceShip { x: i32, y: i32 },
    Ready,
    Shoot { x: i32, y: i32 },
    LeaveRoom,
}

/// Both boards as seen by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    pub my_board: Grid,
    pub enemy_board: Grid,
}

/// Notifications the server pushes to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// First message on every connection.
    Welcome { version: u8, player: PlayerId },
    RoomJoined { room: String },
    AlreadyInRoom,
    RoomFull,
    GameState(Phase),
    BoardInfo(Box<BoardInfo>),
    ShipValidation(bool),
    ReadySuccess,
    Turn(bool),
}
