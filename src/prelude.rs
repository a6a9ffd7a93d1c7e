//! Commonly used types and utilities for ease of import.

pub use crate::{
    extract_ships, fire, is_fleet_valid, random_fleet, Cell, CellState, CellType, Coord, Grid,
    Match, Phase, PlayerId, RoomId,
};

pub use crate::{ClientMessage, MatchRegistry, Outbound, Server, ServerMessage};

pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
