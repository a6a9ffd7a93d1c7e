pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Ship lengths every ready player must have placed, largest first.
pub const FLEET: [usize; NUM_SHIPS] = [5, 4, 3, 3, 2];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

pub const ROOM_ID_LEN: usize = 5;
pub const MAX_PLAYERS_PER_MATCH: usize = 2;

/// Maximum frame size (64 KiB). A full board snapshot is well under 1 KiB.
pub const MAX_FRAME_SIZE: u32 = 64 * 1024;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Messages a connection may have queued before the server drops it.
pub const OUTBOUND_QUEUE_LEN: usize = 256;

/// Runtime settings for the match server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub max_frame_size: u32,
    pub outbound_queue: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_frame_size: MAX_FRAME_SIZE,
            outbound_queue: OUTBOUND_QUEUE_LEN,
        }
    }
}
