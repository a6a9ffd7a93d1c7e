mod cell;
pub mod client;
mod common;
mod config;
mod game;
mod grid;
mod logging;
pub mod prelude;
pub mod protocol;
pub mod registry;
pub mod server;
mod ship;
mod shot;
pub mod transport;
pub mod ui;

pub use cell::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
pub use logging::{init_logging, parse_level};
pub use protocol::*;
pub use registry::{Departure, MatchRegistry, Outbound};
pub use server::{Server, Sessions};
pub use ship::*;
pub use shot::*;
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
