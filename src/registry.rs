//! Match registry: owns every live match, routes actions to them and delivers
//! the resulting notifications.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::common::{ActionError, PlayerId, RoomId};
use crate::game::{Match, Notification, Phase};
use crate::protocol::{ClientMessage, ServerMessage};

/// Delivery of outbound messages to a specific player.
#[async_trait::async_trait]
pub trait Outbound: Send + Sync {
    async fn deliver(&self, to: PlayerId, message: ServerMessage);
}

/// How a player left a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// `leave_room`; the leaver is sent back to the menu.
    Leave,
    /// Connection dropped; nobody to tell.
    Disconnect,
}

#[derive(Default)]
struct Rooms {
    matches: HashMap<RoomId, Arc<Mutex<Match>>>,
    members: HashMap<PlayerId, RoomId>,
}

/// Lock order is always registry, then match. Actions that do not change
/// membership only hold the match lock, so each match is serialized on its own.
pub struct MatchRegistry<O: Outbound> {
    outbound: O,
    rooms: Mutex<Rooms>,
}

impl<O: Outbound> MatchRegistry<O> {
    pub fn new(outbound: O) -> Self {
        Self {
            outbound,
            rooms: Mutex::new(Rooms::default()),
        }
    }

    pub fn outbound(&self) -> &O {
        &self.outbound
    }

    /// Apply one inbound action from `player`. Invalid actions are logged and dropped.
    pub async fn handle(&self, player: PlayerId, msg: ClientMessage) {
        let result = match msg {
            ClientMessage::JoinRoom { room } => self.join(player, &room).await,
            ClientMessage::PlaceShip { x, y } => {
                self.with_match(player, |m| m.place_ship(player, x, y)).await
            }
            ClientMessage::Ready => self.with_match(player, |m| m.ready(player)).await,
            ClientMessage::Shoot { x, y } => {
                self.with_match(player, |m| m.shoot(player, x, y)).await
            }
            ClientMessage::LeaveRoom => self.depart(player, Departure::Leave).await,
        };
        if let Err(e) = result {
            log::debug!("Dropped action from {}: {}", player, e);
        }
    }

    /// Treat a closed connection as leaving its room.
    pub async fn disconnect(&self, player: PlayerId) {
        if let Err(e) = self.depart(player, Departure::Disconnect).await {
            log::trace!("{} disconnected outside a room: {}", player, e);
        }
    }

    async fn join(&self, player: PlayerId, room: &str) -> Result<(), ActionError> {
        let room: RoomId = room.parse()?;
        let mut rooms = self.rooms.lock().await;

        if rooms.members.contains_key(&player) {
            self.outbound.deliver(player, ServerMessage::AlreadyInRoom).await;
            return Err(ActionError::AlreadyInRoom);
        }

        let handle = match rooms.matches.get(&room) {
            Some(existing) => existing.clone(),
            None => {
                log::info!("Match {} created", room);
                let created = Arc::new(Mutex::new(Match::new(room.clone())));
                rooms.matches.insert(room.clone(), created.clone());
                created
            }
        };
        let mut game = handle.lock().await;
        match game.join(player) {
            Ok(notes) => {
                rooms.members.insert(player, room);
                self.dispatch(notes).await;
                Ok(())
            }
            Err(ActionError::RoomFull) => {
                self.outbound.deliver(player, ServerMessage::RoomFull).await;
                Err(ActionError::RoomFull)
            }
            Err(e) => Err(e),
        }
    }

    async fn depart(&self, player: PlayerId, how: Departure) -> Result<(), ActionError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.members.remove(&player).ok_or(ActionError::NotInRoom)?;
        let handle = rooms
            .matches
            .get(&room)
            .cloned()
            .ok_or(ActionError::NotInRoom)?;

        let mut game = handle.lock().await;
        let notes = game.leave(player)?;
        if game.is_empty() {
            rooms.matches.remove(&room);
            log::info!("Match {} destroyed", room);
        }
        self.dispatch(notes).await;
        if how == Departure::Leave {
            self.outbound
                .deliver(player, ServerMessage::GameState(Phase::Menu))
                .await;
        }
        Ok(())
    }

    /// Run `op` against the player's match while holding only that match's lock.
    async fn with_match<F>(&self, player: PlayerId, op: F) -> Result<(), ActionError>
    where
        F: FnOnce(&mut Match) -> Result<Vec<Notification>, ActionError>,
    {
        let handle = self.lookup(player).await.ok_or(ActionError::NotInRoom)?;
        let mut game = handle.lock().await;
        let notes = op(&mut game)?;
        self.dispatch(notes).await;
        Ok(())
    }

    async fn lookup(&self, player: PlayerId) -> Option<Arc<Mutex<Match>>> {
        let rooms = self.rooms.lock().await;
        let room = rooms.members.get(&player)?;
        rooms.matches.get(room).cloned()
    }

    async fn dispatch(&self, notes: Vec<Notification>) {
        for n in notes {
            self.outbound.deliver(n.to, n.message).await;
        }
    }

    /// Snapshot of the match a player belongs to.
    pub async fn match_of(&self, player: PlayerId) -> Option<Match> {
        let handle = self.lookup(player).await?;
        let game = handle.lock().await;
        Some(game.clone())
    }

    /// Number of live matches.
    pub async fn match_count(&self) -> usize {
        self.rooms.lock().await.matches.len()
    }
}
