//! Match state machine: phases, turn order and the per-match player records.
//!
//! Every operation validates the action against the current phase first and
//! returns `Err` without touching state when it does not apply. On success it
//! returns the notifications to deliver, in order.

use serde::{Deserialize, Serialize};

use crate::common::{ActionError, Coord, PlayerId, RoomId};
use crate::config::MAX_PLAYERS_PER_MATCH;
use crate::grid::Grid;
use crate::protocol::{BoardInfo, ServerMessage};
use crate::ship::is_fleet_valid;
use crate::shot::fire;

/// Coarse lifecycle of a match. `Menu` is only ever sent to a client that left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    WaitingForOpponent,
    PreGame,
    Playing,
    End,
}

/// One participant: their fleet and what they have learned about the opponent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    pub own: Grid,
    pub enemy_view: Grid,
    pub ready: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            own: Grid::new(),
            enemy_view: Grid::new(),
            ready: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    fn board_info(&self) -> ServerMessage {
        ServerMessage::BoardInfo(Box::new(BoardInfo {
            my_board: self.own,
            enemy_board: self.enemy_view,
        }))
    }
}

/// A message addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: PlayerId,
    pub message: ServerMessage,
}

impl Notification {
    pub fn new(to: PlayerId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

#[derive(Default)]
struct Outbox(Vec<Notification>);

impl Outbox {
    fn to(&mut self, to: PlayerId, message: ServerMessage) {
        self.0.push(Notification::new(to, message));
    }

    fn all(&mut self, players: &[Player], message: ServerMessage) {
        for p in players {
            self.to(p.id, message.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    room: RoomId,
    players: Vec<Player>,
    current_turn: usize,
    phase: Phase,
}

impl Match {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            players: Vec::with_capacity(MAX_PLAYERS_PER_MATCH),
            current_turn: 0,
            phase: Phase::WaitingForOpponent,
        }
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Index into [`Match::players`] of the player allowed to shoot.
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS_PER_MATCH
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn index_of(&self, id: PlayerId) -> Result<usize, ActionError> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(ActionError::UnknownPlayer)
    }

    /// Add a player. The second join moves the match into placement.
    pub fn join(&mut self, id: PlayerId) -> Result<Vec<Notification>, ActionError> {
        if self.players.iter().any(|p| p.id == id) {
            return Err(ActionError::AlreadyInRoom);
        }
        if self.is_full() {
            return Err(ActionError::RoomFull);
        }
        self.players.push(Player::new(id));

        let mut out = Outbox::default();
        out.to(id, ServerMessage::RoomJoined {
            room: self.room.to_string(),
        });
        out.to(id, ServerMessage::GameState(Phase::WaitingForOpponent));

        if self.is_full() {
            self.phase = Phase::PreGame;
            log::info!("Match {} entering placement", self.room);
            for p in &self.players {
                out.to(p.id, ServerMessage::GameState(self.phase));
                out.to(p.id, p.board_info());
            }
        } else {
            self.phase = Phase::WaitingForOpponent;
        }
        Ok(out.0)
    }

    /// Toggle a ship part at `(x, y)` on the player's own grid.
    ///
    /// Removal is subject to the same diagonal check as placement, so a cell
    /// diagonally touching another ship part can be neither added nor removed.
    pub fn place_ship(&mut self, id: PlayerId, x: i32, y: i32) -> Result<Vec<Notification>, ActionError> {
        let at = Coord::new(x, y).ok_or(ActionError::OutOfBounds)?;
        if self.phase != Phase::PreGame {
            return Err(ActionError::WrongPhase);
        }
        let idx = self.index_of(id)?;
        let player = &mut self.players[idx];
        if player.ready {
            return Err(ActionError::AlreadyReady);
        }
        if player.own.is_diagonally_adjacent_to_ship(at) {
            return Err(ActionError::DiagonalConflict);
        }
        player.own.toggle_ship(at);

        let mut out = Outbox::default();
        out.to(id, player.board_info());
        out.to(id, ServerMessage::ShipValidation(is_fleet_valid(&player.own)));
        Ok(out.0)
    }

    /// Mark the player ready if their fleet is valid; start play once both are.
    pub fn ready(&mut self, id: PlayerId) -> Result<Vec<Notification>, ActionError> {
        if self.phase != Phase::PreGame {
            return Err(ActionError::WrongPhase);
        }
        let idx = self.index_of(id)?;
        let player = &mut self.players[idx];
        if player.ready {
            return Err(ActionError::AlreadyReady);
        }
        if !is_fleet_valid(&player.own) {
            return Err(ActionError::InvalidFleet);
        }
        player.ready = true;

        let mut out = Outbox::default();
        out.to(id, ServerMessage::ReadySuccess);

        if self.is_full() && self.players.iter().all(|p| p.ready) {
            self.phase = Phase::Playing;
            log::info!("Match {} started", self.room);
            out.all(&self.players, ServerMessage::GameState(self.phase));
            for (i, p) in self.players.iter().enumerate() {
                out.to(p.id, ServerMessage::Turn(i == self.current_turn));
            }
        }
        Ok(out.0)
    }

    /// Fire at the opponent. A miss passes the turn, a hit keeps it.
    pub fn shoot(&mut self, id: PlayerId, x: i32, y: i32) -> Result<Vec<Notification>, ActionError> {
        if self.phase != Phase::Playing {
            return Err(ActionError::WrongPhase);
        }
        let at = Coord::new(x, y).ok_or(ActionError::OutOfBounds)?;
        let idx = self.index_of(id)?;
        if idx != self.current_turn {
            return Err(ActionError::NotYourTurn);
        }

        let (shooter, defender) = self.pair_mut(idx);
        let outcome = fire(&mut defender.own, &mut shooter.enemy_view, at)?;

        let mut out = Outbox::default();
        let (shooter, defender) = (&self.players[idx], &self.players[1 - idx]);
        out.to(shooter.id, shooter.board_info());
        out.to(defender.id, defender.board_info());

        if outcome.fleet_destroyed() {
            self.phase = Phase::End;
            log::info!("Player {} has won match {}", idx, self.room);
            out.all(&self.players, ServerMessage::GameState(self.phase));
        } else if !outcome.result.is_hit() {
            self.current_turn = 1 - self.current_turn;
            for (i, p) in self.players.iter().enumerate() {
                out.to(p.id, ServerMessage::Turn(i == self.current_turn));
            }
        }
        Ok(out.0)
    }

    /// Remove a player. A remaining peer is reset and waits for a new opponent.
    pub fn leave(&mut self, id: PlayerId) -> Result<Vec<Notification>, ActionError> {
        let idx = self.index_of(id)?;
        self.players.remove(idx);

        let mut out = Outbox::default();
        if let Some(peer) = self.players.first_mut() {
            *peer = Player::new(peer.id);
            self.phase = Phase::WaitingForOpponent;
            self.current_turn = 0;
            log::info!("Match {} lost a player, waiting again", self.room);
            out.to(peer.id, ServerMessage::GameState(self.phase));
        }
        Ok(out.0)
    }

    /// Shooter and defender, both mutable. Only called with two players present.
    fn pair_mut(&mut self, shooter: usize) -> (&mut Player, &mut Player) {
        let (first, second) = self.players.split_at_mut(1);
        if shooter == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }
}
