#![allow(dead_code)]

use std::sync::Mutex;

use salvo::{Coord, Grid, Match, Notification, Outbound, PlayerId, ServerMessage};

/// Five ships in separate columns: lengths 5, 4, 3, 3, 2.
pub const FLEET_COLUMNS: [(usize, usize, usize); 5] = [
    // (x, first y, length)
    (0, 0, 5),
    (2, 0, 4),
    (4, 0, 3),
    (6, 0, 3),
    (8, 0, 2),
];

pub fn at(x: usize, y: usize) -> Coord {
    Coord::from_indices(x, y).unwrap()
}

pub fn column_fleet() -> Vec<Coord> {
    FLEET_COLUMNS
        .iter()
        .flat_map(|&(x, y0, len)| (y0..y0 + len).map(move |y| at(x, y)))
        .collect()
}

/// Fleet with a vertical 3-ship at (2,2)-(2,4) and the rest well away from it.
pub fn cruiser_fleet() -> Vec<Coord> {
    let mut cells = vec![at(2, 2), at(2, 3), at(2, 4)];
    cells.extend((0..5).map(|y| at(5, y)));
    cells.extend((0..4).map(|y| at(7, y)));
    cells.extend((0..3).map(|y| at(9, y)));
    cells.extend([at(0, 8), at(1, 8)]);
    cells
}

pub const ALICE: PlayerId = PlayerId(1);
pub const BOB: PlayerId = PlayerId(2);

pub fn room(id: &str) -> salvo::RoomId {
    id.parse().unwrap()
}

pub fn place_all(game: &mut Match, player: PlayerId, cells: &[Coord]) {
    for c in cells {
        game.place_ship(player, c.x() as i32, c.y() as i32).unwrap();
    }
}

/// A two-player match in `PreGame`.
pub fn pregame_match() -> Match {
    let mut game = Match::new(room("12345"));
    game.join(ALICE).unwrap();
    game.join(BOB).unwrap();
    game
}

/// A match in `Playing` with Alice on turn; Alice has the column fleet and Bob the cruiser fleet.
pub fn playing_match() -> Match {
    let mut game = pregame_match();
    place_all(&mut game, ALICE, &column_fleet());
    place_all(&mut game, BOB, &cruiser_fleet());
    game.ready(ALICE).unwrap();
    game.ready(BOB).unwrap();
    game
}

pub fn messages_to(notes: &[Notification], player: PlayerId) -> Vec<ServerMessage> {
    notes
        .iter()
        .filter(|n| n.to == player)
        .map(|n| n.message.clone())
        .collect()
}

pub fn grid_with(cells: &[Coord]) -> Grid {
    Grid::with_ships(cells.iter().copied())
}

/// Outbound sink that records every delivery in order.
#[derive(Default)]
pub struct Recorder {
    pub log: Mutex<Vec<(PlayerId, ServerMessage)>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<(PlayerId, ServerMessage)> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    pub fn take_for(&self, player: PlayerId) -> Vec<ServerMessage> {
        self.take()
            .into_iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, m)| m)
            .collect()
    }
}

#[async_trait::async_trait]
impl Outbound for Recorder {
    async fn deliver(&self, to: PlayerId, message: ServerMessage) {
        self.log.lock().unwrap().push((to, message));
    }
}
