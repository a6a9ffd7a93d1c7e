//! Line-oriented terminal client.

use std::io::BufRead;

use rand::Rng;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use crate::game::Phase;
use crate::protocol::{BoardInfo, ClientMessage, ServerMessage};
use crate::ship::random_fleet;
use crate::transport::{read_frame, write_frame};
use crate::ui::render_boards;

pub const HELP: &str = "\
Commands:
  join <room>     join a five-digit room
  place <x> <y>   toggle a ship part on your board
  auto            place a random valid fleet (board must be empty)
  ready           lock in your fleet
  shoot <x> <y>   fire at the enemy board
  leave           leave the room
  help            show this text
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientMessage),
    Auto,
    Help,
    Quit,
}

fn parse_xy<'a, I: Iterator<Item = &'a str>>(args: &mut I) -> Result<(i32, i32), String> {
    let mut next = |axis: &str| -> Result<i32, String> {
        let raw = args.next().ok_or_else(|| format!("Missing {} coordinate", axis))?;
        raw.parse()
            .map_err(|_| format!("Invalid {} coordinate '{}'", axis, raw))
    };
    let x = next("x")?;
    let y = next("y")?;
    Ok((x, y))
}

/// Parse one input line into a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| "Empty input".to_string())?;
    let cmd = match verb.to_ascii_lowercase().as_str() {
        "join" => {
            let room = words.next().ok_or_else(|| "Missing room id".to_string())?;
            Command::Send(ClientMessage::JoinRoom {
                room: room.to_string(),
            })
        }
        "place" => {
            let (x, y) = parse_xy(&mut words)?;
            Command::Send(ClientMessage::PlaceShip { x, y })
        }
        "shoot" => {
            let (x, y) = parse_xy(&mut words)?;
            Command::Send(ClientMessage::Shoot { x, y })
        }
        "ready" => Command::Send(ClientMessage::Ready),
        "leave" => Command::Send(ClientMessage::LeaveRoom),
        "auto" => Command::Auto,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'", other)),
    };
    Ok(cmd)
}

/// What the client last heard from the server.
#[derive(Debug, Default)]
pub struct ClientView {
    boards: Option<BoardInfo>,
}

impl ClientView {
    pub fn apply(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::BoardInfo(info) => self.boards = Some(**info),
            ServerMessage::GameState(Phase::Menu | Phase::WaitingForOpponent) => self.boards = None,
            _ => {}
        }
    }

    /// Placement messages for a random fleet. Requires an empty own board.
    pub fn auto_placements<R: Rng>(&self, rng: &mut R) -> Result<Vec<ClientMessage>, String> {
        let boards = self
            .boards
            .as_ref()
            .ok_or_else(|| "No board yet; wait for an opponent".to_string())?;
        if boards.my_board.ship_tile_count() != 0 {
            return Err("Clear your board before auto placement".to_string());
        }
        let fleet = random_fleet(rng).ok_or_else(|| "Could not generate a fleet".to_string())?;
        Ok(fleet
            .ship_tiles()
            .into_iter()
            .map(|at| ClientMessage::PlaceShip {
                x: at.x() as i32,
                y: at.y() as i32,
            })
            .collect())
    }
}

/// Human-readable text for a server message.
pub fn describe(msg: &ServerMessage) -> String {
    match msg {
        ServerMessage::Welcome { version, player } => {
            format!("Connected as {} (protocol v{})", player, version)
        }
        ServerMessage::RoomJoined { room } => format!("Joined room {}", room),
        ServerMessage::AlreadyInRoom => "You are already in a room".to_string(),
        ServerMessage::RoomFull => "That room is full".to_string(),
        ServerMessage::GameState(phase) => match phase {
            Phase::Menu => "Back at the menu".to_string(),
            Phase::WaitingForOpponent => "Waiting for an opponent...".to_string(),
            Phase::PreGame => "Place your fleet: one 5, one 4, two 3s and one 2".to_string(),
            Phase::Playing => "Battle stations!".to_string(),
            Phase::End => "Game over".to_string(),
        },
        ServerMessage::BoardInfo(info) => render_boards(info),
        ServerMessage::ShipValidation(true) => "Fleet is valid, you can ready up".to_string(),
        ServerMessage::ShipValidation(false) => "Fleet is not complete".to_string(),
        ServerMessage::ReadySuccess => "Ready! Waiting for the opponent".to_string(),
        ServerMessage::Turn(true) => "Your turn".to_string(),
        ServerMessage::Turn(false) => "Opponent's turn".to_string(),
    }
}

/// Interactive session over `stream`, reading commands from stdin.
pub async fn run_client<S>(stream: S, max_frame_size: u32) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (mut reader, mut writer) = tokio::io::split(stream);

    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let (msg_tx, mut incoming) = mpsc::unbounded_channel::<ServerMessage>();
    tokio::spawn(async move {
        loop {
            match read_frame::<_, ServerMessage>(&mut reader, max_frame_size).await {
                Ok(msg) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::debug!("Reader stopped: {}", e);
                    break;
                }
            }
        }
    });

    println!("{}", HELP);
    let mut view = ClientView::default();
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let outgoing = match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => {
                        println!("{}", HELP);
                        continue;
                    }
                    Ok(Command::Send(msg)) => vec![msg],
                    Ok(Command::Auto) => match view.auto_placements(&mut rand::rng()) {
                        Ok(msgs) => msgs,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    },
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                for msg in outgoing {
                    write_frame(&mut writer, &msg, max_frame_size).await?;
                }
            }
            msg = incoming.recv() => {
                let Some(msg) = msg else {
                    println!("Server closed the connection.");
                    break;
                };
                view.apply(&msg);
                println!("{}", describe(&msg));
            }
        }
    }
    Ok(())
}
