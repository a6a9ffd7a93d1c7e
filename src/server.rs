//! Network front end: accepts connections, assigns player identities and
//! bridges frames to the [`MatchRegistry`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify, RwLock};

use crate::common::PlayerId;
use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_VERSION};
use crate::registry::{MatchRegistry, Outbound};
use crate::transport::{read_frame, write_frame};

struct Session {
    tx: mpsc::Sender<ServerMessage>,
    overflow: Arc<Notify>,
}

/// Outgoing queues of every live connection, keyed by player.
///
/// Queues are bounded. A connection whose queue fills up is signalled through
/// its overflow handle and dropped by its serving task.
pub struct Sessions {
    capacity: usize,
    sessions: RwLock<HashMap<PlayerId, Session>>,
}

impl Sessions {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn open(&self, player: PlayerId) -> (mpsc::Receiver<ServerMessage>, Arc<Notify>) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let overflow = Arc::new(Notify::new());
        self.sessions.write().await.insert(
            player,
            Session {
                tx,
                overflow: Arc::clone(&overflow),
            },
        );
        (rx, overflow)
    }

    async fn close(&self, player: PlayerId) {
        self.sessions.write().await.remove(&player);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl Outbound for Sessions {
    async fn deliver(&self, to: PlayerId, message: ServerMessage) {
        let sessions = self.sessions.read().await;
        let Some(session) = sessions.get(&to) else {
            log::debug!("No session for {}", to);
            return;
        };
        match session.tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!("Outgoing queue for {} is full, dropping connection", to);
                session.overflow.notify_one();
            }
            Err(TrySendError::Closed(_)) => log::debug!("Outgoing queue for {} is closed", to),
        }
    }
}

pub struct Server {
    config: ServerConfig,
    registry: MatchRegistry<Sessions>,
    next_player: AtomicU64,
}

impl Server {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let sessions = Sessions::new(config.outbound_queue);
        Arc::new(Self {
            config,
            registry: MatchRegistry::new(sessions),
            next_player: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &MatchRegistry<Sessions> {
        &self.registry
    }

    /// Bind to the configured address and serve until the listener fails.
    pub async fn bind_and_run(self: Arc<Self>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.config.bind).await?;
        log::info!("Listening on {}", listener.local_addr()?);
        self.run(listener).await
    }

    /// Accept connections from `listener`, one task per connection.
    pub async fn run(self: Arc<Self>, listener: TcpListener) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = listener.accept().await?;
            if let Err(e) = stream.set_nodelay(true) {
                log::warn!("Could not set TCP_NODELAY for {}: {}", addr, e);
            }
            let server = Arc::clone(&self);
            tokio::spawn(async move {
                log::info!("Connection from {}", addr);
                if let Err(e) = server.serve(stream).await {
                    log::warn!("Connection from {} ended: {}", addr, e);
                }
            });
        }
    }

    /// Drive one connection until it closes. The player leaves its room afterwards.
    pub async fn serve<S>(self: Arc<Self>, stream: S) -> anyhow::Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let player = PlayerId(self.next_player.fetch_add(1, Ordering::Relaxed));
        let (mut reader, mut writer) = tokio::io::split(stream);
        let (mut outgoing, overflow) = self.registry.outbound().open(player).await;
        let max_frame = self.config.max_frame_size;

        let writer_task = tokio::spawn(async move {
            let welcome = ServerMessage::Welcome {
                version: PROTOCOL_VERSION,
                player,
            };
            write_frame(&mut writer, &welcome, max_frame).await?;
            while let Some(msg) = outgoing.recv().await {
                write_frame(&mut writer, &msg, max_frame).await?;
            }
            anyhow::Ok(())
        });

        let (result, overflowed) = loop {
            tokio::select! {
                frame = read_frame::<_, ClientMessage>(&mut reader, max_frame) => match frame {
                    Ok(msg) => {
                        log::trace!("{} -> {:?}", player, msg);
                        self.registry.handle(player, msg).await;
                    }
                    Err(e) => break (e, false),
                },
                _ = overflow.notified() => {
                    break (anyhow::anyhow!("Outgoing queue overflowed"), true);
                }
            }
        };
        log::info!("{} disconnected: {}", player, result);

        self.registry.disconnect(player).await;
        self.registry.outbound().close(player).await;
        if overflowed {
            // The peer is not reading; the writer may be stuck on a full socket.
            writer_task.abort();
            return Err(result);
        }
        match writer_task.await {
            Ok(Err(e)) => Err(e),
            Ok(Ok(())) => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Writer task failed: {}", e)),
        }
    }
}
