use std::sync::Arc;

use tokio::io::DuplexStream;

use super::StreamTransport;
use crate::server::Server;

pub type InMemoryTransport = StreamTransport<DuplexStream>;

/// Buffer size for each direction of the in-memory pipe.
const PIPE_CAPACITY: usize = 64 * 1024;

impl StreamTransport<DuplexStream> {
    /// Open an in-process connection to `server`, served on a spawned task.
    pub fn connect_to(server: &Arc<Server>) -> Self {
        let (client, remote) = tokio::io::duplex(PIPE_CAPACITY);
        let server = Arc::clone(server);
        tokio::spawn(async move {
            if let Err(e) = server.serve(remote).await {
                log::debug!("In-memory session ended: {}", e);
            }
        });
        Self::new(client)
    }
}
