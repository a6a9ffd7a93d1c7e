//! Length-prefixed bincode framing and the client-side transport.
//!
//! A frame is a 4-byte big-endian length followed by the bincode payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::MAX_FRAME_SIZE;
use crate::protocol::{ClientMessage, ServerMessage};

pub mod in_memory;
pub mod tcp;

/// Client end of a connection to the match server.
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: ClientMessage) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<ServerMessage>;
}

fn io_error(e: std::io::Error, what: &str) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection reset by peer")
        }
        _ => anyhow::anyhow!("{} error: {}", what, e),
    }
}

/// Serialize `msg` and write it as one frame.
pub async fn write_frame<W, T>(writer: &mut W, msg: &T, max_size: u32) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + Send,
    T: Serialize + Sync,
{
    let data = bincode::serialize(msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u64 > max_size as u64 {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            data.len(),
            max_size
        ));
    }
    let len = (data.len() as u32).to_be_bytes();
    writer.write_all(&len).await.map_err(|e| io_error(e, "Write"))?;
    writer.write_all(&data).await.map_err(|e| io_error(e, "Write"))?;
    writer.flush().await.map_err(|e| io_error(e, "Write"))?;
    Ok(())
}

/// Read one frame and deserialize it.
pub async fn read_frame<R, T>(reader: &mut R, max_size: u32) -> anyhow::Result<T>
where
    R: AsyncRead + Unpin + Send,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| io_error(e, "Read"))?;
    let len = u32::from_be_bytes(len_buf);

    if len > max_size {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            len,
            max_size
        ));
    }
    if len == 0 {
        return Err(anyhow::anyhow!("Invalid message length: 0"));
    }

    let mut buf = vec![0u8; len as usize];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(|e| io_error(e, "Read"))?;
    bincode::deserialize(&buf).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
}

/// [`Transport`] over any byte stream.
pub struct StreamTransport<S> {
    stream: S,
    max_frame_size: u32,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    pub fn with_max_frame_size(stream: S, max_frame_size: u32) -> Self {
        Self {
            stream,
            max_frame_size,
        }
    }
}

#[async_trait::async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, msg: ClientMessage) -> anyhow::Result<()> {
        write_frame(&mut self.stream, &msg, self.max_frame_size).await
    }

    async fn recv(&mut self) -> anyhow::Result<ServerMessage> {
        read_frame(&mut self.stream, self.max_frame_size).await
    }
}
