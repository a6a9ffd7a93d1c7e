use tokio::net::{TcpStream, ToSocketAddrs};

use super::StreamTransport;

pub type TcpTransport = StreamTransport<TcpStream>;

/// Open a TCP connection with Nagle's algorithm disabled.
pub async fn connect_stream<A: ToSocketAddrs>(addr: A) -> anyhow::Result<TcpStream> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;
    Ok(stream)
}

impl StreamTransport<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Ok(Self::new(connect_stream(addr).await?))
    }

    /// Like [`StreamTransport::connect`], with a custom frame limit.
    pub async fn connect_with_max_frame_size<A: ToSocketAddrs>(
        addr: A,
        max_frame_size: u32,
    ) -> anyhow::Result<Self> {
        Ok(Self::with_max_frame_size(connect_stream(addr).await?, max_frame_size))
    }
}
