//! The listener: binds a TCP port and hands every accepted connection to its own task.
//!
//! There is no limit on concurrent connections and no read timeout. A slow client holds its
//! task until it sends its request or closes the connection.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;
use crate::protocol::ServerError;

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Binds and listens on `addr`.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| ServerError::bind(addr, e))?;
        let local_addr = listener.local_addr().map_err(|e| ServerError::bind(addr, e))?;

        info!(%local_addr, "start listening");
        Ok(Self { listener, local_addr })
    }

    /// Returns the bound address, with the real port when bound to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections forever, spawning one task per connection. Never returns.
    pub async fn run<H>(self, handler: Arc<H>)
    where
        H: Handler + 'static,
    {
        loop {
            let (tcp_stream, remote_addr) = match self.listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            info!(%remote_addr, "accepted connection");
            let handler = Arc::clone(&handler);

            tokio::spawn(
                async move {
                    let (reader, writer) = tcp_stream.into_split();
                    let connection = HttpConnection::new(reader, writer);
                    if connection.process(handler).await.is_ok() {
                        info!("finished process, connection shutdown");
                    }
                }
                .instrument(info_span!("connection", peer = %remote_addr)),
            );
        }
    }
}

/// Binds `port` on all interfaces and serves it forever.
///
/// Only returns if the port can't be bound: in use, not permitted, or otherwise invalid.
pub async fn start<H>(port: u16, handler: Arc<H>) -> Result<(), ServerError>
where
    H: Handler + 'static,
{
    let server = Server::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await?;
    server.run(handler).await;
    Ok(())
}
