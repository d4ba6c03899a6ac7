//! Banter production server.
//!
//! Production glue around [`banter_core`]: a Tokio TCP accept loop feeding
//! connection tasks, each of which reads JSON request lines, dispatches
//! them through the [`ChatService`] façade, and writes one reply line per
//! request.
//!
//! # Components
//!
//! - [`ChatService`]: the request façade owning all chat state
//! - [`Server`]: accept loop and per-connection line handling
//! - [`TcpTransport`]: plaintext TCP listener
//! - [`SystemEnv`]: production randomness (OS RNG)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod service;
mod system_env;
mod transport;

use std::{net::SocketAddr, sync::Arc};

use banter_proto::{MAX_LINE_BYTES, Response, decode_request, encode_response};
pub use error::ServerError;
pub use service::ChatService;
pub use system_env::SystemEnv;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
};
pub use transport::TcpTransport;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "0.0.0.0:7450")
    pub bind_address: String,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0:7450".to_string() }
    }
}

/// Production banter server.
///
/// Wraps [`ChatService`] with a TCP line transport and the system
/// environment.
pub struct Server {
    service: Arc<ChatService<SystemEnv>>,
    transport: TcpTransport,
}

impl Server {
    /// Create and bind a new server.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let service = Arc::new(ChatService::new(SystemEnv::new()));
        let transport = TcpTransport::bind(&config.bind_address).await?;

        Ok(Self { service, transport })
    }

    /// Run the server, accepting connections and serving requests.
    ///
    /// Runs until the process is shut down or the listener fails.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("server listening on {}", self.transport.local_addr()?);

        loop {
            match self.transport.accept().await {
                Ok((stream, peer)) => {
                    let service = Arc::clone(&self.service);

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, service).await {
                            tracing::debug!(%peer, "connection error: {}", e);
                        }
                    });
                },
                Err(e) => {
                    tracing::error!("accept error: {}", e);
                },
            }
        }
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.transport.local_addr()
    }
}

/// Serve one connection: a loop of request line → reply line.
///
/// Malformed requests get an error reply and the connection stays open;
/// only oversized lines and socket errors end the session.
async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: Arc<ChatService<SystemEnv>>,
) -> Result<(), ServerError> {
    tracing::debug!(%peer, "connection accepted");

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    loop {
        line.clear();

        // Bound the read so a peer cannot force unbounded buffering
        let mut limited = (&mut reader).take(MAX_LINE_BYTES as u64 + 1);
        let read = limited.read_line(&mut line).await?;
        if read == 0 {
            tracing::debug!(%peer, "connection closed");
            break;
        }

        if line.len() > MAX_LINE_BYTES {
            tracing::warn!(%peer, len = line.len(), "request line exceeds limit, closing");
            break;
        }

        let reply = match decode_request(&line) {
            Ok(request) => service.handle(request),
            Err(e) => {
                tracing::warn!(%peer, "malformed request: {}", e);
                Response::Error { reason: e.to_string() }
            },
        };

        let mut out = encode_response(&reply)?;
        out.push('\n');
        write_half.write_all(out.as_bytes()).await?;
    }

    Ok(())
}
