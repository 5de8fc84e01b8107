//! The transport contract and a plain UDP/TCP implementation.
//!
//! The session's only demand on a transport is "send one message, get one
//! message": server selection, retries, deadlines, and framing all live
//! behind [`Transport::send`]. [`UdpTransport`] is the stock
//! implementation; DoT/DoH belong in alternative implementations of the
//! same trait.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;
use tracing::{debug, trace};
use vireo_proto::Message;

/// Why a query produced no response.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The deadline passed without a response.
    #[error("query timed out")]
    Timeout,

    /// A socket operation failed.
    #[error("network error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent something unusable.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No server produced a response after all attempts.
    #[error("no server answered after {attempts} attempts")]
    Exhausted {
        /// How many sends were tried.
        attempts: u32,
    },
}

/// One request, one response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a query and awaits the matching response.
    async fn send(&self, query: Message) -> Result<Message, TransportError>;
}

/// A UDP transport with TCP retry on truncation.
///
/// Servers are tried round-robin, one attempt each, up to the retry
/// budget. A truncated UDP response is retried over TCP against the same
/// server, with the standard two-octet length framing.
pub struct UdpTransport {
    servers: Vec<SocketAddr>,
    timeout: Duration,
    retries: u32,
    next: AtomicUsize,
}

impl UdpTransport {
    /// A transport over the given servers with a 5 s per-attempt timeout.
    pub fn new(servers: Vec<SocketAddr>) -> Self {
        Self {
            servers,
            timeout: Duration::from_secs(5),
            retries: 3,
            next: AtomicUsize::new(0),
        }
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt budget.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    fn pick_server(&self) -> Option<SocketAddr> {
        if self.servers.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        Some(self.servers[index % self.servers.len()])
    }

    async fn query_udp(
        &self,
        server: SocketAddr,
        query: &Message,
    ) -> Result<Message, TransportError> {
        let socket = UdpSocket::bind(match server {
            SocketAddr::V4(_) => "0.0.0.0:0",
            SocketAddr::V6(_) => "[::]:0",
        })
        .await?;
        socket.connect(server).await?;

        let wire = query.emit().map_err(|e| TransportError::Protocol(e.to_string()))?;
        socket.send(&wire).await?;

        let mut buf = vec![0u8; 65_535];
        let len = timeout(self.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let response =
            Message::parse(&buf[..len]).map_err(|e| TransportError::Protocol(e.to_string()))?;
        if response.id() != query.id() {
            return Err(TransportError::Protocol("response id mismatch".into()));
        }

        if response.is_truncated() {
            trace!(%server, "truncated response, retrying over TCP");
            return self.query_tcp(server, query).await;
        }
        Ok(response)
    }

    async fn query_tcp(
        &self,
        server: SocketAddr,
        query: &Message,
    ) -> Result<Message, TransportError> {
        let mut stream = timeout(self.timeout, TcpStream::connect(server))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let wire = query.emit().map_err(|e| TransportError::Protocol(e.to_string()))?;
        let frame_len = u16::try_from(wire.len())
            .map_err(|_| TransportError::Protocol("query exceeds TCP frame".into()))?;
        stream.write_all(&frame_len.to_be_bytes()).await?;
        stream.write_all(&wire).await?;

        let mut len_buf = [0u8; 2];
        timeout(self.timeout, stream.read_exact(&mut len_buf))
            .await
            .map_err(|_| TransportError::Timeout)??;
        let mut response_buf = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
        timeout(self.timeout, stream.read_exact(&mut response_buf))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let response = Message::parse(&response_buf)
            .map_err(|e| TransportError::Protocol(e.to_string()))?;
        if response.id() != query.id() {
            return Err(TransportError::Protocol("response id mismatch".into()));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, query: Message) -> Result<Message, TransportError> {
        let mut last = None;
        for attempt in 0..self.retries {
            let Some(server) = self.pick_server() else {
                return Err(TransportError::Protocol("no servers configured".into()));
            };
            debug!(attempt, %server, id = query.id(), "sending query");

            match self.query_udp(server, &query).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    debug!(%server, error = %e, "query attempt failed");
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or(TransportError::Exhausted {
            attempts: self.retries,
        }))
    }
}
