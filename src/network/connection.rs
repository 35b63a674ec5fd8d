//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!    ┌──────────────────────────────────────────────┐
//!    │             Connection Task                  │
//!    │                                              │
//!    │  Framed<TcpStream, LineCodec>                │
//!    │     │ (lines in)            ▲ (lines out)    │
//!    │     ▼                       │                │
//!    │  tokio::select! ◄──── Outbox (queue, evict)  │
//!    │     │                       ▲                │
//!    │     ▼                       │                │
//!    │  Router ──▶ own replies ────┘                │
//!    │     └─────▶ DeliveryPlan ──▶ Hub::deliver    │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! Replies to this client's own commands are written as soon as the
//! command finishes. Lines from other connections arrive through the
//! outbound queue and are written in queue order. If the client stops
//! reading and its queue overflows, the hub evicts it and this task stops.

use crate::handlers::Router;
use crate::state::{ConnId, Hub, OutboundLine, Outbox};
use futures_util::{SinkExt, StreamExt};
use relay_proto::{LineCodec, ProtocolError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, info, instrument, warn};

/// A client connection handler.
pub struct Connection {
    conn: ConnId,
    addr: SocketAddr,
    hub: Arc<Hub>,
    router: Arc<Router>,
    stream: TcpStream,
    outbox: Outbox,
    max_line_len: usize,
}

impl Connection {
    /// Create a new connection handler.
    ///
    /// `conn` and `outbox` come from [`Hub::attach`].
    pub fn new(
        conn: ConnId,
        stream: TcpStream,
        addr: SocketAddr,
        hub: Arc<Hub>,
        router: Arc<Router>,
        outbox: Outbox,
        max_line_len: usize,
    ) -> Self {
        Self {
            conn,
            addr,
            hub,
            router,
            stream,
            outbox,
            max_line_len,
        }
    }

    /// Run the connection until the client goes away.
    ///
    /// Clean close, read errors, oversize lines, invalid UTF-8 and eviction
    /// all end the loop the same way: the session (if any) is torn down and
    /// the remaining sessions are told. Only write failures are returned.
    #[instrument(skip(self), fields(conn = %self.conn, addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            conn,
            hub,
            router,
            stream,
            mut outbox,
            max_line_len,
            ..
        } = self;

        let mut framed = Framed::new(stream, LineCodec::with_max_len(max_line_len));

        let result = loop {
            tokio::select! {
                inbound = framed.next() => match inbound {
                    Some(Ok(line)) => {
                        debug!(raw = %line, "Received line");
                        let replies = router.handle_line(&hub, conn, &line).await;
                        if let Err(e) = write_replies(&mut framed, replies).await {
                            break Err(anyhow::Error::from(e).context("write failed"));
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error");
                        break Ok(());
                    }
                    None => {
                        info!("Client disconnected");
                        break Ok(());
                    }
                },
                Some(line) = outbox.lines.recv() => {
                    if let Err(e) = framed.send(line).await {
                        break Err(anyhow::Error::from(e).context("write failed"));
                    }
                }
                _ = &mut outbox.evicted => {
                    info!("Client evicted: SendQ exceeded");
                    break Ok(());
                }
            }
        };

        hub.detach(conn);
        router.disconnect(&hub, conn);
        result
    }
}

async fn write_replies(
    framed: &mut Framed<TcpStream, LineCodec>,
    replies: Vec<OutboundLine>,
) -> Result<(), ProtocolError> {
    for line in replies {
        framed.send(line).await?;
    }
    Ok(())
}
