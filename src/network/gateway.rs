//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket and spawns a Connection task for each
//! incoming client.

use crate::handlers::Router;
use crate::network::Connection;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    router: Arc<Router>,
    max_line_len: usize,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        hub: Arc<Hub>,
        router: Arc<Router>,
        max_line_len: usize,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            hub,
            router,
            max_line_len,
        })
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        error!(%addr, error = %e, "Failed to set TCP_NODELAY");
                    }

                    let (conn, outbox) = self.hub.attach();
                    info!(%conn, %addr, "Connection accepted");

                    let connection = Connection::new(
                        conn,
                        stream,
                        addr,
                        Arc::clone(&self.hub),
                        Arc::clone(&self.router),
                        outbox,
                        self.max_line_len,
                    );

                    tokio::spawn(async move {
                        if let Err(e) = connection.run().await {
                            error!(%conn, %addr, error = %e, "Connection error");
                        }
                        info!(%conn, %addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
