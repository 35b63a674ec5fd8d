//! The Hub: shared relay state.
//!
//! Owns the session registry and one bounded outbound queue per live
//! connection. Lines addressed to a client by anyone else go through that
//! client's queue, which is drained by a single writer in the connection
//! task. Replies to a client's own commands are written by that same task
//! directly, so they never take up queue space.
//!
//! A client whose queue is full when a line arrives is not reading fast
//! enough. It is evicted: its queue is closed, its connection task is told
//! to stop and its session is freed, so every line after that point is
//! addressed only to sessions that can still take it.

use super::{ConnId, ConnIdGenerator, DeliveryPlan, Recipients, Session, SessionRegistry};
use crate::config::Config;
use crate::metrics;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Outbound line as queued for a connection.
pub type OutboundLine = Arc<str>;

/// Result of executing a delivery plan.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Lines enqueued.
    pub delivered: usize,
    /// Lines discarded because the recipient queue was full or closed.
    pub dropped: usize,
    /// Sessions disconnected because their queue was full.
    pub evicted: Vec<Session>,
}

/// Receiving half of a connection's outbound path, owned by its task.
pub struct Outbox {
    /// Lines from other connections, in the order they were queued.
    pub lines: mpsc::Receiver<OutboundLine>,
    /// Fires when the hub has evicted this connection.
    pub evicted: oneshot::Receiver<()>,
}

struct Outbound {
    tx: mpsc::Sender<OutboundLine>,
    evict: oneshot::Sender<()>,
}

pub struct Hub {
    pub registry: SessionRegistry,
    outbound: DashMap<ConnId, Outbound>,
    conn_ids: ConnIdGenerator,
    outbound_capacity: usize,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: SessionRegistry::new(config.limits.max_name_len),
            outbound: DashMap::new(),
            conn_ids: ConnIdGenerator::new(),
            outbound_capacity: config.limits.outbound_queue,
        }
    }

    /// Mint a handle for a new connection and open its outbound queue.
    pub fn attach(&self) -> (ConnId, Outbox) {
        let conn = self.conn_ids.next();
        let (tx, lines) = mpsc::channel(self.outbound_capacity);
        let (evict, evicted) = oneshot::channel();
        self.outbound.insert(conn, Outbound { tx, evict });
        metrics::set_connected_clients(self.outbound.len());
        (conn, Outbox { lines, evicted })
    }

    /// Close the outbound queue for `conn`. Later sends to it are dropped.
    ///
    /// Does not touch the registry; session teardown is the router's job.
    pub fn detach(&self, conn: ConnId) -> bool {
        let removed = self.outbound.remove(&conn).is_some();
        metrics::set_connected_clients(self.outbound.len());
        removed
    }

    /// Number of live transport connections, authenticated or not.
    pub fn connection_count(&self) -> usize {
        self.outbound.len()
    }

    /// Disconnect a client that has stopped reading.
    ///
    /// Closes its queue, signals its connection task and frees its session.
    /// Returns the freed session, or `None` if `conn` was already detached
    /// or never logged in.
    pub fn evict(&self, conn: ConnId) -> Option<Session> {
        let (_, outbound) = self.outbound.remove(&conn)?;
        let _ = outbound.evict.send(());
        metrics::set_connected_clients(self.outbound.len());
        metrics::record_eviction();

        let session = self.registry.deregister(conn);
        warn!(
            %conn,
            name = session.as_ref().map(Session::name),
            "SendQ exceeded, disconnecting client"
        );
        session
    }

    /// Enqueue one line for `conn` without waiting.
    fn try_enqueue(&self, conn: ConnId, line: OutboundLine) -> Result<(), TrySendError<OutboundLine>> {
        match self.outbound.get(&conn) {
            Some(outbound) => outbound.tx.try_send(line),
            None => Err(TrySendError::Closed(line)),
        }
    }

    /// Execute a delivery plan in order.
    ///
    /// Each reply is rendered once and shared between recipients. Broadcast
    /// recipient sets are snapshotted from the registry at this point, so a
    /// session joining concurrently may or may not receive the line. A
    /// recipient whose queue is full is evicted; it is listed in the report
    /// and left out of every later delivery.
    pub fn deliver(&self, plan: DeliveryPlan) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for delivery in plan {
            let line: OutboundLine = Arc::from(delivery.reply.to_string());
            let recipients = match delivery.to {
                Recipients::Conn(conn) => vec![conn],
                Recipients::SessionsExcept(excluded) => {
                    let members = self.registry.members_except(excluded);
                    metrics::record_fanout(members.len());
                    debug!(
                        verb = delivery.reply.verb(),
                        recipients = members.len(),
                        "Broadcasting"
                    );
                    members
                }
            };

            for conn in recipients {
                match self.try_enqueue(conn, Arc::clone(&line)) {
                    Ok(()) => report.delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        report.dropped += 1;
                        report.evicted.extend(self.evict(conn));
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!(%conn, "Outbound queue closed, dropping line");
                        report.dropped += 1;
                    }
                }
            }
        }

        metrics::record_delivery(report.delivered, report.dropped);
        report
    }
}
