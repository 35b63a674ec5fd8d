//! Command routing and dispatch.
//!
//! The `Router` maps keywords to handlers, gates commands behind
//! authentication, keeps per-command usage counters and converts handler
//! failures into `ERR` replies for the originating connection.

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    connection::{LoginHandler, PingHandler},
    messaging::{DmHandler, MsgHandler},
    user_query::WhoHandler,
};
use crate::metrics;
use crate::state::{ConnId, DeliveryPlan, DeliveryReport, Hub, OutboundLine};
use crate::telemetry::{CommandTimer, spans};
use relay_proto::{CommandRef, InfoEvent, Reply, command};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, debug, info};

/// Metric label for keywords with no handler, to keep label cardinality bounded.
const UNKNOWN_LABEL: &str = "unknown";

/// Keyword table plus usage counters.
pub struct Router {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Router {
    /// Create a router with every command registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert(command::LOGIN, Box::new(LoginHandler));
        handlers.insert(command::MSG, Box::new(MsgHandler));
        handlers.insert(command::DM, Box::new(DmHandler));
        handlers.insert(command::WHO, Box::new(WhoHandler));
        handlers.insert(command::PING, Box::new(PingHandler));

        let command_counts = handlers
            .keys()
            .map(|&cmd| (cmd, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            command_counts,
        }
    }

    /// Usage counts for commands that have been used, busiest first.
    pub fn get_command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch one parsed command to its handler.
    ///
    /// Unauthenticated connections only reach handlers that don't require
    /// authentication; any other keyword, known or not, is refused with
    /// `NotAuthenticated` before a handler runs.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, cmd: &CommandRef<'_>) -> HandlerResult {
        let Some((&keyword, handler)) = self.handlers.get_key_value(cmd.keyword()) else {
            if !ctx.is_authenticated() {
                return Err(HandlerError::NotAuthenticated);
            }
            return Err(HandlerError::UnknownCommand(cmd.keyword().to_string()));
        };

        if handler.requires_auth() && !ctx.is_authenticated() {
            return Err(HandlerError::NotAuthenticated);
        }

        if let Some(counter) = self.command_counts.get(keyword) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let span = spans::command(keyword, ctx.conn);
        let _timer = CommandTimer::new(keyword);
        handler.handle(ctx, cmd).instrument(span).await
    }

    /// Interpret one inbound line and return what should be sent.
    ///
    /// Empty lines produce an empty plan. A failed command produces a plan
    /// holding only its `ERR` reply; nothing a handler queued before failing
    /// is sent.
    pub async fn route(&self, hub: &Hub, conn: ConnId, line: &str) -> DeliveryPlan {
        let Some(cmd) = CommandRef::parse(line) else {
            return DeliveryPlan::new();
        };

        let mut ctx = Context::new(hub, conn);
        match self.dispatch(&mut ctx, &cmd).await {
            Ok(()) => ctx.into_plan(),
            Err(e) => {
                let label = self
                    .handlers
                    .get_key_value(cmd.keyword())
                    .map_or(UNKNOWN_LABEL, |(&k, _)| k);
                metrics::record_command_error(label, e.error_code());

                debug!(%conn, command = %cmd.keyword(), error = %e, "Command error");
                let mut plan = DeliveryPlan::new();
                plan.send_to(conn, e.to_reply());
                plan
            }
        }
    }

    /// Route one line, queue what it addresses to other connections and
    /// return the replies for `conn` itself, in order.
    ///
    /// The caller writes the returned replies straight to its own socket, so
    /// a long reply such as `WHO` never has to fit in its outbound queue.
    pub async fn handle_line(&self, hub: &Hub, conn: ConnId, line: &str) -> Vec<OutboundLine> {
        let mut plan = self.route(hub, conn, line).await;
        let replies = plan.take_for(conn);
        if !plan.is_empty() {
            self.deliver(hub, plan);
        }
        replies
            .iter()
            .map(|reply| OutboundLine::from(reply.to_string()))
            .collect()
    }

    /// Execute `plan`, then tell the remaining sessions about every client
    /// it evicted. Each notice may evict more slow readers; those are
    /// announced the same way until a round evicts nobody.
    fn deliver(&self, hub: &Hub, plan: DeliveryPlan) -> DeliveryReport {
        let mut total = DeliveryReport::default();
        let mut plan = plan;

        loop {
            let report = hub.deliver(plan);
            total.delivered += report.delivered;
            total.dropped += report.dropped;
            if report.evicted.is_empty() {
                return total;
            }

            metrics::set_sessions(hub.registry.len());
            plan = DeliveryPlan::new();
            for session in report.evicted {
                info!(
                    conn = %session.conn,
                    name = %session.name(),
                    session_secs = session.age().as_secs(),
                    "User disconnected: SendQ exceeded"
                );
                plan.broadcast_except(
                    session.conn,
                    Reply::Info(InfoEvent::Disconnected(session.name().to_string())),
                );
                total.evicted.push(session);
            }
        }
    }

    /// Tear down the session for a closing connection.
    ///
    /// Frees the display name and tells every remaining session. Returns the
    /// freed name, or `None` if the connection never logged in or was already
    /// torn down. Nothing is sent to `conn` itself.
    pub fn disconnect(&self, hub: &Hub, conn: ConnId) -> Option<String> {
        let session = hub.registry.deregister(conn)?;
        metrics::set_sessions(hub.registry.len());

        let name = session.name().to_string();
        info!(
            %conn,
            name = %name,
            session_secs = session.age().as_secs(),
            "User disconnected"
        );

        let mut plan = DeliveryPlan::new();
        plan.broadcast_except(conn, Reply::Info(InfoEvent::Disconnected(name.clone())));
        self.deliver(hub, plan);

        Some(name)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
