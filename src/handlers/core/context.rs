//! Command handler context and the `Handler` trait.
//!
//! A `Context` is built fresh for every inbound line. It carries the
//! connection handle, the shared [`Hub`], the session snapshot taken at
//! dispatch time, and the [`DeliveryPlan`] the handler appends replies to.

use crate::error::{HandlerError, HandlerResult};
use crate::state::{ConnId, DeliveryPlan, Hub, Session};
use async_trait::async_trait;
use relay_proto::{CommandRef, Reply};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Connection the command arrived on.
    pub conn: ConnId,
    /// Shared relay state.
    pub hub: &'a Hub,
    /// Session owned by `conn` when the command was dispatched.
    pub session: Option<Session>,
    /// Lines to send once the handler returns.
    pub plan: DeliveryPlan,
}

impl<'a> Context<'a> {
    /// Create a context, snapshotting the session for `conn`.
    pub fn new(hub: &'a Hub, conn: ConnId) -> Self {
        Self {
            conn,
            hub,
            session: hub.registry.lookup_by_handle(conn),
            plan: DeliveryPlan::new(),
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The caller's session, or `NotAuthenticated`.
    pub fn require_session(&self) -> Result<&Session, HandlerError> {
        self.session.as_ref().ok_or(HandlerError::NotAuthenticated)
    }

    /// Queue a reply to the originating connection.
    #[inline]
    pub fn reply(&mut self, reply: Reply) {
        self.plan.send_to(self.conn, reply);
    }

    /// Queue a line for every other authenticated session.
    #[inline]
    pub fn broadcast(&mut self, reply: Reply) {
        self.plan.broadcast_except(self.conn, reply);
    }

    /// Queue a line for one specific connection.
    #[inline]
    pub fn send_to(&mut self, conn: ConnId, reply: Reply) {
        self.plan.send_to(conn, reply);
    }

    pub fn into_plan(self) -> DeliveryPlan {
        self.plan
    }
}

/// A command handler.
///
/// Handlers never write to the transport directly; they append to
/// `ctx.plan` and return. Failures are reported by returning a
/// [`HandlerError`], which the router turns into an `ERR` line.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandRef<'_>) -> HandlerResult;

    /// Whether the command is rejected for unauthenticated connections.
    fn requires_auth(&self) -> bool {
        true
    }
}
