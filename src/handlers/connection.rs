//! Session lifecycle handlers: LOGIN and PING.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use async_trait::async_trait;
use relay_proto::{CommandRef, InfoEvent, Reply};
use tracing::info;

/// Handler for LOGIN command.
///
/// `LOGIN <name>` claims a display name. Only the first token is used;
/// anything after it is ignored.
pub struct LoginHandler;

#[async_trait]
impl Handler for LoginHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandRef<'_>) -> HandlerResult {
        if ctx.is_authenticated() {
            return Err(HandlerError::AlreadyAuthenticated);
        }

        let name = cmd.arg(0).unwrap_or("");
        let session = ctx.hub.registry.register(ctx.conn, name)?;
        metrics::set_sessions(ctx.hub.registry.len());

        info!(conn = %ctx.conn, name = %session.name(), "User logged in");

        ctx.reply(Reply::Ok);
        ctx.broadcast(Reply::Info(InfoEvent::Joined(session.name().to_string())));
        ctx.session = Some(session);
        Ok(())
    }

    fn requires_auth(&self) -> bool {
        false
    }
}

/// Handler for PING command.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandRef<'_>) -> HandlerResult {
        ctx.reply(Reply::Pong);
        Ok(())
    }
}
