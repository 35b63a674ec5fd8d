//! Message relay handlers: MSG and DM.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use relay_proto::{CommandRef, Reply};
use tracing::debug;

/// Handler for MSG command.
///
/// `MSG <text>` relays the text to every other session. Empty text is
/// silently ignored.
pub struct MsgHandler;

#[async_trait]
impl Handler for MsgHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandRef<'_>) -> HandlerResult {
        let from = ctx.require_session()?.name().to_string();

        let text = cmd.text();
        if text.is_empty() {
            return Ok(());
        }

        ctx.broadcast(Reply::Msg {
            from,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Handler for DM command.
///
/// `DM <name> <text>` delivers the text to the one session holding `name`
/// (case-insensitive) and acknowledges with `OK DM`. Sending to yourself is
/// allowed.
pub struct DmHandler;

#[async_trait]
impl Handler for DmHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandRef<'_>) -> HandlerResult {
        let from = ctx.require_session()?.name().to_string();

        let (target, text) = cmd.split_target().ok_or(HandlerError::MalformedDm)?;
        if text.is_empty() {
            return Err(HandlerError::MalformedDm);
        }

        let Some(peer) = ctx.hub.registry.lookup_by_name(target) else {
            return Err(HandlerError::UserNotFound(target.to_string()));
        };

        debug!(conn = %ctx.conn, from = %from, to = %peer.name(), "Direct message");

        ctx.send_to(
            peer.conn,
            Reply::Dm {
                from,
                text: text.to_string(),
            },
        );
        ctx.reply(Reply::OkDm {
            to: peer.name().to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
