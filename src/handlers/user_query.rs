//! User query handlers: WHO.

use super::{Context, Handler};
use crate::error::HandlerResult;
use async_trait::async_trait;
use relay_proto::{CommandRef, Reply};

/// Handler for WHO command.
///
/// Lists every registered name, the requester's included, one `USER` line
/// each. Order is unspecified.
pub struct WhoHandler;

#[async_trait]
impl Handler for WhoHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandRef<'_>) -> HandlerResult {
        for name in ctx.hub.registry.all_names() {
            ctx.reply(Reply::User(name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::Router;
    use crate::handlers::test_support::{lines_for, new_hub};

    #[tokio::test]
    async fn who_lists_everyone_with_original_case() {
        let hub = new_hub();
        let router = Router::new();
        let (alice, _rx_alice) = hub.attach();
        let (bob, _rx_bob) = hub.attach();
        let (_lurker, _rx) = hub.attach();
        hub.registry.register(alice, "Alice").unwrap();
        hub.registry.register(bob, "bOB").unwrap();

        let mut lines = lines_for(&router.route(&hub, alice, "WHO").await);
        lines.sort();
        assert_eq!(lines, vec!["USER Alice", "USER bOB"]);
    }

    #[tokio::test]
    async fn who_ignores_arguments() {
        let hub = new_hub();
        let router = Router::new();
        let (alice, _rx) = hub.attach();
        hub.registry.register(alice, "alice").unwrap();

        let plan = router.route(&hub, alice, "WHO is there").await;
        assert_eq!(lines_for(&plan), vec!["USER alice"]);
    }
}
