//! Shared fixtures for handler tests.

use crate::config::Config;
use crate::state::{DeliveryPlan, Hub, OutboundLine, Outbox};

pub fn new_hub() -> Hub {
    Hub::new(&Config::default())
}

/// Every line currently queued for the outbox.
pub fn drain(outbox: &mut Outbox) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = outbox.lines.try_recv() {
        lines.push(line.to_string());
    }
    lines
}

/// Replies returned by `Router::handle_line`, as text.
pub fn rendered(lines: Vec<OutboundLine>) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Rendered text of every delivery in the plan, in order.
pub fn lines_for(plan: &DeliveryPlan) -> Vec<String> {
    plan.iter().map(|d| d.reply.to_string()).collect()
}
