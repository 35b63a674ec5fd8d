//! Delivery plans: what to send, and to whom.
//!
//! Handlers never write to sockets. They append deliveries to a plan, and the
//! [`Hub`](super::Hub) resolves recipient sets and enqueues the lines once
//! the command has finished.

use super::ConnId;
use relay_proto::Reply;

/// Who receives a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    /// Exactly one connection, authenticated or not.
    Conn(ConnId),
    /// Every authenticated session except the given connection, resolved
    /// when the plan is executed.
    SessionsExcept(ConnId),
}

/// One line and its recipient set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: Recipients,
    pub reply: Reply,
}

/// Ordered list of deliveries produced by one command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryPlan {
    deliveries: Vec<Delivery>,
}

impl DeliveryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `reply` to a single connection.
    pub fn send_to(&mut self, conn: ConnId, reply: Reply) {
        self.deliveries.push(Delivery {
            to: Recipients::Conn(conn),
            reply,
        });
    }

    /// Send `reply` to every authenticated session except `excluded`.
    pub fn broadcast_except(&mut self, excluded: ConnId, reply: Reply) {
        self.deliveries.push(Delivery {
            to: Recipients::SessionsExcept(excluded),
            reply,
        });
    }

    /// Remove every reply addressed to `conn` alone, keeping their order.
    pub fn take_for(&mut self, conn: ConnId) -> Vec<Reply> {
        let (own, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deliveries)
            .into_iter()
            .partition(|d| d.to == Recipients::Conn(conn));
        self.deliveries = rest;
        own.into_iter().map(|d| d.reply).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter()
    }
}

impl IntoIterator for DeliveryPlan {
    type Item = Delivery;
    type IntoIter = std::vec::IntoIter<Delivery>;

    fn into_iter(self) -> Self::IntoIter {
        self.deliveries.into_iter()
    }
}
