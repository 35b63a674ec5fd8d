//! State management module.
//!
//! Contains the Hub (shared relay state), the session registry and the
//! delivery-plan types handlers use to address recipients.

mod conn_id;
mod delivery;
mod hub;
mod registry;
mod session;

pub use conn_id::{ConnId, ConnIdGenerator};
pub use delivery::{Delivery, DeliveryPlan, Recipients};
pub use hub::{DeliveryReport, Hub, OutboundLine, Outbox};
pub use registry::{RegistryError, SessionRegistry};
pub use session::Session;
