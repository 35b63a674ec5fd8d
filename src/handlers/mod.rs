//! Command handlers.
//!
//! One handler per keyword, registered with the [`Router`]. Handlers read and
//! mutate the session registry and append replies to a delivery plan; the
//! router and hub take care of error replies and writing.

mod connection;
mod core;
mod messaging;
mod user_query;

#[cfg(test)]
mod test_support;

pub use self::core::{Context, Handler, Router};
