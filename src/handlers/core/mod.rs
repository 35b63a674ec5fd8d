//! Core handler infrastructure.
//!
//! Contains the handler context, the `Handler` trait and the `Router` that
//! maps keywords to handlers and turns handler failures into replies.

pub mod context;
pub mod router;

pub use context::{Context, Handler};
pub use router::Router;
