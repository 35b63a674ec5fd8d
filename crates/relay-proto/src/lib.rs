//! # relay-proto
//!
//! Wire protocol for the relayd chat relay: newline-delimited UTF-8 text,
//! one command or reply per line.
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_proto::{CommandRef, Reply};
//!
//! let cmd = CommandRef::parse("DM bob see you at 5").expect("non-empty line");
//! assert_eq!(cmd.keyword(), "DM");
//! assert_eq!(cmd.split_target(), Some(("bob", "see you at 5")));
//!
//! let reply = Reply::Dm { from: "alice".into(), text: "see you at 5".into() };
//! assert_eq!(reply.to_string(), "DM alice see you at 5");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod name;
pub mod reply;

pub use self::command::CommandRef;
pub use self::error::{NameError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::name::{fold_name, names_eq, validate_name};
pub use self::reply::{ErrorReason, InfoEvent, Reply};
