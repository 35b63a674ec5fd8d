//! Outbound reply vocabulary.
//!
//! Every line the relay writes is one [`Reply`]. `Display` renders the wire
//! text without a terminator; the line codec appends the newline.

use std::fmt;

/// Reasons carried by `ERR` replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    /// `LOGIN` with an empty or malformed name.
    InvalidUsername,
    /// `LOGIN` with a name already claimed (case-insensitively).
    UsernameTaken,
    /// Any command but `LOGIN` before authenticating.
    NotLoggedIn,
    /// `LOGIN` on an authenticated connection.
    AlreadyLoggedIn,
    /// `DM` to a name with no session.
    UserNotFound(String),
    /// `DM` without a target or without text.
    InvalidDmFormat,
    /// Keyword not recognised.
    UnknownCommand,
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUsername => f.write_str("invalid-username"),
            Self::UsernameTaken => f.write_str("username-taken"),
            Self::NotLoggedIn => f.write_str("please log in first using: LOGIN <username>"),
            Self::AlreadyLoggedIn => f.write_str("already logged in"),
            Self::UserNotFound(name) => write!(f, "user-not-found {name}"),
            Self::InvalidDmFormat => f.write_str("invalid-DM-format"),
            Self::UnknownCommand => f.write_str("unknown command"),
        }
    }
}

/// Session events announced with `INFO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoEvent {
    /// A session was created.
    Joined(String),
    /// A session was torn down.
    Disconnected(String),
}

impl fmt::Display for InfoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined(name) => write!(f, "{name} joined"),
            Self::Disconnected(name) => write!(f, "{name} disconnected"),
        }
    }
}

/// One outbound protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK`
    Ok,
    /// `OK DM <name> <text>`: confirmation of a delivered direct message.
    OkDm {
        /// Recipient display name.
        to: String,
        /// Message text.
        text: String,
    },
    /// `ERR <reason>`
    Err(ErrorReason),
    /// `INFO <event>`
    Info(InfoEvent),
    /// `MSG <name> <text>`: a broadcast from `from`.
    Msg {
        /// Sender display name.
        from: String,
        /// Message text.
        text: String,
    },
    /// `DM <name> <text>`: a direct message from `from`.
    Dm {
        /// Sender display name.
        from: String,
        /// Message text.
        text: String,
    },
    /// `USER <name>`
    User(String),
    /// `PONG`
    Pong,
}

impl Reply {
    /// Shorthand for an `ERR` reply.
    pub fn err(reason: ErrorReason) -> Self {
        Self::Err(reason)
    }

    /// The leading word of the rendered line.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Ok | Self::OkDm { .. } => "OK",
            Self::Err(_) => "ERR",
            Self::Info(_) => "INFO",
            Self::Msg { .. } => "MSG",
            Self::Dm { .. } => "DM",
            Self::User(_) => "USER",
            Self::Pong => "PONG",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::OkDm { to, text } => write!(f, "OK DM {to} {text}"),
            Self::Err(reason) => write!(f, "ERR {reason}"),
            Self::Info(event) => write!(f, "INFO {event}"),
            Self::Msg { from, text } => write!(f, "MSG {from} {text}"),
            Self::Dm { from, text } => write!(f, "DM {from} {text}"),
            Self::User(name) => write!(f, "USER {name}"),
            Self::Pong => f.write_str("PONG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lines() {
        assert_eq!(
            Reply::err(ErrorReason::InvalidUsername).to_string(),
            "ERR invalid-username"
        );
        assert_eq!(
            Reply::err(ErrorReason::UsernameTaken).to_string(),
            "ERR username-taken"
        );
        assert_eq!(
            Reply::err(ErrorReason::NotLoggedIn).to_string(),
            "ERR please log in first using: LOGIN <username>"
        );
        assert_eq!(
            Reply::err(ErrorReason::AlreadyLoggedIn).to_string(),
            "ERR already logged in"
        );
        assert_eq!(
            Reply::err(ErrorReason::UserNotFound("ghost".into())).to_string(),
            "ERR user-not-found ghost"
        );
        assert_eq!(
            Reply::err(ErrorReason::InvalidDmFormat).to_string(),
            "ERR invalid-DM-format"
        );
        assert_eq!(
            Reply::err(ErrorReason::UnknownCommand).to_string(),
            "ERR unknown command"
        );
    }

    #[test]
    fn test_message_lines() {
        let msg = Reply::Msg {
            from: "alice".into(),
            text: "hello there".into(),
        };
        assert_eq!(msg.to_string(), "MSG alice hello there");

        let dm = Reply::Dm {
            from: "alice".into(),
            text: "hi".into(),
        };
        assert_eq!(dm.to_string(), "DM alice hi");

        let ok = Reply::OkDm {
            to: "bob".into(),
            text: "hi".into(),
        };
        assert_eq!(ok.to_string(), "OK DM bob hi");
        assert_eq!(ok.verb(), "OK");
    }

    #[test]
    fn test_info_and_simple_lines() {
        assert_eq!(
            Reply::Info(InfoEvent::Joined("Alice".into())).to_string(),
            "INFO Alice joined"
        );
        assert_eq!(
            Reply::Info(InfoEvent::Disconnected("Alice".into())).to_string(),
            "INFO Alice disconnected"
        );
        assert_eq!(Reply::User("Bob".into()).to_string(), "USER Bob");
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Pong.to_string(), "PONG");
    }
}
