//! Authenticated session record.

use super::ConnId;
use relay_proto::fold_name;
use std::time::{Duration, Instant};

/// A connection that has claimed a display name.
///
/// The display name keeps the exact case the client chose; `key` is the
/// folded form used only for uniqueness checks and lookups. Sessions are
/// never renamed.
#[derive(Debug, Clone)]
pub struct Session {
    pub conn: ConnId,
    display_name: String,
    key: String,
    logged_in_at: Instant,
}

impl Session {
    pub(super) fn new(conn: ConnId, display_name: &str) -> Self {
        Self {
            conn,
            display_name: display_name.to_string(),
            key: fold_name(display_name),
            logged_in_at: Instant::now(),
        }
    }

    /// Display name as claimed.
    #[inline]
    pub fn name(&self) -> &str {
        &self.display_name
    }

    /// Case-folded comparison key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// How long the session has existed.
    pub fn age(&self) -> Duration {
        self.logged_in_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConnIdGenerator;

    #[test]
    fn test_session_preserves_case() {
        let conn = ConnIdGenerator::new().next();
        let session = Session::new(conn, "Alice");
        assert_eq!(session.name(), "Alice");
        assert_eq!(session.key(), "alice");
        assert_eq!(session.conn, conn);
    }
}
