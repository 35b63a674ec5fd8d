//! Session registry: the authoritative map from connection to display name.
//!
//! Both the session map and the folded-name index live behind one
//! `parking_lot::RwLock`, so every register/deregister is a single atomic
//! step and two racing claims for the same name cannot both succeed. The
//! lock is never held across an `.await`.

use super::{ConnId, Session};
use parking_lot::RwLock;
use relay_proto::{NameError, fold_name, validate_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// Reasons a `register` call is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
    #[error("name already in use: {0}")]
    NameTaken(String),
    #[error("connection already has a session")]
    AlreadyRegistered,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<ConnId, Session>,
    /// Folded name -> owning connection.
    names: HashMap<String, ConnId>,
}

/// Tracks which connections are authenticated under which names.
pub struct SessionRegistry {
    inner: RwLock<Inner>,
    max_name_len: usize,
}

impl SessionRegistry {
    pub fn new(max_name_len: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_name_len,
        }
    }

    /// Claim `name` for `conn`.
    ///
    /// Fails with `InvalidName` for empty or malformed names, `NameTaken` if
    /// any session holds a case-insensitively equal name, and
    /// `AlreadyRegistered` if `conn` already owns a session.
    pub fn register(&self, conn: ConnId, name: &str) -> Result<Session, RegistryError> {
        validate_name(name, self.max_name_len)?;
        let key = fold_name(name);

        let mut inner = self.inner.write();
        if inner.sessions.contains_key(&conn) {
            return Err(RegistryError::AlreadyRegistered);
        }

        match inner.names.entry(key) {
            Entry::Occupied(_) => Err(RegistryError::NameTaken(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(conn);
                let session = Session::new(conn, name);
                inner.sessions.insert(conn, session.clone());
                Ok(session)
            }
        }
    }

    /// Remove the session for `conn`, returning the freed display name.
    ///
    /// Returns `None` if `conn` had no session; calling this twice is harmless.
    pub fn deregister(&self, conn: ConnId) -> Option<Session> {
        let mut inner = self.inner.write();
        let session = inner.sessions.remove(&conn)?;
        inner.names.remove(session.key());
        Some(session)
    }

    pub fn lookup_by_handle(&self, conn: ConnId) -> Option<Session> {
        self.inner.read().sessions.get(&conn).cloned()
    }

    /// Case-insensitive lookup. Uniqueness guarantees at most one match.
    pub fn lookup_by_name(&self, name: &str) -> Option<Session> {
        let inner = self.inner.read();
        let conn = inner.names.get(&fold_name(name))?;
        inner.sessions.get(conn).cloned()
    }

    /// Snapshot of every display name. Order is unspecified and may differ
    /// between calls.
    pub fn all_names(&self) -> Vec<String> {
        self.inner
            .read()
            .sessions
            .values()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Snapshot of every authenticated connection except `excluded`.
    pub fn members_except(&self, excluded: ConnId) -> Vec<ConnId> {
        self.inner
            .read()
            .sessions
            .keys()
            .copied()
            .filter(|conn| *conn != excluded)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().sessions.len()
    }
}
