//! Visitor sessions
//!
//! Sessions are keyed by an opaque token delivered in a cookie. The store is
//! shared by all requests; each request works on its own [`Session`] handle
//! which is committed back to the store after the handler runs.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use super::error::GateError;
use crate::core::utils::generate_token;

/// Name of the session cookie
pub const DEFAULT_COOKIE_NAME: &str = "fog_session";

/// Default session lifetime (five years)
pub const DEFAULT_SESSION_LIFETIME_DAYS: i64 = 365 * 5;

/// Length of a hex encoded session token
const TOKEN_LEN: usize = 64;

/// Persisted per-session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Whether the riddle has been solved
    pub solved: bool,
    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// A fresh, unsolved record valid for `lifetime`
    pub fn unsolved(lifetime: Duration) -> Self {
        Self {
            solved: false,
            expires_at: Utc::now() + lifetime,
        }
    }

    /// Check whether the record has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Backing store for session records
///
/// Implementations must allow concurrent reads and per-key writes; the last
/// write to a token wins.
pub trait SessionStore: Send + Sync {
    /// Load an unexpired record
    fn get(&self, token: &str) -> Option<SessionRecord>;

    /// Insert or replace a record
    fn set(&self, token: &str, record: SessionRecord) -> Result<(), GateError>;

    /// Move the record under `old_token` to a newly generated token
    ///
    /// The old token stops being valid. Returns the new token.
    fn renew(&self, old_token: &str) -> Result<String, GateError>;
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: DashMap<String, SessionRecord>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every expired record
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired(now));
        before.saturating_sub(self.records.len())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token: &str) -> Option<SessionRecord> {
        let record = self.records.get(token).map(|entry| entry.clone())?;
        if record.is_expired(Utc::now()) {
            self.records.remove(token);
            return None;
        }
        Some(record)
    }

    fn set(&self, token: &str, record: SessionRecord) -> Result<(), GateError> {
        self.records.insert(token.to_string(), record);
        Ok(())
    }

    fn renew(&self, old_token: &str) -> Result<String, GateError> {
        let new_token = generate_token();
        if let Some((_, record)) = self.records.remove(old_token) {
            self.records.insert(new_token.clone(), record);
        }
        Ok(new_token)
    }
}

/// Session cookie and lifetime settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie name
    pub cookie_name: String,
    /// How long a session stays valid
    pub lifetime: Duration,
    /// Add the `Secure` attribute to the cookie
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            lifetime: Duration::days(DEFAULT_SESSION_LIFETIME_DAYS),
            secure_cookie: false,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    token: String,
    record: SessionRecord,
    dirty: bool,
    issue_cookie: bool,
}

/// Per-request session handle
///
/// Cloning shares the underlying state, so a handler and the middleware
/// that loaded the session observe the same changes.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    fn new(token: String, record: SessionRecord, issue_cookie: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                token,
                record,
                dirty: false,
                issue_cookie,
            })),
        }
    }

    /// Current session token
    pub fn token(&self) -> String {
        self.inner.lock().token.clone()
    }

    /// Whether the riddle has been solved in this session
    pub fn is_solved(&self) -> bool {
        self.inner.lock().record.solved
    }

    pub(crate) fn set_solved(&self) {
        let mut state = self.inner.lock();
        state.record.solved = true;
        state.dirty = true;
    }
}

/// Loads, renews and commits sessions against a store
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl SessionManager {
    /// Create a manager over `store`
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Load the session for a request's `Cookie` header values
    ///
    /// A request without a well-formed token gets a new token and a cookie.
    /// A well-formed token with no live record is kept and reads as unsolved.
    /// Nothing is written to the store until the session is modified.
    pub fn load<'a>(&self, cookie_headers: impl IntoIterator<Item = &'a str>) -> Session {
        let token = cookie_headers
            .into_iter()
            .find_map(|header| parse_cookie(header, &self.config.cookie_name))
            .filter(|token| is_well_formed(token));

        if let Some(token) = token {
            let record = self
                .store
                .get(token)
                .unwrap_or_else(|| SessionRecord::unsolved(self.config.lifetime));
            return Session::new(token.to_string(), record, false);
        }

        let token = generate_token();
        tracing::debug!("Started session {}...", &token[..8]);
        Session::new(token, SessionRecord::unsolved(self.config.lifetime), true)
    }

    /// Replace the session's token, invalidating the old one
    pub fn renew(&self, session: &Session) -> Result<(), GateError> {
        let mut state = session.inner.lock();
        let new_token = self.store.renew(&state.token)?;
        state.token = new_token;
        state.dirty = true;
        state.issue_cookie = true;
        Ok(())
    }

    /// Persist pending changes
    ///
    /// Returns a `Set-Cookie` value when the client needs a new cookie.
    pub fn commit(&self, session: &Session) -> Result<Option<String>, GateError> {
        let mut state = session.inner.lock();
        if state.dirty {
            self.store.set(&state.token, state.record.clone())?;
            state.dirty = false;
        }
        if !state.issue_cookie {
            return Ok(None);
        }
        state.issue_cookie = false;
        Ok(Some(self.cookie(&state.token)))
    }

    fn cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.config.cookie_name,
            token,
            self.config.lifetime.num_seconds()
        );
        if self.config.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Find a cookie value by name in a `Cookie` header value
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}
