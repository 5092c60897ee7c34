//! Riddle secret and answer verification

use super::error::GateError;
use super::session::{Session, SessionManager};

/// The riddle shown to unsolved visitors and the hash of its answer
///
/// Loaded once at startup and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiddleSecret {
    /// bcrypt hash of the answer
    pub hash: String,
    /// Riddle text, newlines preserved
    pub body: String,
}

impl RiddleSecret {
    /// Parse riddle file contents: the hash on the first line, the riddle
    /// body in everything after the first newline
    pub fn parse(contents: &str) -> Result<Self, GateError> {
        let (hash, body) = contents.split_once('\n').ok_or(GateError::MissingNewline)?;
        Ok(Self {
            hash: hash.trim().to_string(),
            body: body.to_string(),
        })
    }

    /// Check that the stored hash is something bcrypt can verify against
    pub fn validate(&self) -> Result<(), GateError> {
        bcrypt::verify("", &self.hash)
            .map(|_| ())
            .map_err(|e| GateError::InvalidHash {
                reason: e.to_string(),
            })
    }
}

/// Compare a submitted answer against a bcrypt hash
///
/// A malformed hash never matches.
pub fn check_answer(hash: &str, submitted: &str) -> bool {
    match bcrypt::verify(submitted, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Riddle hash could not be verified: {}", e);
            false
        }
    }
}

/// Access gate over the riddle secret
#[derive(Debug, Clone)]
pub struct RiddleGate {
    secret: RiddleSecret,
}

impl RiddleGate {
    /// Create a gate for the given secret
    pub fn new(secret: RiddleSecret) -> Self {
        Self { secret }
    }

    /// The riddle text
    pub fn riddle(&self) -> &str {
        &self.secret.body
    }

    /// Check a submitted answer
    ///
    /// bcrypt is deliberately slow; call from a blocking context.
    pub fn check_answer(&self, submitted: &str) -> bool {
        check_answer(&self.secret.hash, submitted)
    }

    /// Whether the session has solved the riddle
    pub fn is_solved(&self, session: &Session) -> bool {
        session.is_solved()
    }

    /// Record a solved riddle on the session, renewing its token first
    pub fn mark_solved(&self, sessions: &SessionManager, session: &Session) -> Result<(), GateError> {
        sessions.renew(session)?;
        session.set_solved();
        Ok(())
    }

    /// Attempt the riddle: on a correct answer the session becomes solved
    ///
    /// Returns whether the answer was correct. A wrong answer leaves the
    /// session untouched.
    pub fn attempt(
        &self,
        sessions: &SessionManager,
        session: &Session,
        submitted: &str,
    ) -> Result<bool, GateError> {
        if !self.check_answer(submitted) {
            return Ok(false);
        }
        self.mark_solved(sessions, session)?;
        Ok(true)
    }
}
