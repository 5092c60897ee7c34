//! Riddle gate
//!
//! All content sits behind a single shared riddle. A visitor's session starts
//! unsolved; a correct answer renews the session token and marks it solved
//! for the rest of the session's lifetime.
//!
//! - `riddle`: the riddle secret and answer verification
//! - `session`: the session store trait, its in-memory implementation, and
//!   the per-request session handle

mod error;
mod riddle;
mod session;

pub use error::GateError;
pub use riddle::{check_answer, RiddleGate, RiddleSecret};
pub use session::{
    parse_cookie, MemorySessionStore, Session, SessionConfig, SessionManager, SessionRecord,
    SessionStore, DEFAULT_COOKIE_NAME, DEFAULT_SESSION_LIFETIME_DAYS,
};
