//! HTTP server
//!
//! Routes:
//! - `GET /{path...}`: riddle page, directory listing or video page
//! - `GET /{path...}?direct`: raw file bytes with range support
//! - `POST /answer`: riddle answer form; `GET /answer` redirects to `/`
//! - `GET /static/{name}`: embedded assets, never gated
//!
//! Every response carries security headers and every request is logged.

mod error;
mod server;
mod routes;

pub use error::ServeError;
pub use server::{build_router, AppState, FogServer};
pub use routes::{
    answer, answer_page, browse, load_and_save_session, log_request, security_headers,
    static_asset, AnswerForm, DIRECT_QUERY_KEY,
};
