//! Route handlers and middleware

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::FormRejection, ConnectInfo, Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use maud::Markup;
use serde::Deserialize;

use super::error::ServeError;
use super::server::AppState;
use crate::gate::Session;
use crate::library::{respond_raw, video_page, EntryKind};
use crate::ui::{list_view, riddle_view, video_view, ListPage, RiddlePage, VideoPage};

/// Query key that switches a file request to raw byte serving
pub const DIRECT_QUERY_KEY: &str = "direct";

/// Riddle answer form
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    /// Submitted answer; a missing field counts as an empty answer
    #[serde(default)]
    pub answer: String,
}

/// Session middleware: load the visitor's session before the handler and
/// persist it afterwards
///
/// The session is handed to handlers as an `Extension<Session>`. A new or
/// renewed token is sent back in a `Set-Cookie` header.
pub async fn load_and_save_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookies: Vec<String> = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect();

    let session = state.sessions.load(cookies.iter().map(String::as_str));
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    match state.sessions.commit(&session) {
        Ok(Some(cookie)) => match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => {
                return ServeError::Internal {
                    reason: format!("unencodable session cookie: {}", e),
                }
                .into_response()
            }
        },
        Ok(None) => {}
        Err(e) => return ServeError::from(e).into_response(),
    }

    response
}

/// Content handler for every path not claimed by another route
///
/// Unsolved sessions get the riddle whatever they asked for. Solved sessions
/// get a listing for directories, the video page for files, or the raw file
/// when `?direct` is present.
pub async fn browse(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request: Request,
) -> Response {
    match serve_content(state, session, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn serve_content(
    state: AppState,
    session: Session,
    request: Request,
) -> Result<Response, ServeError> {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
        )
            .into_response());
    }

    if !state.gate.is_solved(&session) {
        return Ok(render_riddle(&state));
    }

    let resolved = state.library.resolve(request.uri().path())?;

    match resolved.kind {
        EntryKind::Directory => {
            let library = state.library.clone();
            let dir = resolved.absolute_path.clone();
            let listing = tokio::task::spawn_blocking(move || library.list(&dir))
                .await
                .map_err(|e| ServeError::Internal {
                    reason: format!("listing task failed: {}", e),
                })??;
            Ok(page(list_view(&ListPage::from(&listing)), "private, no-cache"))
        }
        EntryKind::File if wants_direct(request.uri().query()) => {
            Ok(respond_raw(&resolved.absolute_path, request).await?)
        }
        EntryKind::File => {
            let data = video_page(&resolved.url_path);
            Ok(page(video_view(&VideoPage::from(&data)), "private, no-cache"))
        }
    }
}

fn render_riddle(state: &AppState) -> Response {
    let markup = riddle_view(&RiddlePage {
        riddle: state.gate.riddle().to_string(),
    });
    // The same URL serves real content once solved
    page(markup, "no-store")
}

fn page(markup: Markup, cache_control: &'static str) -> Response {
    (
        [(header::CACHE_CONTROL, cache_control)],
        Html(markup.into_string()),
    )
        .into_response()
}

/// Whether the query string carries the direct-mode key, with or without a value
fn wants_direct(query: Option<&str>) -> bool {
    query
        .unwrap_or("")
        .split('&')
        .any(|pair| pair.split('=').next() == Some(DIRECT_QUERY_KEY))
}

/// Riddle answer submission
///
/// Route: POST /answer
///
/// Redirects to `/` whether or not the answer was right.
pub async fn answer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> Response {
    match submit_answer(state, session, form).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn submit_answer(
    state: AppState,
    session: Session,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> Result<Response, ServeError> {
    let Form(form) = form.map_err(|e| ServeError::BadRequest {
        reason: e.body_text(),
    })?;

    let gate = state.gate.clone();
    let sessions = state.sessions.clone();
    let solved =
        tokio::task::spawn_blocking(move || gate.attempt(&sessions, &session, &form.answer))
            .await
            .map_err(|e| ServeError::Internal {
                reason: format!("answer check task failed: {}", e),
            })??;

    if solved {
        tracing::info!("riddle solved");
    } else {
        tracing::info!("wrong riddle answer");
    }

    Ok(Redirect::to("/").into_response())
}

/// Send a browser that navigates to the answer form's target back home
///
/// Route: GET /answer
pub async fn answer_page() -> Redirect {
    Redirect::to("/")
}

/// Serve an embedded static asset
///
/// Route: GET /static/*path
pub async fn static_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match state.assets.get(&path) {
        Some(asset) => (
            [
                (header::CONTENT_TYPE, asset.content_type),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            Body::from(asset.data),
        )
            .into_response(),
        None => ServeError::NotFound {
            reason: format!("static asset {}", path),
        }
        .into_response(),
    }
}

/// Add security response headers
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // Prevent MIME type sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // Prevent clickjacking
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("same-origin"),
    );

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );

    response
}

/// Log every request with its outcome
pub async fn log_request(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();
    let remote = connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;

    tracing::info!(
        remote = %remote,
        method = %method,
        uri = %uri,
        version = ?version,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );

    response
}
