//! Browser chat front-end. Serves a static page that talks to a small JSON
//! API, keeps a transcript per browser session and forwards each message to
//! the chatbot backend.

pub mod backend;
pub mod session;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ChatForm, ConversationMessage};

pub use backend::{BackendError, ChatBackend, HttpChatBackend};
pub use session::{SessionStore, Transcript};

pub const SESSION_COOKIE: &str = "chat_session";

static CHAT_HTML: &str = include_str!("../web/chat_ui.html");

pub struct UiState {
    pub backend: Box<dyn ChatBackend>,
    pub sessions: SessionStore,
}

impl UiState {
    pub fn new(backend: Box<dyn ChatBackend>) -> Self {
        Self::with_sessions(backend, SessionStore::default())
    }

    pub fn with_sessions(backend: Box<dyn ChatBackend>, sessions: SessionStore) -> Self {
        Self { backend, sessions }
    }
}

pub fn router(state: Arc<UiState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/transcript", get(transcript))
        .route("/send", post(send))
        .route("/clear", post(clear))
        .route("/quick/:action", post(quick))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Canned message behind each quick-action button.
pub fn quick_message(action: &str) -> Option<&'static str> {
    match action {
        "status" => Some("Check my flight status"),
        "book" => Some("I want to book a flight"),
        "cancel" => Some("I want to cancel my flight"),
        _ => None,
    }
}

async fn index(headers: HeaderMap) -> Response {
    let (id, is_new) = session_id(&headers);
    with_cookie(Html(CHAT_HTML).into_response(), id, is_new)
}

// GET /api/transcript
async fn transcript(State(state): State<Arc<UiState>>, headers: HeaderMap) -> Response {
    let (id, is_new) = session_id(&headers);
    with_cookie(Json(state.sessions.transcript(id)).into_response(), id, is_new)
}

// POST /send
async fn send(
    State(state): State<Arc<UiState>>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let (id, is_new) = session_id(&headers);
    let message = form.message.trim();
    let response = if message.is_empty() {
        Json(state.sessions.transcript(id)).into_response()
    } else {
        converse(&state, id, message).await.into_response()
    };
    with_cookie(response, id, is_new)
}

// POST /clear
async fn clear(State(state): State<Arc<UiState>>, headers: HeaderMap) -> Response {
    let (id, is_new) = session_id(&headers);
    state.sessions.clear(id);
    with_cookie(Json(Transcript::default()).into_response(), id, is_new)
}

// POST /quick/:action
async fn quick(
    State(state): State<Arc<UiState>>,
    Path(action): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(message) = quick_message(&action) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "unknown quick action"})),
        )
            .into_response();
    };
    let (id, is_new) = session_id(&headers);
    let response = converse(&state, id, message).await.into_response();
    with_cookie(response, id, is_new)
}

/// Records the user turn, then the backend's reply. A failed request leaves
/// the user turn in place and surfaces as a 502.
async fn converse(
    state: &UiState,
    id: Uuid,
    message: &str,
) -> Result<Json<Transcript>, AppError> {
    state.sessions.push(id, ConversationMessage::user(message));

    match state.backend.send(message).await {
        Ok(reply) => {
            state.sessions.push(id, ConversationMessage::assistant(reply));
            Ok(Json(state.sessions.transcript(id)))
        }
        Err(e) => {
            tracing::warn!(session = %id, error = %e, "backend request failed");
            Err(AppError::Backend(backend::describe(&e, state.backend.url())))
        }
    }
}

/// Session id from the cookie, or a fresh one flagged as new.
fn session_id(headers: &HeaderMap) -> (Uuid, bool) {
    let existing = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok());

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

fn with_cookie(mut response: Response, id: Uuid, is_new: bool) -> Response {
    if is_new {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "invalid session cookie"),
        }
    }
    response
}
