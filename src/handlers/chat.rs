use std::sync::Arc;

use axum::extract::State;
use axum::{Form, Json};

use crate::models::{ChatForm, ChatReply};
use crate::state::AppState;

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> Json<ChatReply> {
    let response = state.chat.reply(&form.message);
    Json(ChatReply { response })
}
