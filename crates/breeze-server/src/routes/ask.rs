use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    reply: String,
}

// answer a single question, non streaming
async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    tracing::info!(question = %request.question, "received question");

    match state.responder.respond(&request.question).await {
        Ok(reply) => Ok(Json(AskResponse { reply: reply.text })),
        Err(e) => {
            tracing::error!("Failed to answer question: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask_handler))
        .with_state(state)
}
