//! `POST /api/debate`: run a board turn.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::debate::{protocol, DebateError, TurnPlan};

use super::routes::AppState;
use super::types::{error_response, DebateBody, SyncDebateResponse};

const TEXT_EVENT_STREAM: &str = "text/event-stream";
const NO_CACHE: &str = "no-cache";

pub async fn post_debate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DebateBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected debate body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    let (request, stream) = body.into_parts();

    let plan = match TurnPlan::resolve(&request) {
        Ok(plan) => plan,
        Err(e) => return debate_error_response(&e),
    };

    let debate_id = Uuid::new_v4();
    tracing::info!(
        %debate_id,
        target = ?request.target_agent_id,
        history = request.history.len(),
        stream,
        "Debate started"
    );

    if !stream {
        return match state
            .orchestrator
            .run_to_completion(debate_id, plan, request)
            .await
        {
            Ok(messages) => Json(SyncDebateResponse {
                content: messages.last().map(|m| m.content.clone()),
                messages,
            })
            .into_response(),
            Err(e) => {
                tracing::error!(%debate_id, error = %e, "Debate failed");
                debate_error_response(&e)
            }
        };
    }

    let events = state.orchestrator.run(debate_id, plan, request);
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_EVENT_STREAM));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    (
        StatusCode::OK,
        headers,
        Body::from_stream(protocol::encode_stream(events)),
    )
        .into_response()
}

fn debate_error_response(error: &DebateError) -> Response {
    match error {
        DebateError::MissingDilemma => error_response(StatusCode::BAD_REQUEST, error.to_string()),
        DebateError::UnknownAgent(_) => error_response(StatusCode::NOT_FOUND, "Agent not found"),
        DebateError::AllModelsFailed | DebateError::Stream { .. } => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
