use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::{auth::extractors::AuthUser, state::AppState};

use super::repo::Topic;

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/topics", get(list_topics).post(create_topic))
}

#[instrument(skip(state))]
pub async fn list_topics(
    State(state): State<AppState>,
    AuthUser(_auth_user_id): AuthUser,
) -> Result<Json<Vec<Topic>>, (StatusCode, String)> {
    let topics = Topic::list(&state.db).await.map_err(|e| {
        error!(error = %e, "list topics failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(topics))
}

#[instrument(skip(state, payload))]
pub async fn create_topic(
    State(state): State<AppState>,
    AuthUser(_auth_user_id): AuthUser,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<Topic>), (StatusCode, String)> {
    if payload.name.trim().is_empty() {
        warn!("empty topic name");
        return Err((StatusCode::BAD_REQUEST, "Topic name must not be empty".into()));
    }

    let topic = Topic::create(&state.db, &payload.name).await.map_err(|e| {
        error!(error = %e, "create topic failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(topic_id = %topic.id, "topic created");
    Ok((StatusCode::CREATED, Json(topic)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes() {
        let req: CreateTopicRequest =
            serde_json::from_str(r#"{"name": "this is a topic"}"#).unwrap();
        assert_eq!(req.name, "this is a topic");
    }

    #[test]
    fn topic_serializes_id_and_name() {
        let topic = Topic {
            id: 1,
            name: "this is a topic".into(),
        };
        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "this is a topic");
    }
}
