use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{extractors::AuthUser, repo_types::User},
    state::AppState,
    topics::repo::Topic,
};

use super::dto::{EntryDetails, EntryPayload};
use super::repo_types::Entry;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/entries/:id", get(get_entry))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry))
        .route("/entries/:id", put(update_entry).delete(delete_entry))
}

/// Topic references are a set: order irrelevant, duplicates collapsed.
fn normalize_topics(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

async fn ensure_topics_exist(db: &PgPool, ids: &[i64]) -> Result<(), (StatusCode, String)> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = Topic::count_existing(db, ids).await.map_err(internal)?;
    if found != ids.len() as i64 {
        warn!(?ids, "entry_topics references an unknown topic");
        return Err((
            StatusCode::BAD_REQUEST,
            "entry_topics references an unknown topic".into(),
        ));
    }
    Ok(())
}

/// The payload may name an owner; otherwise the token's user owns the entry.
async fn resolve_owner(
    db: &PgPool,
    auth_user_id: i64,
    requested: Option<i64>,
) -> Result<i64, (StatusCode, String)> {
    match requested {
        None => Ok(auth_user_id),
        Some(id) if id == auth_user_id => Ok(id),
        Some(id) => match User::find_by_id(db, id).await.map_err(internal)? {
            Some(user) => Ok(user.id),
            None => {
                warn!(user_id = %id, "unknown user in payload");
                Err((StatusCode::BAD_REQUEST, "unknown user".into()))
            }
        },
    }
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(auth_user_id): AuthUser,
    Json(payload): Json<EntryPayload>,
) -> Result<(StatusCode, Json<EntryDetails>), (StatusCode, String)> {
    let owner = resolve_owner(&state.db, auth_user_id, payload.user).await?;
    let topic_ids = normalize_topics(&payload.entry_topics);
    ensure_topics_exist(&state.db, &topic_ids).await?;

    let entry = Entry::create(
        &state.db,
        owner,
        &payload.title,
        &payload.body,
        payload.created_on,
        &topic_ids,
    )
    .await
    .map_err(internal)?;

    info!(entry_id = %entry.id, user_id = %owner, "entry created");
    Ok((
        StatusCode::CREATED,
        Json(EntryDetails::from_entry(entry, topic_ids)),
    ))
}

#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(_auth_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<EntryDetails>, (StatusCode, String)> {
    match Entry::get(&state.db, id).await.map_err(internal)? {
        Some((entry, topics)) => Ok(Json(EntryDetails::from_entry(entry, topics))),
        None => {
            warn!(%id, "entry not found");
            Err((StatusCode::NOT_FOUND, "Entry not found".into()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(auth_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<EntryPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    let owner = resolve_owner(&state.db, auth_user_id, payload.user).await?;
    let topic_ids = normalize_topics(&payload.entry_topics);
    ensure_topics_exist(&state.db, &topic_ids).await?;

    let replaced = Entry::replace(
        &state.db,
        id,
        owner,
        &payload.title,
        &payload.body,
        payload.created_on,
        &topic_ids,
    )
    .await
    .map_err(internal)?;

    if !replaced {
        warn!(%id, "entry not found");
        return Err((StatusCode::NOT_FOUND, "Entry not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(_auth_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Entry::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        warn!(%id, "entry not found");
        return Err((StatusCode::NOT_FOUND, "Entry not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
