use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub(crate) mod extractors;
pub mod token;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
