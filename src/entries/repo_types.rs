use sqlx::FromRow;
use time::PrimitiveDateTime;

/// Entry row; topic associations live in the entry_topics join table.
#[derive(Debug, Clone, FromRow)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub created_on: PrimitiveDateTime,
}
