use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// Flat named tag, referenced (never owned) by entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

impl Topic {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>("SELECT id, name FROM topics ORDER BY id")
            .fetch_all(db)
            .await?;
        Ok(topics)
    }

    pub async fn create(db: &PgPool, name: &str) -> anyhow::Result<Topic> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(topic)
    }

    /// How many of the given ids exist; callers compare against the set size.
    pub async fn count_existing(db: &PgPool, ids: &[i64]) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM topics WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(db)
        .await?;
        Ok(count)
    }
}
