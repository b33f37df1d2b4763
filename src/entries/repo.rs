use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::entries::repo_types::Entry;

impl Entry {
    /// Insert the entry row and its topic associations in one transaction.
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        title: &str,
        body: &str,
        created_on: PrimitiveDateTime,
        topic_ids: &[i64],
    ) -> anyhow::Result<Entry> {
        let mut tx = db.begin().await?;

        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (user_id, title, body, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, body, created_on
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(created_on)
        .fetch_one(&mut *tx)
        .await?;

        for topic_id in topic_ids {
            sqlx::query("INSERT INTO entry_topics (entry_id, topic_id) VALUES ($1, $2)")
                .bind(entry.id)
                .bind(topic_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(entry)
    }

    /// Fetch an entry together with its topic-id set.
    pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<(Entry, Vec<i64>)>> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, user_id, title, body, created_on
            FROM entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        let Some(entry) = entry else {
            return Ok(None);
        };

        let topics = sqlx::query_scalar::<_, i64>(
            "SELECT topic_id FROM entry_topics WHERE entry_id = $1 ORDER BY topic_id",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(Some((entry, topics)))
    }

    /// Overwrite every field and replace the topic association set.
    /// Returns false when no row has this id.
    pub async fn replace(
        db: &PgPool,
        id: i64,
        user_id: i64,
        title: &str,
        body: &str,
        created_on: PrimitiveDateTime,
        topic_ids: &[i64],
    ) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE entries
            SET user_id = $2, title = $3, body = $4, created_on = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(created_on)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM entry_topics WHERE entry_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for topic_id in topic_ids {
            sqlx::query("INSERT INTO entry_topics (entry_id, topic_id) VALUES ($1, $2)")
                .bind(id)
                .bind(topic_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Returns false when no row had this id. Associations cascade.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
