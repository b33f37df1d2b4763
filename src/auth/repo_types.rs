use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub first_name: String,
    pub last_name: String,
    pub created_at: OffsetDateTime,
}

/// Opaque token row, one per user.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub id: i64,
    pub user_id: i64,
    pub key: String,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            username: "email@gmail.com".into(),
            password_hash: "$argon2id$not-a-real-hash".into(),
            first_name: "First Name".into(),
            last_name: "Last Name".into(),
            created_at: datetime!(2006-10-25 14:30:59 UTC),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("email@gmail.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
