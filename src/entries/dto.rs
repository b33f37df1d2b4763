use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::entries::repo_types::Entry;

time::serde::format_description!(
    created_on_format,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Body for entry create and full-replace update; both share one shape.
#[derive(Debug, Deserialize)]
pub struct EntryPayload {
    #[serde(default)]
    pub user: Option<i64>,
    pub title: String,
    pub body: String,
    #[serde(with = "created_on_format")]
    pub created_on: PrimitiveDateTime,
    #[serde(default)]
    pub entry_topics: Vec<i64>,
}

/// Entry as returned to the client.
#[derive(Debug, Serialize)]
pub struct EntryDetails {
    pub id: i64,
    pub user: i64,
    pub title: String,
    pub body: String,
    #[serde(with = "created_on_format")]
    pub created_on: PrimitiveDateTime,
    pub entry_topics: Vec<i64>,
}

impl EntryDetails {
    pub fn from_entry(entry: Entry, entry_topics: Vec<i64>) -> Self {
        Self {
            id: entry.id,
            user: entry.user_id,
            title: entry.title,
            body: entry.body,
            created_on: entry.created_on,
            entry_topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn payload_deserializes_wire_shape() {
        let body = r#"{
            "user": 1,
            "title": "This is a title",
            "body": "This is a body",
            "created_on": "2006-10-25 14:30:59",
            "entry_topics": [1]
        }"#;
        let payload: EntryPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.user, Some(1));
        assert_eq!(payload.title, "This is a title");
        assert_eq!(payload.body, "This is a body");
        assert_eq!(payload.created_on, datetime!(2006-10-25 14:30:59));
        assert_eq!(payload.entry_topics, vec![1]);
    }

    #[test]
    fn payload_defaults_user_and_topics() {
        let body = r#"{
            "title": "t",
            "body": "b",
            "created_on": "2006-10-25 14:30:59"
        }"#;
        let payload: EntryPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.user, None);
        assert!(payload.entry_topics.is_empty());
    }

    #[test]
    fn payload_rejects_malformed_timestamp() {
        let body = r#"{
            "title": "t",
            "body": "b",
            "created_on": "25/10/2006 14:30"
        }"#;
        assert!(serde_json::from_str::<EntryPayload>(body).is_err());
    }

    #[test]
    fn details_echo_title_body_and_timestamp_format() {
        let details = EntryDetails {
            id: 1,
            user: 1,
            title: "This is a title".into(),
            body: "This is a body".into(),
            created_on: datetime!(2006-10-25 14:30:59),
            entry_topics: vec![1],
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["title"], "This is a title");
        assert_eq!(json["body"], "This is a body");
        assert_eq!(json["created_on"], "2006-10-25 14:30:59");
        assert_eq!(json["entry_topics"], serde_json::json!([1]));
    }
}
