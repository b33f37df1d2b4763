use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after registration or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_deserializes_full_payload() {
        let body = r#"{
            "username": "email@gmail.com",
            "password": "thisisapassword",
            "first_name": "First Name",
            "last_name": "Last Name"
        }"#;
        let req: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.username, "email@gmail.com");
        assert_eq!(req.first_name, "First Name");
        assert_eq!(req.last_name, "Last Name");
    }

    #[test]
    fn auth_response_carries_token() {
        let response = AuthResponse {
            token: "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b".into(),
            user: PublicUser {
                id: 1,
                username: "email@gmail.com".into(),
                first_name: "First Name".into(),
                last_name: "Last Name".into(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b");
        assert_eq!(json["user"]["username"], "email@gmail.com");
        assert!(json["user"].get("password").is_none());
    }
}
