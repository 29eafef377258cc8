use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Minimal user summary returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_exposes_no_secrets() {
        let response = AuthResponse {
            message: "Login successful".into(),
            token: "header.payload.signature".into(),
            user: PublicUser {
                id: Uuid::new_v4(),
                name: "Jane Smith".into(),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Jane Smith"));
        assert!(!json.contains("password"));
        assert!(!json.contains("email"));
    }
}
