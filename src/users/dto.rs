use serde::{Deserialize, Serialize};

use crate::auth::repo::User;

/// Partial profile update; only fields present in the body are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub message: String,
    pub user: User,
}
