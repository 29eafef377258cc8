use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        handlers::is_valid_email,
        jwt::AuthUser,
        repo::{self, User},
    },
    error::ApiError,
    state::AppState,
    users::dto::{ProfileUpdated, UpdateProfileRequest},
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/profile", get(get_profile).put(update_profile))
}

/// The profile id always comes from the resolved token; a stale token for a
/// deleted account surfaces here as 404.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdated>, ApiError> {
    let name = match payload.name {
        Some(n) => {
            let n = n.trim().to_string();
            if n.chars().count() < 2 {
                warn!(user_id = %user_id, "profile update rejected: name too short");
                return Err(ApiError::InvalidInput(
                    "Name must be at least 2 characters".into(),
                ));
            }
            Some(n)
        }
        None => None,
    };

    let email = match payload.email {
        Some(e) => {
            let e = e.trim().to_lowercase();
            if !is_valid_email(&e) {
                warn!(user_id = %user_id, "profile update rejected: invalid email");
                return Err(ApiError::InvalidInput("Invalid email".into()));
            }
            Some(e)
        }
        None => None,
    };

    let updated =
        match User::update_profile(&state.db, user_id, name.as_deref(), email.as_deref()).await {
            Ok(u) => u,
            Err(e) if repo::is_unique_violation(&e) => {
                warn!(user_id = %user_id, "profile update rejected: email taken");
                return Err(ApiError::DuplicateAccount);
            }
            Err(e) => return Err(e.into()),
        };

    let user = updated.ok_or(ApiError::NotFound("User not found"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(ProfileUpdated {
        message: "Profile updated successfully".into(),
        user,
    }))
}
