use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::{store::DynStore, AppError, AppResult};

use super::{AuthResponse, JwtKeys, PublicUser};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

fn invalid_credentials() -> AppError {
    // Unknown email and wrong password are indistinguishable on the wire.
    AppError::Validation("Invalid credentials".to_owned())
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn login(
    State(store): State<DynStore>,
    State(jwt): State<JwtKeys>,
    Json(LoginRequest { email, password }): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (email, password) else {
        return Err(invalid_credentials());
    };

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !bcrypt::verify(&password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = jwt.issue(&user.id.to_string())?;
    info!("user logged in: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}
