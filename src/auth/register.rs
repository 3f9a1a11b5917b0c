use axum::{debug_handler, extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    store::{DynStore, User},
    AppError, AppResult,
};

use super::{AuthResponse, JwtKeys, PublicUser};

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn register(
    State(store): State<DynStore>,
    State(jwt): State<JwtKeys>,
    Json(RegisterRequest {
        name,
        email,
        password,
    }): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AppError::Validation(
            "Name, email and password are required".to_owned(),
        ));
    };
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Name, email and password are required".to_owned(),
        ));
    }

    let user = User {
        id: Uuid::now_v7(),
        name,
        email,
        password_hash: bcrypt::hash(&password, bcrypt::DEFAULT_COST)?,
        created_at: Utc::now(),
    };
    store.create_user(&user).await?;

    let token = jwt.issue(&user.id.to_string())?;
    info!("user registered: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: PublicUser::from(&user),
        }),
    ))
}
