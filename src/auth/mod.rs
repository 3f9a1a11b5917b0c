mod login;
mod register;
mod token;

pub use token::{Claims, JwtKeys};

use axum::{
    debug_handler,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    store::{DynStore, User},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/users", get(users))
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

// Debug listing. Password hashes never leave the store layer.
#[debug_handler]
async fn users(State(store): State<DynStore>) -> AppResult<Json<Vec<PublicUser>>> {
    let users = store.list_users().await?;
    Ok(Json(users.iter().map(PublicUser::from).collect()))
}
