pub mod auth;
pub mod config;
pub mod ideas;
pub mod store;

use axum::{
    debug_handler,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use auth::JwtKeys;
use store::DynStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: DynStore,
    pub jwt: JwtKeys,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth::router())
        .nest("/api/ideas", ideas::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[debug_handler]
async fn health(State(store): State<DynStore>) -> Json<Value> {
    Json(json!({
        "message": "IdeaShare API is running!",
        "storage": store.backend(),
    }))
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": msg }))).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(sqlx::Error);
apperr_impl!(uuid::Error);
apperr_impl!(bcrypt::BcryptError);
apperr_impl!(jsonwebtoken::errors::Error);
