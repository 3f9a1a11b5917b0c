use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    store::{DynStore, Idea},
    AppError, AppResult,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeRequest {
    user_id: Option<String>,
}

#[debug_handler]
pub(crate) async fn toggle_like(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
    Json(LikeRequest { user_id }): Json<LikeRequest>,
) -> AppResult<Json<Idea>> {
    let user_id = user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_owned()))?;

    let idea = store.toggle_like(id, &user_id).await?;
    info!("idea liked/unliked: {}, total likes: {}", idea.title, idea.likes.len());

    Ok(Json(idea))
}
