use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::{
    store::{Comment, CommentAuthor, DynStore},
    AppError, AppResult,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCommentRequest {
    user_id: Option<String>,
    user_name: Option<String>,
    text: Option<String>,
}

#[debug_handler]
pub(crate) async fn add_comment(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
    Json(AddCommentRequest {
        user_id,
        user_name,
        text,
    }): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let text = text
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Comment text is required".to_owned()))?;

    let comment = Comment {
        id: Uuid::now_v7(),
        text,
        author: CommentAuthor {
            name: user_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_owned()),
            email: user_id,
        },
        created_at: Utc::now(),
    };

    let idea = store.add_comment(id, &comment).await?;
    info!("comment added to idea: {}", idea.title);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Comment added",
            "comment": comment,
            "comments": idea.comments,
        })),
    ))
}

#[debug_handler]
pub(crate) async fn delete_comment(
    State(store): State<DynStore>,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Value>> {
    let idea = store.delete_comment(id, comment_id).await?;

    Ok(Json(json!({
        "message": "Comment deleted",
        "comments": idea.comments,
    })))
}
