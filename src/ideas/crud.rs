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
    store::{DynStore, Idea, IdeaAuthor, IdeaChanges},
    AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn list_ideas(State(store): State<DynStore>) -> AppResult<Json<Vec<Idea>>> {
    Ok(Json(store.list_ideas().await?))
}

// Debug listing with a row count.
#[debug_handler]
pub(crate) async fn debug_all(State(store): State<DynStore>) -> AppResult<Json<Value>> {
    let ideas = store.list_ideas().await?;
    Ok(Json(json!({ "count": ideas.len(), "ideas": ideas })))
}

#[debug_handler]
pub(crate) async fn get_idea(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Idea>> {
    Ok(Json(store.get_idea(id).await?))
}

/// The author can arrive three ways on the wire: a top-level `authorEmail`, an
/// `author` object carrying an email, or `author` as a bare email string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AuthorField {
    Details { email: Option<String> },
    Email(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateIdeaRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    author: Option<AuthorField>,
    author_email: Option<String>,
}

#[debug_handler]
pub(crate) async fn create_idea(
    State(store): State<DynStore>,
    Json(CreateIdeaRequest {
        title,
        description,
        category,
        author,
        author_email,
    }): Json<CreateIdeaRequest>,
) -> AppResult<(StatusCode, Json<Idea>)> {
    let (Some(title), Some(description)) = (title, description) else {
        return Err(AppError::Validation(
            "Title and description are required".to_owned(),
        ));
    };
    let title = title.trim().to_owned();
    let description = description.trim().to_owned();
    if title.is_empty() || description.is_empty() {
        return Err(AppError::Validation(
            "Title and description are required".to_owned(),
        ));
    }

    let email = author_email
        .or(match author {
            Some(AuthorField::Details { email }) => email,
            Some(AuthorField::Email(email)) => Some(email),
            None => None,
        })
        .unwrap_or_else(|| "user@example.com".to_owned());
    let name = email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .unwrap_or("User")
        .to_owned();

    let now = Utc::now();
    let idea = Idea {
        id: Uuid::now_v7(),
        title,
        description,
        category: category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Other".to_owned()),
        author: IdeaAuthor {
            id: Uuid::now_v7().to_string(),
            name,
            email,
        },
        likes: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    store.create_idea(&idea).await?;
    info!("idea created: {} by {}", idea.title, idea.author.email);

    Ok((StatusCode::CREATED, Json(idea)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateIdeaRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
}

#[debug_handler]
pub(crate) async fn update_idea(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
    Json(UpdateIdeaRequest {
        title,
        description,
        category,
    }): Json<UpdateIdeaRequest>,
) -> AppResult<Json<Idea>> {
    let idea = store
        .update_idea(
            id,
            IdeaChanges {
                title,
                description,
                category,
            },
        )
        .await?;
    Ok(Json(idea))
}

#[debug_handler]
pub(crate) async fn delete_idea(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    store.delete_idea(id).await?;
    Ok(Json(json!({ "message": "Idea deleted" })))
}
