mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub author: IdeaAuthor,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author: CommentAuthor,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields a PUT may replace. Anything left as `None` keeps its current value.
#[derive(Debug, Clone, Default)]
pub struct IdeaChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub type DynStore = Arc<dyn Store>;

/// Persistence seam between the route handlers and a backend.
///
/// Two implementations exist: [`SqliteStore`] (durable) and [`MemoryStore`]
/// (volatile, lost on restart). The backend is chosen once at startup from
/// configuration; `backend()` names the active one so callers can tell which
/// durability guarantee is in effect.
#[async_trait]
pub trait Store: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn create_user(&self, user: &User) -> AppResult<()>;
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// All ideas, newest first.
    async fn list_ideas(&self) -> AppResult<Vec<Idea>>;
    async fn get_idea(&self, id: Uuid) -> AppResult<Idea>;
    async fn create_idea(&self, idea: &Idea) -> AppResult<()>;
    async fn update_idea(&self, id: Uuid, changes: IdeaChanges) -> AppResult<Idea>;
    async fn delete_idea(&self, id: Uuid) -> AppResult<()>;

    /// Flips `user_id` membership in the idea's like set and returns the
    /// updated idea. Toggling twice restores the original membership.
    async fn toggle_like(&self, id: Uuid, user_id: &str) -> AppResult<Idea>;
    async fn add_comment(&self, id: Uuid, comment: &Comment) -> AppResult<Idea>;
    async fn delete_comment(&self, id: Uuid, comment_id: Uuid) -> AppResult<Idea>;
}

pub(crate) fn idea_not_found() -> crate::AppError {
    crate::AppError::NotFound("Idea not found".to_owned())
}
