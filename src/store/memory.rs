use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{AppError, AppResult};

use super::{idea_not_found, Comment, Idea, IdeaChanges, Store, User};

/// Volatile backend. Everything lives in process memory and disappears on
/// restart; each operation holds the write lock for its full read-modify-write
/// so toggles and appends cannot lose updates.
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    ideas: RwLock<Vec<Idea>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            ideas: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Validation("User already exists".to_owned()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn list_ideas(&self) -> AppResult<Vec<Idea>> {
        let mut ideas = self.ideas.read().await.clone();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas)
    }

    async fn get_idea(&self, id: Uuid) -> AppResult<Idea> {
        let ideas = self.ideas.read().await;
        ideas
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(idea_not_found)
    }

    async fn create_idea(&self, idea: &Idea) -> AppResult<()> {
        self.ideas.write().await.push(idea.clone());
        Ok(())
    }

    async fn update_idea(&self, id: Uuid, changes: IdeaChanges) -> AppResult<Idea> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(idea_not_found)?;

        if let Some(title) = changes.title {
            idea.title = title;
        }
        if let Some(description) = changes.description {
            idea.description = description;
        }
        if let Some(category) = changes.category {
            idea.category = category;
        }
        idea.updated_at = Utc::now();

        Ok(idea.clone())
    }

    async fn delete_idea(&self, id: Uuid) -> AppResult<()> {
        let mut ideas = self.ideas.write().await;
        let pos = ideas
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(idea_not_found)?;
        ideas.remove(pos);
        Ok(())
    }

    async fn toggle_like(&self, id: Uuid, user_id: &str) -> AppResult<Idea> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(idea_not_found)?;

        match idea.likes.iter().position(|u| u == user_id) {
            Some(pos) => {
                idea.likes.remove(pos);
            }
            None => idea.likes.push(user_id.to_owned()),
        }

        Ok(idea.clone())
    }

    async fn add_comment(&self, id: Uuid, comment: &Comment) -> AppResult<Idea> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(idea_not_found)?;

        idea.comments.push(comment.clone());
        Ok(idea.clone())
    }

    async fn delete_comment(&self, id: Uuid, comment_id: Uuid) -> AppResult<Idea> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(idea_not_found)?;

        let pos = idea
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound("Comment not found".to_owned()))?;
        idea.comments.remove(pos);

        Ok(idea.clone())
    }
}
