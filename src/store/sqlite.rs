use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use uuid::Uuid;

use crate::{AppError, AppResult};

use super::{idea_not_found, Comment, CommentAuthor, Idea, IdeaAuthor, IdeaChanges, Store, User};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS ideas (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        author_id TEXT NOT NULL,
        author_name TEXT NOT NULL,
        author_email TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS likes (
        idea_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        PRIMARY KEY (idea_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id TEXT PRIMARY KEY,
        idea_id TEXT NOT NULL,
        author_name TEXT NOT NULL,
        author_email TEXT,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

type IdeaRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

const IDEA_COLUMNS: &str =
    "id,title,description,category,author_id,author_name,author_email,created_at,updated_at";

/// Durable backend over a SQLite database file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(16)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    pub async fn init(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn assemble(&self, row: IdeaRow) -> AppResult<Idea> {
        let (id, title, description, category, author_id, author_name, author_email, created_at, updated_at) =
            row;

        let likes: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM likes WHERE idea_id=? ORDER BY rowid")
                .bind(&id)
                .fetch_all(&self.pool)
                .await?;

        let comments: Vec<(String, String, Option<String>, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id,author_name,author_email,text,created_at FROM comments WHERE idea_id=? ORDER BY rowid",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await?;

        let comments = comments
            .into_iter()
            .map(|(id, name, email, text, created_at)| {
                Ok(Comment {
                    id: Uuid::parse_str(&id)?,
                    text,
                    author: CommentAuthor { name, email },
                    created_at,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Idea {
            id: Uuid::parse_str(&id)?,
            title,
            description,
            category,
            author: IdeaAuthor {
                id: author_id,
                name: author_name,
                email: author_email,
            },
            likes: likes.into_iter().map(|(u,)| u).collect(),
            comments,
            created_at,
            updated_at,
        })
    }

    async fn require_idea(&self, id: Uuid) -> AppResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1 FROM ideas WHERE id=?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(idea_not_found)
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn create_user(&self, user: &User) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT 1 FROM users WHERE email=?")
            .bind(&user.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Validation("User already exists".to_owned()));
        }

        sqlx::query("INSERT INTO users (id,name,email,password_hash,created_at) VALUES (?,?,?,?,?)")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row: Option<(String, String, String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id,name,email,password_hash,created_at FROM users WHERE email=?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, name, email, password_hash, created_at)) => Ok(Some(User {
                id: Uuid::parse_str(&id)?,
                name,
                email,
                password_hash,
                created_at,
            })),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows: Vec<(String, String, String, String, DateTime<Utc>)> =
            sqlx::query_as("SELECT id,name,email,password_hash,created_at FROM users ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(id, name, email, password_hash, created_at)| {
                Ok(User {
                    id: Uuid::parse_str(&id)?,
                    name,
                    email,
                    password_hash,
                    created_at,
                })
            })
            .collect()
    }

    async fn list_ideas(&self) -> AppResult<Vec<Idea>> {
        let rows: Vec<IdeaRow> =
            sqlx::query_as(&format!("SELECT {IDEA_COLUMNS} FROM ideas"))
                .fetch_all(&self.pool)
                .await?;

        let mut ideas = Vec::with_capacity(rows.len());
        for row in rows {
            ideas.push(self.assemble(row).await?);
        }
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas)
    }

    async fn get_idea(&self, id: Uuid) -> AppResult<Idea> {
        let row: Option<IdeaRow> =
            sqlx::query_as(&format!("SELECT {IDEA_COLUMNS} FROM ideas WHERE id=?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => self.assemble(row).await,
            None => Err(idea_not_found()),
        }
    }

    async fn create_idea(&self, idea: &Idea) -> AppResult<()> {
        sqlx::query(&format!(
            "INSERT INTO ideas ({IDEA_COLUMNS}) VALUES (?,?,?,?,?,?,?,?,?)"
        ))
        .bind(idea.id.to_string())
        .bind(&idea.title)
        .bind(&idea.description)
        .bind(&idea.category)
        .bind(&idea.author.id)
        .bind(&idea.author.name)
        .bind(&idea.author.email)
        .bind(idea.created_at)
        .bind(idea.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_idea(&self, id: Uuid, changes: IdeaChanges) -> AppResult<Idea> {
        let result = sqlx::query(
            "UPDATE ideas SET title=COALESCE(?,title), description=COALESCE(?,description),
             category=COALESCE(?,category), updated_at=? WHERE id=?",
        )
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.category)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(idea_not_found());
        }
        self.get_idea(id).await
    }

    async fn delete_idea(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM ideas WHERE id=?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(idea_not_found());
        }

        sqlx::query("DELETE FROM likes WHERE idea_id=?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM comments WHERE idea_id=?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn toggle_like(&self, id: Uuid, user_id: &str) -> AppResult<Idea> {
        self.require_idea(id).await?;

        let liked = sqlx::query_scalar::<_, i64>("SELECT 1 FROM likes WHERE idea_id=? AND user_id=?")
            .bind(id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if liked.is_some() {
            sqlx::query("DELETE FROM likes WHERE idea_id=? AND user_id=?")
                .bind(id.to_string())
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        } else {
            sqlx::query("INSERT INTO likes (idea_id,user_id) VALUES (?,?)")
                .bind(id.to_string())
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        }

        self.get_idea(id).await
    }

    async fn add_comment(&self, id: Uuid, comment: &Comment) -> AppResult<Idea> {
        self.require_idea(id).await?;

        sqlx::query(
            "INSERT INTO comments (id,idea_id,author_name,author_email,text,created_at) VALUES (?,?,?,?,?,?)",
        )
        .bind(comment.id.to_string())
        .bind(id.to_string())
        .bind(&comment.author.name)
        .bind(&comment.author.email)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        self.get_idea(id).await
    }

    async fn delete_comment(&self, id: Uuid, comment_id: Uuid) -> AppResult<Idea> {
        self.require_idea(id).await?;

        let result = sqlx::query("DELETE FROM comments WHERE id=? AND idea_id=?")
            .bind(comment_id.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment not found".to_owned()));
        }

        self.get_idea(id).await
    }
}
