use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use ideashare::{
    store::{Comment, CommentAuthor, Idea, IdeaAuthor, IdeaChanges, SqliteStore, Store, User},
    AppError,
};

async fn store() -> SqliteStore {
    // One connection, or each pooled connection would see its own :memory: db.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::new(pool);
    store.init().await.unwrap();
    store
}

fn sample_idea(title: &str) -> Idea {
    let now = Utc::now();
    Idea {
        id: Uuid::now_v7(),
        title: title.to_owned(),
        description: "a description".to_owned(),
        category: "Other".to_owned(),
        author: IdeaAuthor {
            id: Uuid::now_v7().to_string(),
            name: "a".to_owned(),
            email: "a@b.com".to_owned(),
        },
        likes: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        name: "Ada".to_owned(),
        email: email.to_owned(),
        password_hash: "$2b$12$fakefakefakefakefakefake".to_owned(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn users_are_unique_by_email() {
    let store = store().await;
    store.create_user(&sample_user("ada@example.com")).await.unwrap();

    let err = store
        .create_user(&sample_user("ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let found = store
        .find_user_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Ada");
    assert_eq!(found.password_hash, "$2b$12$fakefakefakefakefakefake");
    assert!(store
        .find_user_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
    assert_eq!(store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn idea_roundtrip_and_ordering() {
    let store = store().await;

    let mut ideas = Vec::new();
    for title in ["first", "second", "third"] {
        let idea = sample_idea(title);
        store.create_idea(&idea).await.unwrap();
        ideas.push(idea);
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let fetched = store.get_idea(ideas[0].id).await.unwrap();
    assert_eq!(fetched.title, "first");
    assert_eq!(fetched.author.email, "a@b.com");
    assert!(fetched.likes.is_empty());
    assert!(fetched.comments.is_empty());

    let listed = store.list_ideas().await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn toggle_like_is_a_set_membership_flip() {
    let store = store().await;
    let idea = sample_idea("X");
    store.create_idea(&idea).await.unwrap();

    let after = store.toggle_like(idea.id, "u1").await.unwrap();
    assert_eq!(after.likes, vec!["u1"]);

    let after = store.toggle_like(idea.id, "u2").await.unwrap();
    assert_eq!(after.likes, vec!["u1", "u2"]);

    let after = store.toggle_like(idea.id, "u1").await.unwrap();
    assert_eq!(after.likes, vec!["u2"]);

    let err = store.toggle_like(Uuid::nil(), "u1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_keeps_unspecified_fields() {
    let store = store().await;
    let idea = sample_idea("before");
    store.create_idea(&idea).await.unwrap();

    let updated = store
        .update_idea(
            idea.id,
            IdeaChanges {
                title: Some("after".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "after");
    assert_eq!(updated.description, "a description");
    assert!(updated.updated_at >= idea.updated_at);

    let err = store
        .update_idea(Uuid::nil(), IdeaChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn comments_preserve_insertion_order() {
    let store = store().await;
    let idea = sample_idea("X");
    store.create_idea(&idea).await.unwrap();

    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        let comment = Comment {
            id: Uuid::now_v7(),
            text: text.to_owned(),
            author: CommentAuthor {
                name: "Ada".to_owned(),
                email: None,
            },
            created_at: Utc::now(),
        };
        store.add_comment(idea.id, &comment).await.unwrap();
        ids.push(comment.id);
    }

    let after = store.delete_comment(idea.id, ids[1]).await.unwrap();
    let texts: Vec<&str> = after.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["one", "three"]);

    let err = store.delete_comment(idea.id, ids[1]).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(store.get_idea(idea.id).await.unwrap().comments.len(), 2);
}

#[tokio::test]
async fn delete_idea_clears_embedded_rows() {
    let store = store().await;
    let idea = sample_idea("X");
    store.create_idea(&idea).await.unwrap();
    store.toggle_like(idea.id, "u1").await.unwrap();

    store.delete_idea(idea.id).await.unwrap();
    let err = store.get_idea(idea.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = store.delete_idea(idea.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
