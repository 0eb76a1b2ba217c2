use blog_core::db::open_db_in_memory;
use blog_core::{
    CommentUpdate, EntityKind, EntityStore, NewComment, NewPost, NewUser, PostUpdate, StoreError,
    User,
};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

fn seed_user(store: &mut EntityStore<'_>, username: &str) -> User {
    store
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "pw".to_string(),
        })
        .unwrap()
}

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: format!("{title} body"),
    }
}

#[test]
fn post_create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");

    let created = store.create_post(new_post("Engines"), author.id).unwrap();
    let loaded = store.get_post(created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.title, "Engines");
    assert_eq!(loaded.content, "Engines body");
    assert_eq!(loaded.author_id, author.id);
    assert!(loaded.created_at > 0);
}

#[test]
fn post_with_unknown_author_is_rejected_without_insert() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);

    let ghost = Uuid::new_v4();
    let err = store.create_post(new_post("Orphan"), ghost).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { kind: EntityKind::User, id } if id == ghost
    ));

    drop(store);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn post_title_over_limit_is_validation_error() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");

    let err = store
        .create_post(new_post(&"t".repeat(256)), author.id)
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn post_partial_update_keeps_absent_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");
    let post = store.create_post(new_post("Draft"), author.id).unwrap();

    let updated = store
        .update_post(
            post.id,
            PostUpdate {
                content: Some("final body".to_string()),
                ..PostUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.content, "final body");
    assert_eq!(updated.created_at, post.created_at);
    assert_eq!(updated.author_id, author.id);
    assert_eq!(store.get_post(post.id).unwrap(), updated);
}

#[test]
fn unknown_post_is_not_found_for_get_update_delete() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        store.get_post(missing),
        Err(StoreError::NotFound { kind: EntityKind::Post, .. })
    ));
    assert!(matches!(
        store.update_post(missing, PostUpdate::default()),
        Err(StoreError::NotFound { kind: EntityKind::Post, .. })
    ));
    assert!(matches!(
        store.delete_post(missing),
        Err(StoreError::NotFound { kind: EntityKind::Post, .. })
    ));
}

#[test]
fn comment_create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");
    let reader = seed_user(&mut store, "grace");
    let post = store.create_post(new_post("Engines"), author.id).unwrap();

    let created = store
        .create_comment(
            NewComment {
                content: "Great read".to_string(),
                post_id: post.id,
            },
            reader.id,
        )
        .unwrap();
    let loaded = store.get_comment(created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.content, "Great read");
    assert_eq!(loaded.post_id, post.id);
    assert_eq!(loaded.author_id, reader.id);
}

#[test]
fn comment_requires_existing_post_and_author() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");
    let post = store.create_post(new_post("Engines"), author.id).unwrap();

    let missing_post = Uuid::new_v4();
    let err = store
        .create_comment(
            NewComment {
                content: "hello".to_string(),
                post_id: missing_post,
            },
            author.id,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { kind: EntityKind::Post, id } if id == missing_post
    ));

    let missing_author = Uuid::new_v4();
    let err = store
        .create_comment(
            NewComment {
                content: "hello".to_string(),
                post_id: post.id,
            },
            missing_author,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { kind: EntityKind::User, id } if id == missing_author
    ));
}

#[test]
fn comment_update_and_delete() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");
    let post = store.create_post(new_post("Engines"), author.id).unwrap();
    let comment = store
        .create_comment(
            NewComment {
                content: "first".to_string(),
                post_id: post.id,
            },
            author.id,
        )
        .unwrap();

    let untouched = store
        .update_comment(comment.id, CommentUpdate::default())
        .unwrap();
    assert_eq!(untouched, comment);

    let edited = store
        .update_comment(
            comment.id,
            CommentUpdate {
                content: Some("edited".to_string()),
            },
        )
        .unwrap();
    assert_eq!(edited.content, "edited");
    assert_eq!(edited.created_at, comment.created_at);

    let report = store.delete_comment(comment.id).unwrap();
    assert_eq!(report.comments_removed, 1);
    assert!(matches!(
        store.get_comment(comment.id),
        Err(StoreError::NotFound { kind: EntityKind::Comment, .. })
    ));
    assert!(matches!(
        store.delete_comment(comment.id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn created_at_has_millisecond_resolution() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = EntityStore::new(&mut conn);
    let author = seed_user(&mut store, "ada");

    let before = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;
    let first = store.create_post(new_post("First"), author.id).unwrap();
    thread::sleep(Duration::from_millis(25));
    let second = store.create_post(new_post("Second"), author.id).unwrap();
    thread::sleep(Duration::from_millis(25));
    let comment = store
        .create_comment(
            NewComment {
                content: "reply".to_string(),
                post_id: second.id,
            },
            author.id,
        )
        .unwrap();

    assert!((first.created_at - before).abs() < 5_000);
    assert!(second.created_at > first.created_at);
    assert!(comment.created_at > second.created_at);
}
