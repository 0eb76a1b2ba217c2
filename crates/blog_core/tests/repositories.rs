use blog_core::db::open_db_in_memory;
use blog_core::repo::comment_repo::{CommentRepository, SqliteCommentRepository};
use blog_core::repo::post_repo::{PostRepository, SqlitePostRepository};
use blog_core::repo::user_repo::{SqliteUserRepository, UserRepository};
use blog_core::{EntityKind, NewComment, NewPost, RepoError, StoreError, User};
use uuid::Uuid;

fn user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

#[test]
fn user_insert_get_update_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let mut ada = user("ada");
    repo.insert_user(&ada).unwrap();
    assert!(repo.user_exists(ada.id).unwrap());
    assert_eq!(repo.get_user(ada.id).unwrap(), Some(ada.clone()));

    ada.username = "lovelace".to_string();
    repo.update_user(&ada).unwrap();
    assert_eq!(repo.get_user(ada.id).unwrap().unwrap().username, "lovelace");

    assert_eq!(repo.delete_user(ada.id).unwrap(), 1);
    assert_eq!(repo.delete_user(ada.id).unwrap(), 0);
    assert!(repo.get_user(ada.id).unwrap().is_none());
}

#[test]
fn update_of_missing_row_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let ghost = user("ghost");
    let err = repo.update_user(&ghost).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { kind: EntityKind::User, id } if id == ghost.id
    ));
}

#[test]
fn duplicate_primary_key_maps_to_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let ada = user("ada");
    repo.insert_user(&ada).unwrap();
    let err = repo.insert_user(&ada).unwrap_err();
    assert!(err.is_unique_violation());
    assert!(matches!(StoreError::from(err), StoreError::Conflict(_)));
}

#[test]
fn corrupt_identifier_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    conn.execute(
        "INSERT INTO posts (uuid, title, content, author_uuid) VALUES (?1, 't', 'c', 'broken');",
        [Uuid::nil().to_string()],
    )
    .unwrap();

    let err = SqlitePostRepository::new(&conn)
        .get_post(Uuid::nil())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("posts.author_uuid")));
}

#[test]
fn bulk_comment_removal_targets_the_right_rows() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::new(&conn);
    let posts = SqlitePostRepository::new(&conn);
    let comments = SqliteCommentRepository::new(&conn);

    let ada = user("ada");
    let grace = user("grace");
    users.insert_user(&ada).unwrap();
    users.insert_user(&grace).unwrap();

    let ada_post = Uuid::new_v4();
    let grace_post = Uuid::new_v4();
    let input = NewPost {
        title: "t".to_string(),
        content: "c".to_string(),
    };
    posts.insert_post(ada_post, ada.id, &input).unwrap();
    posts.insert_post(grace_post, grace.id, &input).unwrap();

    let comment_on = |post_id: Uuid, author: &User| {
        comments
            .insert_comment(
                Uuid::new_v4(),
                author.id,
                &NewComment {
                    content: "c".to_string(),
                    post_id,
                },
            )
            .unwrap();
    };
    comment_on(ada_post, &grace);
    comment_on(ada_post, &ada);
    comment_on(grace_post, &ada);
    comment_on(grace_post, &grace);

    assert_eq!(comments.delete_comments_on_posts_by_author(ada.id).unwrap(), 2);
    assert_eq!(comments.delete_comments_by_author(ada.id).unwrap(), 1);
    assert_eq!(comments.delete_comments_by_post(grace_post).unwrap(), 1);
    assert_eq!(posts.delete_posts_by_author(ada.id).unwrap(), 1);
    assert!(posts.post_exists(grace_post).unwrap());
}
