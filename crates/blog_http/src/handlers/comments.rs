use crate::dto::{AuthorQuery, StatusMessage};
use crate::error::ApiError;
use crate::session::SessionFactory;
use actix_web::{web, HttpResponse};
use blog_core::{CommentUpdate, EntityId, EntityKind, NewComment};

/// `POST /comments?author_id={id}` with `{content, post_id}`.
pub async fn create_comment(
    sessions: web::Data<SessionFactory>,
    query: web::Query<AuthorQuery>,
    body: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let author_id = query.author_id;
    let input = body.into_inner();
    let comment = sessions
        .run(move |store| store.create_comment(input, author_id))
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

pub async fn get_comment(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let comment = sessions.run(move |store| store.get_comment(id)).await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn update_comment(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
    body: web::Json<CommentUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let update = body.into_inner();
    let comment = sessions
        .run(move |store| store.update_comment(id, update))
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sessions.run(move |store| store.delete_comment(id)).await?;
    Ok(HttpResponse::Ok().json(StatusMessage::deleted(EntityKind::Comment)))
}
