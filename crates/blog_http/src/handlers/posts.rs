use crate::dto::{AuthorQuery, StatusMessage};
use crate::error::ApiError;
use crate::session::SessionFactory;
use actix_web::{web, HttpResponse};
use blog_core::{EntityId, EntityKind, NewPost, PostUpdate};

/// `POST /posts?author_id={id}`; an unknown author is 404.
pub async fn create_post(
    sessions: web::Data<SessionFactory>,
    query: web::Query<AuthorQuery>,
    body: web::Json<NewPost>,
) -> Result<HttpResponse, ApiError> {
    let author_id = query.author_id;
    let input = body.into_inner();
    let post = sessions
        .run(move |store| store.create_post(input, author_id))
        .await?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn get_post(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let post = sessions.run(move |store| store.get_post(id)).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
    body: web::Json<PostUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let update = body.into_inner();
    let post = sessions
        .run(move |store| store.update_post(id, update))
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sessions.run(move |store| store.delete_post(id)).await?;
    Ok(HttpResponse::Ok().json(StatusMessage::deleted(EntityKind::Post)))
}
