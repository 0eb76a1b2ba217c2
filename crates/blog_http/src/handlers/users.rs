use crate::dto::StatusMessage;
use crate::error::ApiError;
use crate::session::SessionFactory;
use actix_web::{web, HttpResponse};
use blog_core::{EntityId, EntityKind, NewUser, UserUpdate};

/// `POST /users` → 201 with the user (no password).
pub async fn create_user(
    sessions: web::Data<SessionFactory>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let user = sessions.run(move |store| store.create_user(input)).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn get_user(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let user = sessions.run(move |store| store.get_user(id)).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// `PATCH /users/{id}`: only fields present in the body change.
pub async fn update_user(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
    body: web::Json<UserUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let update = body.into_inner();
    let user = sessions
        .run(move |store| store.update_user(id, update))
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// `DELETE /users/{id}` cascades to the user's posts and comments.
pub async fn delete_user(
    sessions: web::Data<SessionFactory>,
    path: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sessions.run(move |store| store.delete_user(id)).await?;
    Ok(HttpResponse::Ok().json(StatusMessage::deleted(EntityKind::User)))
}
