use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{ListInput, UpdateListInput},
    repository::lists,
    routes::{DataResponse, IdResponse, StatusResponse},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a list owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: `{"id": ...}`
/// - `401 Unauthorized`, `422 Unprocessable Entity`, `500 Internal Server Error`
#[post("")]
pub async fn create_list(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    input: web::Json<ListInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let id = lists::create_list(&pool, user.0, &input).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

/// Lists every list the authenticated user owns, as `{"data": [...]}`.
#[get("")]
pub async fn get_lists(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let data = lists::get_lists(&pool, user.0).await?;
    Ok(HttpResponse::Ok().json(DataResponse { data }))
}

#[get("/{id}")]
pub async fn get_list(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    list_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let list = lists::get_list(&pool, user.0, list_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Partially updates a list. A body with no fields is rejected with `400`.
#[put("/{id}")]
pub async fn update_list(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    list_id: web::Path<i32>,
    input: web::Json<UpdateListInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    lists::update_list(&pool, user.0, list_id.into_inner(), input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

#[delete("/{id}")]
pub async fn delete_list(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    list_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    lists::delete_list(&pool, user.0, list_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
