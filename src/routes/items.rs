use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{ItemInput, UpdateItemInput},
    repository::{items, lists},
    routes::{DataResponse, IdResponse, StatusResponse},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Adds an item to a list the authenticated user owns.
///
/// ## Responses:
/// - `200 OK`: `{"id": ...}`
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[post("/{id}/items")]
pub async fn create_item(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    list_id: web::Path<i32>,
    input: web::Json<ItemInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let list_id = list_id.into_inner();

    lists::ensure_owned(&pool, user.0, list_id).await?;
    let id = items::create_item(&pool, list_id, &input).await?;

    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

/// Items of one owned list, as `{"data": [...]}`. An empty list returns `{"data": []}`.
#[get("/{id}/items")]
pub async fn get_items(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    list_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let data = items::get_items(&pool, user.0, list_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DataResponse { data }))
}

#[get("/{id}")]
pub async fn get_item(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    item_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let item = items::get_item(&pool, user.0, item_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Partially updates an item. Only `title`, `description` and `done` present in the
/// body are written.
#[put("/{id}")]
pub async fn update_item(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    item_id: web::Path<i32>,
    input: web::Json<UpdateItemInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    items::update_item(&pool, user.0, item_id.into_inner(), input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

#[delete("/{id}")]
pub async fn delete_item(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    item_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    items::delete_item(&pool, user.0, item_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
