pub mod auth;
pub mod health;
pub mod items;
pub mod lists;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::{auth::AuthMiddleware, error::AppError};

/// Body returned by create endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i32,
}

/// Body returned by collection endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// Body returned by update and delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("invalid input body: {}", err)).into()
}

fn path_error(_err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest("invalid id param".into()).into()
}

/// Registers the public `/auth` routes and the token-guarded `/api` routes.
///
/// Expects `PgPool`, `Passwords` and `TokenService` to be registered as `web::Data`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/auth")
                .service(auth::sign_up)
                .service(auth::sign_in),
        )
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(
                    web::scope("/lists")
                        .service(lists::create_list)
                        .service(lists::get_lists)
                        .service(lists::get_list)
                        .service(lists::update_list)
                        .service(lists::delete_list)
                        .service(items::create_item)
                        .service(items::get_items),
                )
                .service(
                    web::scope("/items")
                        .service(items::get_item)
                        .service(items::update_item)
                        .service(items::delete_item),
                ),
        );
}
