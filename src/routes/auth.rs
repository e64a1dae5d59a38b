use crate::{
    auth::{register, verify_credentials, Passwords, TokenService},
    error::AppError,
    models::{SignInInput, SignInResponse, SignUpInput, SignUpResponse},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Returns `{"id": ...}`. A taken username is reported as `409 Conflict`.
#[post("/sign-up")]
pub async fn sign_up(
    pool: web::Data<PgPool>,
    passwords: web::Data<Passwords>,
    input: web::Json<SignUpInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let id = register(
        &pool,
        &passwords,
        &input.username,
        &input.name,
        &input.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(SignUpResponse { id }))
}

/// Login user
///
/// Verifies the credentials and returns `{"token": ...}` for use as `Bearer <token>`.
#[post("/sign-in")]
pub async fn sign_in(
    pool: web::Data<PgPool>,
    passwords: web::Data<Passwords>,
    tokens: web::Data<TokenService>,
    input: web::Json<SignInInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let user_id = verify_credentials(&pool, &passwords, &input.username, &input.password).await?;
    let token = tokens.issue(user_id)?;

    Ok(HttpResponse::Ok().json(SignInResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    // Never connects: every request here is rejected before the database is touched.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap()
    }

    #[actix_rt::test]
    async fn test_sign_up_rejects_bad_input() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(Passwords::new(4).unwrap()))
                .app_data(web::Data::new(TokenService::new(
                    b"routes_test_secret",
                    chrono::Duration::hours(1),
                )))
                .configure(crate::routes::config),
        )
        .await;

        let cases = vec![
            (json!({ "username": "username" }), StatusCode::BAD_REQUEST),
            (
                json!({ "username": "bad name!", "name": "Name", "password": "p" }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                json!({ "username": "u1", "name": "", "password": "p" }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (payload, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/auth/sign-up")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "payload: {}", payload);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert!(body["message"].is_string());
        }
    }

    #[actix_rt::test]
    async fn test_sign_in_rejects_missing_password() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(Passwords::new(4).unwrap()))
                .app_data(web::Data::new(TokenService::new(
                    b"routes_test_secret",
                    chrono::Duration::hours(1),
                )))
                .configure(crate::routes::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(json!({ "username": "u1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
