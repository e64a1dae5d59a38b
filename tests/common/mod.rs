#![allow(dead_code)]

use actix_web::http::header;
use actix_web::test;
use chrono::Duration;
use serde_json::json;
use sqlx::PgPool;
use todo_api::auth::{Passwords, TokenService};
use todo_api::models::{SignInResponse, SignUpInput, SignUpResponse};
use validator::Validate;

pub struct TestContext {
    pub pool: PgPool,
    pub passwords: Passwords,
    pub tokens: TokenService,
}

/// Connects to `DATABASE_URL` and bootstraps the schema.
/// Returns `None` (and the calling test returns early) when no database is configured.
pub async fn setup() -> Option<TestContext> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    todo_api::db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    Some(TestContext {
        pool,
        passwords: Passwords::new(4).expect("Failed to build password hasher"),
        tokens: TokenService::new(b"integration_test_secret", Duration::hours(1)),
    })
}

/// A username nobody else in the shared test database is using.
/// Stays within the sign-up length limit so the request passes validation.
pub fn unique_username(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let username = format!("{}_{}", prefix, &suffix[..12]);

    let input = SignUpInput {
        username: username.clone(),
        name: "Test Name".into(),
        password: "p".into(),
    };
    assert!(
        input.validate().is_ok(),
        "generated username {} fails sign-up validation",
        username
    );
    username
}

/// Builds the full application around a `TestContext`.
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.pool.clone()))
                .app_data(actix_web::web::Data::new($ctx.passwords.clone()))
                .app_data(actix_web::web::Data::new($ctx.tokens.clone()))
                .service(todo_api::routes::health::health)
                .configure(todo_api::routes::config),
        )
        .await
    };
}

pub async fn sign_up_and_in<S, B>(app: &S, username: &str, password: &str) -> (i32, String)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(json!({ "username": username, "name": "Test Name", "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "sign-up failed: {}", resp.status());
    let signed_up: SignUpResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "sign-in failed: {}", resp.status());
    let signed_in: SignInResponse = test::read_body_json(resp).await;

    (signed_up.id, signed_in.token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
