use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use super::extractors::AuthenticatedUserId;
use super::token::TokenService;
use crate::error::AppError;

/// Extracts the token from a header of the exact form `Bearer <token>`.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Resolves the `Authorization` header to a verified user id.
///
/// Missing or malformed headers and every token verification failure end up as the
/// same `Unauthorized` outcome.
pub fn authenticate(tokens: &TokenService, auth_header: Option<&str>) -> Result<i32, AppError> {
    let value = auth_header.ok_or_else(|| AppError::Unauthorized("empty auth header".into()))?;
    let token =
        parse_bearer(value).ok_or_else(|| AppError::Unauthorized("invalid auth header".into()))?;

    tokens.verify(token).map_err(|e| {
        log::debug!("rejected session token: {}", e);
        AppError::from(e)
    })
}

/// Guards a scope: every request must carry a valid session token.
///
/// The resolved user id is stored in the request extensions for `AuthenticatedUserId`
/// and lives only as long as that request.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(tokens) = req.app_data::<web::Data<TokenService>>().cloned() else {
            let app_err = AppError::InternalServerError("token service not configured".into());
            return Box::pin(async move { Err(app_err.into()) });
        };

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match authenticate(&tokens, auth_header) {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUserId(user_id));
                Box::pin(self.service.call(req))
            }
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}
