use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated subject (the account email) from request
/// extensions.
///
/// Intended for routes protected by `AuthMiddleware`, which validates the JWT
/// and inserts the decoded claims. Handlers still resolve the subject to a
/// `User` row; an account that vanished after token issuance is treated as
/// unauthorized, not as an internal error.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject(pub String);

impl FromRequest for AuthenticatedSubject {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedSubject(claims.sub))),
            None => {
                // Only reachable when AuthMiddleware was not applied to the
                // route; responding with Unauthorized is the safe default.
                let err = AppError::Unauthorized(
                    "Subject not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_authenticated_subject_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims {
            sub: "a@x.com".to_string(),
            exp: 2_000_000_000,
        });

        let mut payload = Payload::None;
        let extracted = AuthenticatedSubject::from_request(&req, &mut payload).await;
        assert!(extracted.is_ok());
        assert_eq!(extracted.unwrap().0, "a@x.com");
    }

    #[actix_rt::test]
    async fn test_authenticated_subject_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let extracted = AuthenticatedSubject::from_request(&req, &mut payload).await;
        assert!(extracted.is_err());

        let err = extracted.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
