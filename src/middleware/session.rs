use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error::ErrorInternalServerError, web};
use chrono::{Duration, Utc};
use futures::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "townboard_session";

const SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: i64,
    iat: i64,
    exp: i64,
}

/// Seals and unseals the session cookie. Login lives in a separate service;
/// this side only needs to recognize the cookie that service sets, so
/// `seal` exists for that service and for tests.
#[derive(Clone)]
pub struct SessionConfig {
    secret: String,
}

impl SessionConfig {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn seal(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn unseal(&self, token: &str) -> Result<i64, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims.sub)
    }
}

/// The authenticated user attached to the request by the session cookie.
pub struct SessionUser {
    pub user_id: i64,
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<SessionUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<SessionConfig>>() else {
            return ready(Err(ErrorInternalServerError("session config missing")));
        };

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return ready(Err(ApiError::Unauthorized.into()));
        };

        match config.unseal(cookie.value()) {
            Ok(user_id) => ready(Ok(SessionUser { user_id })),
            Err(_) => ready(Err(ApiError::Unauthorized.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    fn config() -> SessionConfig {
        SessionConfig::new("test-secret".into())
    }

    #[test]
    fn seal_then_unseal_returns_the_user_id() {
        let config = config();
        let token = config.seal(7).unwrap();
        assert_eq!(config.unseal(&token).unwrap(), 7);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = config().seal(7).unwrap();
        let other = SessionConfig::new("other-secret".into());
        assert!(other.unseal(&token).is_err());
    }

    #[test]
    fn expired_session_is_rejected() {
        let config = config();
        let stale = SessionClaims {
            sub: 7,
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(config.unseal(&token).is_err());
    }

    #[actix_web::test]
    async fn extractor_attaches_the_session_user() {
        let config = config();
        let token = config.seal(42).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(config))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let user = SessionUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.user_id, 42);
    }

    #[actix_web::test]
    async fn missing_cookie_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(config()))
            .to_http_request();

        let result = SessionUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }
}
