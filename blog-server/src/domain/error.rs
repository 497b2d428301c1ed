use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Where anonymous requests to protected views are sent.
pub const LOGIN_URL: &str = "/login";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error("invalid form: {0}")]
    Validation(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("unauthorized")]
    Unauthorized,
    /// `Unauthorized` bound to the path the visitor should return to.
    #[error("login required for {0}")]
    LoginRequired(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Binds an `Unauthorized` failure to the request path so login can send
    /// the visitor back. Other errors pass through unchanged.
    pub fn with_next(self, next: &str) -> Self {
        match self {
            DomainError::Unauthorized => DomainError::LoginRequired(next.to_string()),
            other => other,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::UserNotFound(_)
            | DomainError::PostNotFound(_)
            | DomainError::PageNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Unauthorized | DomainError::LoginRequired(_) => StatusCode::FOUND,
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            DomainError::Unauthorized => {
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, LOGIN_URL))
                    .finish();
            }
            DomainError::LoginRequired(next) => {
                let location = format!("{LOGIN_URL}?next={}", urlencoding::encode(next));
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish();
            }
            _ => {}
        }

        let message = self.to_string();
        let details = match self {
            DomainError::PostNotFound(resource) => Some(json!({ "resource": resource })),
            DomainError::UserNotFound(username) => Some(json!({ "username": username })),
            DomainError::Forbidden => {
                Some(json!({ "message": "only the author of this post may change it" }))
            }
            _ => None,
        };
        let body = ErrorBody {
            error: if matches!(self, DomainError::Internal(_)) {
                "internal error"
            } else {
                message.as_str()
            },
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = DomainError::Unauthorized.error_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_URL
        );
    }

    #[test]
    fn login_redirect_carries_the_return_path() {
        let response = DomainError::Unauthorized
            .with_next("/post/new")
            .error_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fpost%2Fnew"
        );

        assert!(matches!(
            DomainError::Forbidden.with_next("/post/new"),
            DomainError::Forbidden
        ));
    }

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            DomainError::PostNotFound(Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::UserNotFound("ghost".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(DomainError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            DomainError::Validation("title".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
