use actix_web::dev::Payload;
use actix_web::web::{Either, Form, Json};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::error::DomainError;
use crate::domain::principal::Principal;
use crate::presentation::middleware::RequestId;

/// Extracts the principal attached by `IdentityMiddleware`.
///
/// Take `Option<Principal>` in handlers that serve anonymous visitors too;
/// the access controller decides what an absent principal may do.
impl FromRequest for Principal {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(DomainError::Unauthorized.with_next(&full_path(req)))),
        }
    }
}

/// A body submitted either as JSON or as an urlencoded form.
pub type FormBody<T> = Either<Json<T>, Form<T>>;

pub fn form_body<T>(body: FormBody<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// A body whose parse failure is held until the handler asks for it.
pub type Submission<T> = Result<FormBody<T>, actix_web::Error>;

pub fn submitted<T>(body: Submission<T>) -> Result<T, DomainError> {
    body.map(form_body)
        .map_err(|e| DomainError::Validation(e.to_string()))
}

/// Path and query of the request, as sent in a login redirect's `next`.
pub fn full_path(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
