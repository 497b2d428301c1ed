use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::presentation::middleware::ACCESS_TOKEN_COOKIE;
use crate::presentation::utils::{FormBody, form_body};
use crate::presentation::views::{LOGIN_TEMPLATE, render};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page).service(login).service(register);
}

fn token_cookie(token: &str, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, token.to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl_seconds))
        .finish()
}

#[get("/login")]
async fn login_page() -> HttpResponse {
    render(LOGIN_TEMPLATE, json!({ "title": "Login" }))
}

#[post("/login")]
async fn login(
    service: web::Data<AuthService>,
    payload: FormBody<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = form_body(payload);
    let jwt = service.login(&payload.username, &payload.password).await?;
    let expires_in = service.keys().ttl_seconds();

    info!(username = %payload.username, "user logged in");

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(&jwt, expires_in))
        .json(AuthResponse {
            access_token: jwt,
            expires_in,
            token_type: "Bearer".to_string(),
            user: None,
        }))
}

#[post("/register")]
async fn register(
    service: web::Data<AuthService>,
    payload: FormBody<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = form_body(payload);
    let user = service
        .register(payload.username, payload.email, payload.password)
        .await?;
    let jwt = service.issue_token(&user.principal())?;
    let expires_in = service.keys().ttl_seconds();

    info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(HttpResponse::Created()
        .cookie(token_cookie(&jwt, expires_in))
        .json(AuthResponse {
            access_token: jwt,
            expires_in,
            token_type: "Bearer".to_string(),
            user: Some(user),
        }))
}
