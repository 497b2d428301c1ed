use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::application::post_access::PostAccessController;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::{IdentityMiddleware, RequestIdMiddleware, TimingMiddleware};

pub async fn start_rest_server(
    config: AppConfig,
    auth_service: AuthService,
    posts: PostAccessController,
) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);
    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(Logger::default())
            .wrap(IdentityMiddleware::new(auth_service.keys().clone()))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(web::Data::new(posts.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .route("/health", web::get().to(health))
            .configure(handlers::routes)
    })
    .bind(bind_address)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
