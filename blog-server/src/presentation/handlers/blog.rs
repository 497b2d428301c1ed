use actix_web::{HttpRequest, HttpResponse, get, web};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::application::post_access::PostAccessController;
use crate::domain::error::DomainError;
use crate::domain::pagination::PageNumber;
use crate::presentation::dto::PageQuery;
use crate::presentation::utils::request_id;
use crate::presentation::views::{
    ABOUT_TEMPLATE, HOME_TEMPLATE, POST_DETAIL_TEMPLATE, USER_POSTS_TEMPLATE, feed_context,
    render,
};

#[get("/")]
async fn home(
    req: HttpRequest,
    posts: web::Data<PostAccessController>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let page = PageNumber::parse(query.page.as_deref())?;
    let page = posts.store().list_all(page).await?;

    debug!(
        request_id = %request_id(&req),
        page = page.number,
        "feed retrieved"
    );

    Ok(render(HOME_TEMPLATE, feed_context(&page)))
}

#[get("/user/{username}")]
async fn user_posts(
    req: HttpRequest,
    posts: web::Data<PostAccessController>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let username = path.into_inner();
    let page = PageNumber::parse(query.page.as_deref())?;
    let (user, page) = posts.store().list_by_author(&username, page).await?;

    debug!(
        request_id = %request_id(&req),
        username = %user.username,
        page = page.number,
        "author feed retrieved"
    );

    let mut context = feed_context(&page);
    context["username"] = json!(user.username);
    Ok(render(USER_POSTS_TEMPLATE, context))
}

#[get("/post/{id}")]
async fn post_detail(
    posts: web::Data<PostAccessController>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.store().get(path.into_inner()).await?;
    Ok(render(POST_DETAIL_TEMPLATE, json!({ "post": post })))
}

#[get("/about")]
async fn about() -> HttpResponse {
    render(ABOUT_TEMPLATE, json!({ "title": "About" }))
}
