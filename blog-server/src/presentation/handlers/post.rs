use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::application::post_access::PostAccessController;
use crate::domain::error::DomainError;
use crate::domain::post::{PostForm, TITLE_MAX_CHARS};
use crate::domain::principal::Principal;
use crate::presentation::utils::{Submission, full_path, request_id, submitted};
use crate::presentation::views::{
    POST_CONFIRM_DELETE_TEMPLATE, POST_FORM_TEMPLATE, post_url, redirect, render,
};

fn login_next(req: &HttpRequest) -> impl FnOnce(DomainError) -> DomainError {
    let next = full_path(req);
    move |e| e.with_next(&next)
}

#[get("/post/new")]
async fn new_post_form(
    req: HttpRequest,
    principal: Option<Principal>,
) -> Result<HttpResponse, DomainError> {
    PostAccessController::require_login(principal.as_ref()).map_err(login_next(&req))?;
    Ok(render(
        POST_FORM_TEMPLATE,
        json!({
            "form": PostForm::default(),
            "title_max_chars": TITLE_MAX_CHARS,
        }),
    ))
}

#[post("/post/new")]
async fn create_post(
    req: HttpRequest,
    principal: Option<Principal>,
    posts: web::Data<PostAccessController>,
    payload: Submission<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .create(principal.as_ref(), submitted(payload))
        .await
        .map_err(login_next(&req))?;

    info!(
        request_id = %request_id(&req),
        username = %post.author,
        post_id = %post.id,
        "post created"
    );

    Ok(redirect(&post_url(post.id)))
}

#[get("/post/{id}/update")]
async fn update_post_form(
    req: HttpRequest,
    principal: Option<Principal>,
    posts: web::Data<PostAccessController>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .authorize(principal.as_ref(), path.into_inner())
        .await
        .map_err(login_next(&req))?;
    Ok(render(
        POST_FORM_TEMPLATE,
        json!({
            "form": PostForm::from(&post),
            "post": post,
            "title_max_chars": TITLE_MAX_CHARS,
        }),
    ))
}

#[post("/post/{id}/update")]
async fn update_post(
    req: HttpRequest,
    principal: Option<Principal>,
    posts: web::Data<PostAccessController>,
    path: web::Path<Uuid>,
    payload: Submission<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let post = posts
        .update(principal.as_ref(), post_id, submitted(payload))
        .await
        .map_err(login_next(&req))?;

    info!(
        request_id = %request_id(&req),
        username = %post.author,
        post_id = %post.id,
        "post updated"
    );

    Ok(redirect(&post_url(post.id)))
}

#[get("/post/{id}/delete")]
async fn delete_post_confirm(
    req: HttpRequest,
    principal: Option<Principal>,
    posts: web::Data<PostAccessController>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .authorize(principal.as_ref(), path.into_inner())
        .await
        .map_err(login_next(&req))?;
    Ok(render(POST_CONFIRM_DELETE_TEMPLATE, json!({ "post": post })))
}

#[post("/post/{id}/delete")]
async fn delete_post(
    req: HttpRequest,
    principal: Option<Principal>,
    posts: web::Data<PostAccessController>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    posts
        .delete(principal.as_ref(), post_id)
        .await
        .map_err(login_next(&req))?;

    info!(
        request_id = %request_id(&req),
        username = principal.as_ref().map(|p| p.username.as_str()).unwrap_or_default(),
        post_id = %post_id,
        "post deleted"
    );

    Ok(redirect("/"))
}
