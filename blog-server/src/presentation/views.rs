use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::pagination::Page;
use crate::domain::post::Post;

pub const HOME_TEMPLATE: &str = "blog/home.html";
pub const USER_POSTS_TEMPLATE: &str = "blog/user_posts.html";
pub const POST_DETAIL_TEMPLATE: &str = "blog/post_detail.html";
pub const POST_FORM_TEMPLATE: &str = "blog/post_form.html";
pub const POST_CONFIRM_DELETE_TEMPLATE: &str = "blog/post_confirm_delete.html";
pub const ABOUT_TEMPLATE: &str = "blog/about.html";
pub const LOGIN_TEMPLATE: &str = "users/login.html";

/// A rendered view: the template name plus its context.
#[derive(Serialize)]
struct View<'a> {
    template: &'a str,
    #[serde(flatten)]
    context: Value,
}

pub fn render(template: &str, context: Value) -> HttpResponse {
    HttpResponse::Ok().json(View { template, context })
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn post_url(id: Uuid) -> String {
    format!("/post/{id}")
}

pub fn feed_context(page: &Page<Post>) -> Value {
    json!({
        "posts": page.items,
        "page_obj": page,
        "is_paginated": page.is_paginated(),
    })
}
