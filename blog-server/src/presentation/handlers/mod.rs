use actix_web::web;

pub mod auth;
pub mod blog;
pub mod post;

/// Registers every route. `/post/new` must precede `/post/{id}`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(blog::home)
        .service(blog::user_posts)
        .service(post::new_post_form)
        .service(post::create_post)
        .service(blog::post_detail)
        .service(post::update_post_form)
        .service(post::update_post)
        .service(post::delete_post_confirm)
        .service(post::delete_post)
        .service(blog::about)
        .configure(auth::configure);
}
