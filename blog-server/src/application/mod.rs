pub mod auth_service;
pub mod post_access;
pub mod post_service;
