pub mod error;
pub mod pagination;
pub mod post;
pub mod principal;
pub mod user;
