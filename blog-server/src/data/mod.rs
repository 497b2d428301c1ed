pub mod memory;
pub mod post_repository;
pub mod user_repository;
