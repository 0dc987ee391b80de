pub mod create;
pub mod list_posts;
pub mod read;
pub mod update;
