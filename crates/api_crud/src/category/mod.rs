pub mod create;
pub mod delete;
pub mod list;
pub mod list_posts;
pub mod read;
pub mod update;
