pub mod dashboard;
pub mod deactivate_user;
pub mod delete_post;
pub mod list_posts;
pub mod list_users;
pub mod update_post;
pub mod update_user;
