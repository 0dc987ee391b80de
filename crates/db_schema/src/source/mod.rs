pub mod category;
pub mod comment;
pub mod person;
pub mod post;
