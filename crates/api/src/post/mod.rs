pub mod categories;
pub mod like;
pub mod search;
