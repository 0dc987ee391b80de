pub mod error;
pub mod settings;
pub mod utils;
pub mod version;
