#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_derive_newtype;

pub mod enums;
pub mod impls;
pub mod newtypes;
pub mod policy;
#[rustfmt::skip]
pub mod schema;
pub mod schema_setup;
pub mod sensitive;
pub mod source;
pub mod traits;
pub mod utils;
