//! Loading of card catalogs and server settings from `assets/`.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
