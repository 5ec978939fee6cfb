//! Books module: reading log CRUD, search and filters

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
