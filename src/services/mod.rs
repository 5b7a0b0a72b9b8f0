//! Service layer: SQL and filesystem work behind the route handlers.

pub mod floor;
pub mod image;
pub mod room;
