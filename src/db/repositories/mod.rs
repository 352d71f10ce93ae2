//! Table-specific queries layered on top of [`crate::db::Repository`].

pub mod airports;
pub mod countries;
pub mod flights;
pub mod users;

pub use airports::AirportMatch;
