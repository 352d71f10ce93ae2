pub mod prelude;

pub mod administrators;
pub mod airline_companies;
pub mod airports;
pub mod countries;
pub mod customers;
pub mod flights;
pub mod tickets;
pub mod user_roles;
pub mod users;
