pub use super::administrators::Entity as Administrators;
pub use super::airline_companies::Entity as AirlineCompanies;
pub use super::airports::Entity as Airports;
pub use super::countries::Entity as Countries;
pub use super::customers::Entity as Customers;
pub use super::flights::Entity as Flights;
pub use super::tickets::Entity as Tickets;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
