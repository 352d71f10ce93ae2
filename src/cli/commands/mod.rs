mod airports;
mod countries;
mod flights;
mod import;
mod init;
mod migrate;

pub use airports::cmd_search_airports;
pub use countries::cmd_list_countries;
pub use flights::cmd_search_flights;
pub use import::{cmd_import_airports, cmd_import_all, cmd_import_countries};
pub use init::cmd_init;
pub use migrate::cmd_migrate;
