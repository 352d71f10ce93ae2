pub mod flights;
pub mod ourairports;

pub use flights::{FlightOptions, find_flights};
pub use ourairports::{ImportError, ImportReport, ImportSummary, RowRejection};
