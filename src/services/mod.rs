pub mod catalog;
pub mod booking;

pub use booking::{BookingError, BookingService};
pub use catalog::{Catalog, CatalogBuilder, CatalogError, LoadSummary};
