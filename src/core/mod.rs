//! Core module containing the shared contracts of the backend

pub mod entity;
pub mod envelope;
pub mod error;
pub mod events;
pub mod query;
pub mod slug;
pub mod validate;

pub use entity::{CatalogRecord, SortKey};
pub use envelope::ActionResult;
pub use error::{FeriaError, FeriaResult};
pub use events::{ListingBus, ListingEvent};
pub use query::{ListParams, Page, SortOrder};
