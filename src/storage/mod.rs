//! Storage backends for the catalog

pub mod memory;

pub use memory::{Catalog, MemTable};
