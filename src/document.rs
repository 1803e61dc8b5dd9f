//! Catalog documents and corpus readers.

pub mod converter;
pub mod entry;

pub use entry::CatalogEntry;
