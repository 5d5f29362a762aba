pub mod catalog;
pub mod query;
pub mod schema;

// Re-export main types for convenience
pub use catalog::introspect;
pub use query::{quote_ident, reference_exists};
pub use schema::{ForeignKeyTarget, TableSchema};
