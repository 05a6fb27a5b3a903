//! `ua-catalog`: the static agent catalog and the group-scoped lookups
//! over it.
//!
//! - [`slug`] maps group names to URL segments and back.
//! - [`loader`] parses and validates a catalog document (built-in or from
//!   disk) into an immutable [`Catalog`].
//! - [`AgentQueryService`] answers every visibility question the HTTP
//!   layer asks.

pub mod catalog;
pub mod loader;
pub mod query;
pub mod slug;
pub mod types;

pub use catalog::Catalog;
pub use loader::{load_builtin, load_catalog, load_from_path, CatalogSource};
pub use query::AgentQueryService;
pub use types::{AgentRecord, CatalogDocument, GroupEntry};
