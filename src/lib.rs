//! Taxa: Category Taxonomy Store and Resolver
//!
//! An immutable, variable-depth classification forest for retail catalogs,
//! with pure resolver functions for breadcrumb/sibling navigation, reverse
//! reconstruction of persisted flat category values, and cascading category
//! selection state.

pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod taxonomy;
pub mod tooling;
pub mod types;
