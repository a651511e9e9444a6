//! Skill catalog, bonus descriptor parsing, and bonus aggregation for
//! Kamigotchi creatures.
//!
//! Descriptors are parsed once, when the catalog is built. Per request, the
//! aggregator folds a creature's skill levels into an
//! [`AggregatedBonuses`](kami_types::AggregatedBonuses) vector and a
//! [`SkillSummary`](kami_types::SkillSummary).
//!
//! # Modules
//!
//! - [`bonus`] -- Descriptor parser and label normalization.
//! - [`catalog`] -- [`SkillCatalog`]: the validated, immutable skill table.
//! - [`aggregate`] -- Bonus aggregation and skill summaries.
//! - [`shared`] -- [`SharedCatalog`]: atomic catalog hot swap.
//! - [`error`] -- Catalog build errors.

pub mod aggregate;
pub mod bonus;
pub mod catalog;
pub mod error;
pub mod shared;

// Re-export primary types at crate root.
pub use aggregate::{aggregate, summarize};
pub use bonus::{normalize_label, parse_bonus};
pub use catalog::{
    BUILTIN_CATALOG_YAML, CatalogOptions, MAX_TIER, MIN_TIER, SkillCatalog, SkillDefinition,
    SkillEntry,
};
pub use error::CatalogError;
pub use shared::SharedCatalog;
