//! Final stats, affinity, harvest yield, and regeneration for Kamigotchi
//! creatures.
//!
//! Everything here is a pure function of a creature snapshot, the skill
//! catalog and the node directory. Nothing blocks and nothing is cached
//! between requests; reports for different creatures can be computed in
//! parallel against the same shared catalog.
//!
//! # Modules
//!
//! - [`stats`] -- Final stats from chain stats plus flat skill bonuses.
//! - [`affinity`] -- Body/hand trait affinity multiplier against a node.
//! - [`harvest`] -- Intensity ramp, harvest rate, projected output, and the
//!   per-affinity estimate table.
//! - [`regen`] -- Health and stamina regeneration timing.
//! - [`nodes`] -- [`NodeDirectory`]: node names and name-based affinity.
//! - [`report`] -- [`build_report`] pipeline, [`FarmingCalculator`] facade,
//!   and the [`SnapshotSource`] seam to the chain reader.
//! - [`config`] -- [`HarvestConfig`] loaded from YAML with env overrides.
//! - [`telemetry`] -- `tracing` subscriber setup.
//! - [`error`] -- Error types for sources and the calculator.

pub mod affinity;
pub mod config;
pub mod error;
pub mod harvest;
pub mod nodes;
pub mod regen;
pub mod report;
pub mod stats;
pub mod telemetry;

// Re-export primary types at crate root.
pub use affinity::{
    TraitAffinities, affinity_bonus, affinity_breakdown, creature_breakdown, fertility_fraction,
};
pub use config::{ConfigError, HarvestConfig};
pub use error::{HarvestError, SourceError};
pub use harvest::{affinity_table, compute_yield, intensity_multiplier, projected_output};
pub use nodes::{NodeDirectory, classify_node_name};
pub use regen::compute_regeneration;
pub use report::{
    FarmingCalculator, FarmingRequest, SnapshotSource, StaticSnapshotSource, build_report,
};
pub use stats::resolve_final_stats;
pub use telemetry::init_tracing;
