//! Error types for the `kami-harvest` crate.
//!
//! The calculators themselves never fail. Errors come from the edges: the
//! snapshot source, catalog loading, configuration, and logger setup.

use kami_types::CreatureRef;

use crate::config::ConfigError;

/// Errors reported by a [`SnapshotSource`](crate::SnapshotSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source has no creature for this reference.
    #[error("creature not found: {0}")]
    NotFound(CreatureRef),

    /// The source failed to produce a snapshot.
    #[error("snapshot source error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

/// Top-level error for the farming calculator.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Fetching the creature snapshot failed.
    #[error("snapshot error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: SourceError,
    },

    /// Building the skill catalog failed.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: kami_skills::CatalogError,
    },

    /// Loading or validating configuration failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The global tracing subscriber could not be installed.
    #[error("telemetry error: {message}")]
    Telemetry {
        /// Description of the failure.
        message: String,
    },
}
