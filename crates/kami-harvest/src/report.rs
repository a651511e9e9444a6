//! Farming report assembly and the calculator facade.
//!
//! [`build_report`] runs the whole pipeline for one snapshot:
//!
//! 1. aggregate skill bonuses and summarize skill investment
//! 2. resolve final stats
//! 3. resolve the target node and compute the affinity multiplier
//! 4. project the harvest yield and output for the duration
//! 5. repeat the projection for every node affinity
//! 6. compute health and stamina regeneration
//!
//! [`FarmingCalculator`] owns the catalog, node directory and config, and
//! fetches snapshots through a [`SnapshotSource`].

use std::sync::Arc;

use kami_skills::{CatalogOptions, SharedCatalog, SkillCatalog, aggregate, summarize};
use kami_types::{CreatureRef, FarmingReport, KamiSnapshot, NodeIndex, StaminaSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::affinity::{TraitAffinities, creature_breakdown, fertility_fraction};
use crate::config::HarvestConfig;
use crate::error::{HarvestError, SourceError};
use crate::harvest::{affinity_table, compute_yield, projected_output};
use crate::nodes::NodeDirectory;
use crate::regen::compute_regeneration;
use crate::stats::resolve_final_stats;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One farming calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmingRequest {
    /// The creature.
    pub kami: CreatureRef,
    /// Target node; neutral affinity when absent or unknown.
    #[serde(default)]
    pub node: Option<NodeIndex>,
    /// Projection duration; the configured default when absent.
    #[serde(default)]
    pub duration_secs: Option<u64>,
    /// Live stamina; overrides the snapshot's and the configured placeholder.
    #[serde(default)]
    pub stamina: Option<StaminaSnapshot>,
}

impl FarmingRequest {
    /// A request for a creature with every option defaulted.
    pub const fn new(kami: CreatureRef) -> Self {
        Self {
            kami,
            node: None,
            duration_secs: None,
            stamina: None,
        }
    }

    /// Target a node.
    #[must_use]
    pub const fn with_node(mut self, node: NodeIndex) -> Self {
        self.node = Some(node);
        self
    }

    /// Project over `secs` seconds.
    #[must_use]
    pub const fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Use a live stamina reading.
    #[must_use]
    pub const fn with_stamina(mut self, stamina: StaminaSnapshot) -> Self {
        self.stamina = Some(stamina);
        self
    }
}

// ---------------------------------------------------------------------------
// Snapshot source
// ---------------------------------------------------------------------------

/// A source of creature snapshots.
///
/// Implemented by the chain-reading collaborator. The calculator calls
/// [`fetch`](SnapshotSource::fetch) once per request and never caches the
/// result.
pub trait SnapshotSource {
    /// Fetch the current snapshot of a creature.
    fn fetch(&self, kami: &CreatureRef) -> Result<KamiSnapshot, SourceError>;
}

/// A snapshot source backed by an in-memory list.
///
/// Useful for tests and for replaying recorded snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshotSource {
    snapshots: Vec<KamiSnapshot>,
}

impl StaticSnapshotSource {
    /// Create an empty source.
    pub const fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Add a snapshot, replacing any with the same index.
    pub fn insert(&mut self, snapshot: KamiSnapshot) {
        self.snapshots.retain(|s| s.index != snapshot.index);
        self.snapshots.push(snapshot);
    }
}

impl FromIterator<KamiSnapshot> for StaticSnapshotSource {
    fn from_iter<I: IntoIterator<Item = KamiSnapshot>>(iter: I) -> Self {
        let mut source = Self::new();
        for snapshot in iter {
            source.insert(snapshot);
        }
        source
    }
}

impl SnapshotSource for StaticSnapshotSource {
    fn fetch(&self, kami: &CreatureRef) -> Result<KamiSnapshot, SourceError> {
        self.snapshots
            .iter()
            .find(|s| match kami {
                CreatureRef::ByIndex(index) => s.index == *index,
                CreatureRef::ByEntityId(id) => s.entity_id == *id,
            })
            .cloned()
            .ok_or(SourceError::NotFound(*kami))
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full stat and harvest pipeline for one snapshot.
pub fn build_report(
    catalog: &SkillCatalog,
    nodes: &NodeDirectory,
    snapshot: KamiSnapshot,
    node: Option<NodeIndex>,
    duration_secs: u64,
    stamina: StaminaSnapshot,
) -> FarmingReport {
    let bonuses = aggregate(catalog, &snapshot.skills);
    let skills = summarize(catalog, &snapshot.skills);
    let final_stats = resolve_final_stats(&snapshot.stats, &bonuses);

    let traits = TraitAffinities::from_traits(&snapshot.traits);
    let node_info = node.and_then(|index| nodes.resolve(index)).cloned();
    let affinity = creature_breakdown(
        traits,
        node_info.as_ref().map(|info| info.affinity),
        fertility_fraction(&bonuses),
    );

    let harvest = compute_yield(final_stats.power, affinity.total, &bonuses, duration_secs);
    let estimated_output = projected_output(&harvest, duration_secs);
    let by_affinity = affinity_table(final_stats.power, traits, &bonuses, duration_secs);

    let regeneration = compute_regeneration(
        final_stats.harmony,
        Decimal::from(snapshot.stats.health.base),
        final_stats.health,
        stamina,
    );

    debug!(
        kami = %snapshot.index,
        node = ?node_info.as_ref().map(|n| n.index),
        duration_secs,
        power = %final_stats.power,
        rate = %harvest.total_rate_per_hour,
        output = %estimated_output,
        "Farming report computed"
    );

    FarmingReport {
        kami: snapshot,
        final_stats,
        skills,
        bonuses,
        node: node_info,
        duration_secs,
        affinity,
        harvest,
        estimated_output,
        by_affinity,
        regeneration,
    }
}

// ---------------------------------------------------------------------------
// FarmingCalculator
// ---------------------------------------------------------------------------

/// Stateless-per-request farming calculator.
///
/// Cheap to share: the catalog sits behind a [`SharedCatalog`], so
/// [`reload_catalog`](Self::reload_catalog) swaps it for every clone.
#[derive(Debug, Clone)]
pub struct FarmingCalculator {
    catalog: SharedCatalog,
    nodes: NodeDirectory,
    config: HarvestConfig,
}

impl FarmingCalculator {
    /// Assemble a calculator from prepared parts.
    pub const fn new(catalog: SharedCatalog, nodes: NodeDirectory, config: HarvestConfig) -> Self {
        Self {
            catalog,
            nodes,
            config,
        }
    }

    /// Build the catalog and node directory the config describes.
    pub fn from_config(config: HarvestConfig) -> Result<Self, HarvestError> {
        let catalog = load_catalog(&config)?;
        let mut nodes = NodeDirectory::builtin()?;
        nodes.extend(config.nodes.iter().cloned());

        info!(
            skills = catalog.len(),
            nodes = nodes.len(),
            default_duration_secs = config.harvest.default_duration_secs,
            "Farming calculator ready"
        );

        Ok(Self::new(SharedCatalog::new(catalog), nodes, config))
    }

    /// Re-read the configured catalog and swap it in.
    ///
    /// On error the current catalog stays in place.
    pub fn reload_catalog(&self) -> Result<Arc<SkillCatalog>, HarvestError> {
        let catalog = load_catalog(&self.config)?;
        self.catalog.replace(catalog);
        Ok(self.catalog.current())
    }

    /// The shared catalog handle.
    pub const fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// The node directory.
    pub const fn nodes(&self) -> &NodeDirectory {
        &self.nodes
    }

    /// The active configuration.
    pub const fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Fetch a snapshot and build its report.
    pub fn calculate<S>(
        &self,
        source: &S,
        request: &FarmingRequest,
    ) -> Result<FarmingReport, HarvestError>
    where
        S: SnapshotSource + ?Sized,
    {
        let snapshot = source.fetch(&request.kami)?;
        Ok(self.report(snapshot, request))
    }

    /// Build a report from an already-fetched snapshot.
    ///
    /// Stamina comes from the request, then the snapshot, then the
    /// configured placeholder.
    pub fn report(&self, snapshot: KamiSnapshot, request: &FarmingRequest) -> FarmingReport {
        let duration_secs = request
            .duration_secs
            .unwrap_or(self.config.harvest.default_duration_secs);
        let stamina = request
            .stamina
            .or(snapshot.stamina)
            .unwrap_or_else(|| self.config.regeneration.stamina());
        let catalog = self.catalog.current();
        build_report(
            &catalog,
            &self.nodes,
            snapshot,
            request.node,
            duration_secs,
            stamina,
        )
    }
}

/// Build the catalog named by the config, or the built-in table.
fn load_catalog(config: &HarvestConfig) -> Result<SkillCatalog, HarvestError> {
    let options = CatalogOptions {
        strict: config.skills.strict,
    };
    let catalog = match &config.skills.catalog_path {
        Some(path) => SkillCatalog::from_file(path, options)?,
        None => SkillCatalog::from_yaml(kami_skills::BUILTIN_CATALOG_YAML, options)?,
    };
    Ok(catalog)
}
