//! Shared type definitions for the Kamigotchi stat and harvest engine.
//!
//! This crate is the single source of truth for the data that flows
//! through the engine: the chain snapshot going in and the report coming
//! out. Types flow downstream to `TypeScript` via `ts-rs` for the
//! dashboard frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Creature, skill and node identifiers, and [`CreatureRef`]
//! - [`enums`] -- Skill trees, attributes, affinities, bonus keys and units
//! - [`structs`] -- Stat blocks, snapshots, bonus vectors and report structs

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Affinity, AffinityMatch, Attribute, BonusKind, BonusUnit, SkillTree, TraitCategory,
};
pub use ids::{
    CreatureRef, INDEX_THRESHOLD, IdParseError, KamiEntityId, KamiIndex, NodeIndex, SkillIndex,
};
pub use structs::{
    AffinityBreakdown, AffinityHarvestEstimate, AggregatedBonuses, BonusTotal, FarmingReport,
    FinalStats, HarvestYield, KamiSnapshot, NodeInfo, ParsedBonus, Regeneration,
    SkillBreakdownEntry, SkillState, SkillSummary, StaminaSnapshot, Stat, StatBlock,
    TraitClassification, TraitSet,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the dashboard.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::KamiIndex::export_all();
        let _ = crate::ids::SkillIndex::export_all();
        let _ = crate::ids::NodeIndex::export_all();

        // Enums
        let _ = crate::enums::SkillTree::export_all();
        let _ = crate::enums::Attribute::export_all();
        let _ = crate::enums::TraitCategory::export_all();
        let _ = crate::enums::Affinity::export_all();
        let _ = crate::enums::AffinityMatch::export_all();
        let _ = crate::enums::BonusUnit::export_all();

        // Structs
        let _ = crate::structs::Stat::export_all();
        let _ = crate::structs::StatBlock::export_all();
        let _ = crate::structs::FinalStats::export_all();
        let _ = crate::structs::SkillState::export_all();
        let _ = crate::structs::TraitClassification::export_all();
        let _ = crate::structs::TraitSet::export_all();
        let _ = crate::structs::StaminaSnapshot::export_all();
        let _ = crate::structs::KamiSnapshot::export_all();
        let _ = crate::structs::NodeInfo::export_all();
        let _ = crate::structs::ParsedBonus::export_all();
        let _ = crate::structs::BonusTotal::export_all();
        let _ = crate::structs::AggregatedBonuses::export_all();
        let _ = crate::structs::SkillBreakdownEntry::export_all();
        let _ = crate::structs::SkillSummary::export_all();
        let _ = crate::structs::AffinityBreakdown::export_all();
        let _ = crate::structs::HarvestYield::export_all();
        let _ = crate::structs::AffinityHarvestEstimate::export_all();
        let _ = crate::structs::Regeneration::export_all();
        let _ = crate::structs::FarmingReport::export_all();
    }
}
