//! Snapshot, bonus, and report structs.
//!
//! Inputs ([`KamiSnapshot`] and its parts) arrive pre-resolved from the
//! chain-reading collaborator. Outputs ([`FarmingReport`] and its parts) are
//! serialized to the dashboard; decimals render as strings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Affinity, AffinityMatch, Attribute, BonusKind, BonusUnit, SkillTree, TraitCategory,
};
use crate::ids::{KamiEntityId, KamiIndex, NodeIndex, SkillIndex};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// One attribute in the chain's four-component encoding.
///
/// `sync` is the chain's own current effective value; `base + shift + boost`
/// is its max-capacity expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stat {
    /// Base value rolled at mint.
    pub base: i32,
    /// Permanent shift from items and levels.
    pub shift: i32,
    /// Temporary boost.
    pub boost: i32,
    /// Chain-derived current value.
    pub sync: i32,
}

impl Stat {
    /// Build a stat whose only populated component is `sync`.
    pub const fn synced(sync: i32) -> Self {
        Self {
            base: 0,
            shift: 0,
            boost: 0,
            sync,
        }
    }
}

/// The four stat blocks of a creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatBlock {
    /// Health.
    pub health: Stat,
    /// Power.
    pub power: Stat,
    /// Harmony.
    pub harmony: Stat,
    /// Violence.
    pub violence: Stat,
}

impl StatBlock {
    /// Return the stat for an attribute.
    pub const fn get(&self, attribute: Attribute) -> &Stat {
        match attribute {
            Attribute::Health => &self.health,
            Attribute::Power => &self.power,
            Attribute::Harmony => &self.harmony,
            Attribute::Violence => &self.violence,
        }
    }
}

/// Effective stats after flat skill bonuses, floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FinalStats {
    /// Final health (max health).
    #[ts(as = "String")]
    pub health: Decimal,
    /// Final power.
    #[ts(as = "String")]
    pub power: Decimal,
    /// Final harmony.
    #[ts(as = "String")]
    pub harmony: Decimal,
    /// Final violence.
    #[ts(as = "String")]
    pub violence: Decimal,
}

impl FinalStats {
    /// Return the final value for an attribute.
    pub const fn get(&self, attribute: Attribute) -> Decimal {
        match attribute {
            Attribute::Health => self.health,
            Attribute::Power => self.power,
            Attribute::Harmony => self.harmony,
            Attribute::Violence => self.violence,
        }
    }

    /// Return a mutable slot for an attribute.
    pub const fn get_mut(&mut self, attribute: Attribute) -> &mut Decimal {
        match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Power => &mut self.power,
            Attribute::Harmony => &mut self.harmony,
            Attribute::Violence => &mut self.violence,
        }
    }
}

// ---------------------------------------------------------------------------
// Skills and traits
// ---------------------------------------------------------------------------

/// A skill a creature has invested points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillState {
    /// Catalog index.
    pub skill_index: SkillIndex,
    /// Points invested; zero means not unlocked.
    pub level: u32,
}

impl SkillState {
    /// Create a skill state.
    pub const fn new(skill_index: u32, level: u32) -> Self {
        Self {
            skill_index: SkillIndex(skill_index),
            level,
        }
    }

    /// Whether the skill contributes (`level > 0`).
    pub const fn is_active(&self) -> bool {
        self.level > 0
    }
}

/// A trait as classified by the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitClassification {
    /// Slot the trait occupies.
    pub category: TraitCategory,
    /// Display name, when known.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw type string: `"NORMAL"` or an affinity name.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TraitClassification {
    /// Create a classification.
    pub fn new(category: TraitCategory, type_name: &str) -> Self {
        Self {
            category,
            name: None,
            type_name: type_name.to_owned(),
        }
    }

    /// The trait's affinity, or `None` when the type string is unrecognised.
    pub fn affinity(&self) -> Option<Affinity> {
        Affinity::parse_lenient(&self.type_name)
    }
}

/// The creature's trait slots; any may be missing from a partial snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitSet {
    /// Body trait.
    #[serde(default)]
    pub body: Option<TraitClassification>,
    /// Hand trait.
    #[serde(default)]
    pub hand: Option<TraitClassification>,
    /// Face trait.
    #[serde(default)]
    pub face: Option<TraitClassification>,
    /// Background trait.
    #[serde(default)]
    pub background: Option<TraitClassification>,
    /// Color trait.
    #[serde(default)]
    pub color: Option<TraitClassification>,
}

/// Live stamina reading, when the collaborator supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StaminaSnapshot {
    /// Stamina capacity.
    pub max: u32,
    /// Current stamina.
    pub current: u32,
}

/// Everything the engine needs to know about one creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KamiSnapshot {
    /// Sequential index.
    pub index: KamiIndex,
    /// 256-bit entity id.
    #[ts(as = "String")]
    pub entity_id: KamiEntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Raw chain stats.
    pub stats: StatBlock,
    /// Invested skills.
    #[serde(default)]
    pub skills: Vec<SkillState>,
    /// Trait classifications.
    #[serde(default)]
    pub traits: TraitSet,
    /// Live stamina, if known.
    #[serde(default)]
    pub stamina: Option<StaminaSnapshot>,
}

/// A harvest node as known to the node directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NodeInfo {
    /// Node index.
    pub index: NodeIndex,
    /// Display name.
    pub name: String,
    /// Affinity classified from the name.
    pub affinity: Affinity,
}

// ---------------------------------------------------------------------------
// Bonuses
// ---------------------------------------------------------------------------

/// A typed modifier parsed from a catalog descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParsedBonus {
    /// Canonical key.
    #[ts(as = "String")]
    pub kind: BonusKind,
    /// Signed magnitude in `unit`.
    #[ts(as = "String")]
    pub value: Decimal,
    /// Denomination of `value`.
    pub unit: BonusUnit,
}

impl ParsedBonus {
    /// Create a parsed bonus.
    pub const fn new(kind: BonusKind, value: Decimal, unit: BonusUnit) -> Self {
        Self { kind, value, unit }
    }

    /// Whether the magnitude is a percentage.
    pub const fn is_percent(&self) -> bool {
        matches!(self.unit, BonusUnit::Percent)
    }

    /// Whether the magnitude is a per-hour rate.
    pub const fn is_per_hour(&self) -> bool {
        matches!(self.unit, BonusUnit::PerHour)
    }
}

/// Running total for one bonus key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BonusTotal {
    /// Denomination shared by every contribution.
    pub unit: BonusUnit,
    /// Signed sum.
    #[ts(as = "String")]
    pub value: Decimal,
}

/// Per-creature bonus totals keyed by canonical bonus key.
///
/// Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AggregatedBonuses {
    /// Totals by key.
    #[ts(as = "BTreeMap<String, BonusTotal>")]
    pub totals: BTreeMap<BonusKind, BonusTotal>,
}

impl AggregatedBonuses {
    /// Create an empty vector.
    pub const fn new() -> Self {
        Self {
            totals: BTreeMap::new(),
        }
    }

    /// Add a contribution to its key.
    ///
    /// Returns `false` (and leaves the total untouched) when the key already
    /// holds a different unit.
    pub fn accumulate(&mut self, kind: BonusKind, unit: BonusUnit, value: Decimal) -> bool {
        match self.totals.get_mut(&kind) {
            Some(total) if total.unit != unit => false,
            Some(total) => {
                total.value = total.value.saturating_add(value);
                true
            }
            None => {
                self.totals.insert(kind, BonusTotal { unit, value });
                true
            }
        }
    }

    /// Total for a key regardless of unit, zero if absent.
    pub fn get(&self, kind: &BonusKind) -> Decimal {
        self.totals.get(kind).map_or(Decimal::ZERO, |t| t.value)
    }

    /// Total for a key if it is denominated in `unit`, zero otherwise.
    pub fn get_in(&self, kind: &BonusKind, unit: BonusUnit) -> Decimal {
        match self.totals.get(kind) {
            Some(total) if total.unit == unit => total.value,
            _ => Decimal::ZERO,
        }
    }

    /// Flat total for a key.
    pub fn flat(&self, kind: &BonusKind) -> Decimal {
        self.get_in(kind, BonusUnit::Flat)
    }

    /// Percent total for a key, in percentage points.
    pub fn percent(&self, kind: &BonusKind) -> Decimal {
        self.get_in(kind, BonusUnit::Percent)
    }

    /// Per-hour total for a key.
    pub fn per_hour(&self, kind: &BonusKind) -> Decimal {
        self.get_in(kind, BonusUnit::PerHour)
    }

    /// Whether no key holds a total.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// One invested skill, resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillBreakdownEntry {
    /// Catalog index.
    pub index: SkillIndex,
    /// Skill name.
    pub name: String,
    /// Owning tree.
    pub tree: SkillTree,
    /// Tier within the tree (1-6).
    pub tier: u8,
    /// Points invested.
    pub level: u32,
    /// Raw catalog descriptor.
    pub descriptor: String,
    /// Parsed bonus, if the descriptor parsed.
    pub bonus: Option<ParsedBonus>,
}

/// Skill investment overview for a creature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillSummary {
    /// Sum of levels over active skills.
    pub total_points_used: u32,
    /// Distinct tiers with at least one active skill, per tree, ascending.
    pub unlocked_tiers: BTreeMap<SkillTree, Vec<u8>>,
    /// Active skills found in the catalog, in index order.
    pub skills: Vec<SkillBreakdownEntry>,
    /// Active skill indices missing from the catalog.
    pub unknown: Vec<SkillIndex>,
}

// ---------------------------------------------------------------------------
// Harvest and regeneration
// ---------------------------------------------------------------------------

/// Body and hand contributions to the affinity multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AffinityBreakdown {
    /// How the body trait relates to the node.
    pub body_match: AffinityMatch,
    /// Signed body contribution.
    #[ts(as = "String")]
    pub body_contribution: Decimal,
    /// How the hand trait relates to the node.
    pub hand_match: AffinityMatch,
    /// Signed hand contribution.
    #[ts(as = "String")]
    pub hand_contribution: Decimal,
    /// `1 + body + hand`; unclamped.
    #[ts(as = "String")]
    pub total: Decimal,
}

/// Projected harvest rate for one creature at one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HarvestYield {
    /// `max(0, final power)` per hour.
    #[ts(as = "String")]
    pub base_rate_per_hour: Decimal,
    /// Time ramp, 1.0 to 1.5.
    #[ts(as = "String")]
    pub intensity_multiplier: Decimal,
    /// Affinity multiplier; may be negative.
    #[ts(as = "String")]
    pub affinity_bonus: Decimal,
    /// Aggregated fertility boost as a fraction.
    #[ts(as = "String")]
    pub fertility_boost: Decimal,
    /// `base * intensity * affinity`.
    #[ts(as = "String")]
    pub total_rate_per_hour: Decimal,
}

/// Harvest estimate against one node affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AffinityHarvestEstimate {
    /// Node affinity assumed.
    pub affinity: Affinity,
    /// Trait contributions at that affinity.
    pub breakdown: AffinityBreakdown,
    /// Yield at that affinity.
    pub harvest: HarvestYield,
    /// Projected output over the request duration, floored at zero.
    #[ts(as = "String")]
    pub estimated_output: Decimal,
}

/// Regeneration rates and time to full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Regeneration {
    /// Health points per second.
    #[ts(as = "String")]
    pub health_regen_per_second: Decimal,
    /// Seconds until health reaches final max health.
    #[ts(as = "String")]
    pub time_to_full_health_secs: Decimal,
    /// Stamina points per second.
    #[ts(as = "String")]
    pub stamina_regen_per_second: Decimal,
    /// Seconds until stamina is full.
    #[ts(as = "String")]
    pub time_to_full_stamina_secs: Decimal,
}

/// Full stat and harvest report for one creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmingReport {
    /// The snapshot the report was computed from.
    pub kami: KamiSnapshot,
    /// Final effective stats.
    pub final_stats: FinalStats,
    /// Skill investment overview.
    pub skills: SkillSummary,
    /// Aggregated skill bonuses.
    pub bonuses: AggregatedBonuses,
    /// Target node, when one was requested and known.
    pub node: Option<NodeInfo>,
    /// Duration used for projections, in seconds.
    pub duration_secs: u64,
    /// Trait contributions at the target node (neutral without one).
    pub affinity: AffinityBreakdown,
    /// Yield at the target node (neutral affinity without one).
    pub harvest: HarvestYield,
    /// Projected output over `duration_secs`.
    #[ts(as = "String")]
    pub estimated_output: Decimal,
    /// Yield at every node affinity.
    pub by_affinity: Vec<AffinityHarvestEstimate>,
    /// Regeneration timing.
    pub regeneration: Regeneration,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn aggregated_bonuses_read_zero_when_missing() {
        let bonuses = AggregatedBonuses::new();
        assert_eq!(bonuses.get(&BonusKind::Power), Decimal::ZERO);
        assert_eq!(bonuses.percent(&BonusKind::FertilityBoost), Decimal::ZERO);
    }

    #[test]
    fn aggregated_bonuses_reject_mixed_units() {
        let mut bonuses = AggregatedBonuses::new();
        assert!(bonuses.accumulate(BonusKind::Power, BonusUnit::Flat, dec!(1)));
        assert!(bonuses.accumulate(BonusKind::Power, BonusUnit::Flat, dec!(3)));
        assert!(!bonuses.accumulate(BonusKind::Power, BonusUnit::Percent, dec!(5)));
        assert_eq!(bonuses.flat(&BonusKind::Power), dec!(4));
        assert_eq!(bonuses.percent(&BonusKind::Power), Decimal::ZERO);
    }

    #[test]
    fn trait_type_serializes_as_type() {
        let body = TraitClassification::new(TraitCategory::Body, "INSECT");
        let json = serde_json::to_value(&body).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("type")).and_then(|v| v.as_str()),
            Some("INSECT")
        );
        assert_eq!(body.affinity(), Some(Affinity::Insect));
    }

    #[test]
    fn decimals_serialize_as_strings() {
        let stats = FinalStats {
            health: dec!(90),
            power: dec!(45),
            harmony: dec!(36),
            violence: dec!(0),
        };
        let json = serde_json::to_value(stats).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("power")).and_then(|v| v.as_str()),
            Some("45")
        );
    }
}
