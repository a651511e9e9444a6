//! Enumeration types for the stat and harvest engine.
//!
//! Closed sets (skill trees, attributes, affinities, bonus units) are plain
//! enums. [`BonusKind`] is open: catalog labels outside the canonical set
//! survive as [`BonusKind::Other`] so new skills need no code change.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Skill trees
// ---------------------------------------------------------------------------

/// One of the four skill trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SkillTree {
    /// Combat: violence, spoils, cooldowns.
    Predator,
    /// Wellbeing: metabolism, fertility, intensity, strain.
    Enlightened,
    /// Defense: harmony, health, defense ratios.
    Guardian,
    /// Economy: power, bounty, fertility, salvage.
    Harvester,
}

impl SkillTree {
    /// All trees in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Predator,
        Self::Enlightened,
        Self::Guardian,
        Self::Harvester,
    ];
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// The four chain stat attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Attribute {
    /// Hit points; also the harvest strain buffer.
    Health,
    /// Drives the base harvest rate.
    Power,
    /// Drives health regeneration.
    Harmony,
    /// Drives liquidation attacks.
    Violence,
}

impl Attribute {
    /// All attributes.
    pub const ALL: [Self; 4] = [Self::Health, Self::Power, Self::Harmony, Self::Violence];

    /// The bonus key whose flat bucket feeds this attribute.
    pub const fn bonus_kind(self) -> BonusKind {
        match self {
            Self::Health => BonusKind::Health,
            Self::Power => BonusKind::Power,
            Self::Harmony => BonusKind::Harmony,
            Self::Violence => BonusKind::Violence,
        }
    }
}

// ---------------------------------------------------------------------------
// Traits and affinities
// ---------------------------------------------------------------------------

/// Trait slot on a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TraitCategory {
    /// Body trait; carries the larger affinity weight.
    Body,
    /// Hand trait; carries the smaller affinity weight.
    Hand,
    /// Face trait.
    Face,
    /// Background trait.
    Background,
    /// Color trait.
    Color,
}

/// Elemental affinity shared by traits and harvest nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Affinity {
    /// No elemental type; never matches and never penalises.
    Normal,
    /// Graves, skeletons and other eerie places.
    Eerie,
    /// Insect nests and centipede dens.
    Insect,
    /// Scrap heaps.
    Scrap,
}

impl Affinity {
    /// All affinities.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Eerie, Self::Insect, Self::Scrap];

    /// Parse an affinity name case-insensitively (`"INSECT"`, `"Insect"`).
    ///
    /// Returns `None` for anything outside the closed set.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "eerie" => Some(Self::Eerie),
            "insect" => Some(Self::Insect),
            "scrap" => Some(Self::Scrap),
            _ => None,
        }
    }

    /// Whether this is the neutral [`Affinity::Normal`].
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// How one trait relates to a node's affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AffinityMatch {
    /// Trait is `NORMAL`; contributes nothing.
    Neutral,
    /// Trait matches the node.
    Match,
    /// Trait is elemental but differs from the node.
    Mismatch,
}

// ---------------------------------------------------------------------------
// Bonuses
// ---------------------------------------------------------------------------

/// Denomination of a bonus magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BonusUnit {
    /// Absolute amount (stat points, seconds).
    Flat,
    /// Percentage points (`6` means 6%).
    Percent,
    /// Amount per hour.
    PerHour,
}

/// Canonical bonus key.
///
/// Rendered and serialized as its lower-camel tag (`fertilityBoost`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BonusKind {
    /// Flat power.
    Power,
    /// Flat health.
    Health,
    /// Flat harmony.
    Harmony,
    /// Flat violence.
    Violence,
    /// Percent added to the affinity match bonus.
    FertilityBoost,
    /// Percent bounty increase.
    BountyBoost,
    /// Percent recovery speed increase.
    MetabolismBoost,
    /// Intensity gained per hour of harvesting.
    IntensityBoost,
    /// Percent change in harvest health drain.
    Strain,
    /// Percent shift of the defense threshold.
    DefenseShift,
    /// Percent change of the defense ratio.
    DefenseRatio,
    /// Percent of spoils salvaged when liquidated.
    SalvageRatio,
    /// Percent of spoils taken on a liquidation.
    AtkSpoilsRatio,
    /// Percent change of the attack threshold ratio.
    AtkThresholdRatio,
    /// Percent shift of the attack threshold.
    AtkThresholdShift,
    /// Seconds added to the standard action cooldown.
    CooldownShift,
    /// A label outside the canonical set, kept as a lower-camel slug.
    Other(String),
}

impl BonusKind {
    /// The lower-camel tag for this key.
    pub fn tag(&self) -> &str {
        match self {
            Self::Power => "power",
            Self::Health => "health",
            Self::Harmony => "harmony",
            Self::Violence => "violence",
            Self::FertilityBoost => "fertilityBoost",
            Self::BountyBoost => "bountyBoost",
            Self::MetabolismBoost => "metabolismBoost",
            Self::IntensityBoost => "intensityBoost",
            Self::Strain => "strain",
            Self::DefenseShift => "defenseShift",
            Self::DefenseRatio => "defenseRatio",
            Self::SalvageRatio => "salvageRatio",
            Self::AtkSpoilsRatio => "atkSpoilsRatio",
            Self::AtkThresholdRatio => "atkThresholdRatio",
            Self::AtkThresholdShift => "atkThresholdShift",
            Self::CooldownShift => "cooldownShift",
            Self::Other(slug) => slug,
        }
    }

    /// Resolve a tag, falling back to [`BonusKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "power" => Self::Power,
            "health" => Self::Health,
            "harmony" => Self::Harmony,
            "violence" => Self::Violence,
            "fertilityBoost" => Self::FertilityBoost,
            "bountyBoost" => Self::BountyBoost,
            "metabolismBoost" => Self::MetabolismBoost,
            "intensityBoost" => Self::IntensityBoost,
            "strain" => Self::Strain,
            "defenseShift" => Self::DefenseShift,
            "defenseRatio" => Self::DefenseRatio,
            "salvageRatio" => Self::SalvageRatio,
            "atkSpoilsRatio" => Self::AtkSpoilsRatio,
            "atkThresholdRatio" => Self::AtkThresholdRatio,
            "atkThresholdShift" => Self::AtkThresholdShift,
            "cooldownShift" => Self::CooldownShift,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BonusKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl Serialize for BonusKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for BonusKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&raw))
    }
}
