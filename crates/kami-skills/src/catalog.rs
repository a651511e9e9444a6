//! The static skill catalog.
//!
//! The catalog maps a [`SkillIndex`] to its tree, tier, name and bonus. It is
//! built once from a YAML table (the built-in `data/skills.yaml` or a file
//! supplied by the operator), parsing every descriptor up front so nothing
//! on the request path ever touches a raw string.
//!
//! Build-time validation:
//!
//! - skill indices are unique
//! - tiers are within `1..=6`
//! - every bonus key has a single unit across the whole table
//! - in strict mode, every descriptor parses
//!
//! Outside strict mode an unparseable descriptor is logged and the skill is
//! kept with no bonus.

use std::collections::BTreeMap;
use std::path::Path;

use kami_types::{BonusKind, BonusUnit, ParsedBonus, SkillIndex, SkillTree};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bonus::parse_bonus;
use crate::error::CatalogError;

/// The built-in catalog table.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../data/skills.yaml");

/// Lowest valid tier.
pub const MIN_TIER: u8 = 1;

/// Highest valid tier.
pub const MAX_TIER: u8 = 6;

// ---------------------------------------------------------------------------
// Table entries
// ---------------------------------------------------------------------------

/// One row of the catalog table as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Skill index.
    pub index: SkillIndex,
    /// Owning tree.
    pub tree: SkillTree,
    /// Tier within the tree.
    pub tier: u8,
    /// Display name.
    pub name: String,
    /// Bonus descriptor, e.g. `"6% fertility boost"`.
    pub bonus: String,
    /// Icon URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Top-level shape of a catalog YAML document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<SkillEntry>,
}

/// A catalog entry with its descriptor parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDefinition {
    /// Skill index.
    pub index: SkillIndex,
    /// Owning tree.
    pub tree: SkillTree,
    /// Tier within the tree (1-6).
    pub tier: u8,
    /// Display name.
    pub name: String,
    /// Raw descriptor as written in the table.
    pub descriptor: String,
    /// Icon URL.
    pub image: Option<String>,
    /// Parsed bonus; `None` when the descriptor did not parse.
    pub bonus: Option<ParsedBonus>,
}

/// Options controlling catalog construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Reject unparseable descriptors instead of logging them.
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// SkillCatalog
// ---------------------------------------------------------------------------

/// An immutable, validated skill table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillIndex, SkillDefinition>,
    units: BTreeMap<BonusKind, BonusUnit>,
    unparsed: Vec<SkillIndex>,
}

impl SkillCatalog {
    /// Build the catalog from the embedded table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG_YAML, CatalogOptions::default())
    }

    /// Build a catalog from a YAML file.
    pub fn from_file(path: &Path, options: CatalogOptions) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents, options)
    }

    /// Build a catalog from a YAML document with a top-level `skills` list.
    pub fn from_yaml(yaml: &str, options: CatalogOptions) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::from_entries(file.skills, options)
    }

    /// Build a catalog from already-deserialized rows.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SkillEntry>,
        options: CatalogOptions,
    ) -> Result<Self, CatalogError> {
        let mut skills = BTreeMap::new();
        let mut units: BTreeMap<BonusKind, (BonusUnit, SkillIndex)> = BTreeMap::new();
        let mut unparsed = Vec::new();

        for entry in entries {
            if !(MIN_TIER..=MAX_TIER).contains(&entry.tier) {
                return Err(CatalogError::TierOutOfRange {
                    index: entry.index,
                    tier: entry.tier,
                });
            }
            if skills.contains_key(&entry.index) {
                return Err(CatalogError::DuplicateIndex(entry.index));
            }

            let bonus = parse_bonus(&entry.bonus);
            match &bonus {
                Some(parsed) => check_unit(&mut units, parsed, entry.index)?,
                None if options.strict => {
                    return Err(CatalogError::UnparsedDescriptor {
                        index: entry.index,
                        descriptor: entry.bonus,
                    });
                }
                None => {
                    warn!(
                        skill = %entry.index,
                        name = %entry.name,
                        descriptor = %entry.bonus,
                        "Skill bonus descriptor did not parse; skill contributes no bonus"
                    );
                    unparsed.push(entry.index);
                }
            }

            skills.insert(
                entry.index,
                SkillDefinition {
                    index: entry.index,
                    tree: entry.tree,
                    tier: entry.tier,
                    name: entry.name,
                    descriptor: entry.bonus,
                    image: entry.image,
                    bonus,
                },
            );
        }

        info!(
            skills = skills.len(),
            unparsed = unparsed.len(),
            bonus_kinds = units.len(),
            "Skill catalog built"
        );

        Ok(Self {
            skills,
            units: units
                .into_iter()
                .map(|(kind, (unit, _))| (kind, unit))
                .collect(),
            unparsed,
        })
    }

    /// Look up a skill; `None` for indices not in the table.
    pub fn lookup(&self, index: SkillIndex) -> Option<&SkillDefinition> {
        self.skills.get(&index)
    }

    /// Iterate over all skills in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    /// Iterate over one tree's skills in index order.
    pub fn tree(&self, tree: SkillTree) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values().filter(move |skill| skill.tree == tree)
    }

    /// Number of skills in the table.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// The unit every bonus of `kind` is denominated in, if any skill grants it.
    pub fn unit_of(&self, kind: &BonusKind) -> Option<BonusUnit> {
        self.units.get(kind).copied()
    }

    /// Skills whose descriptor failed to parse, in table order.
    pub fn unparsed(&self) -> &[SkillIndex] {
        &self.unparsed
    }
}

/// Record the unit a bonus key uses, rejecting a second unit for the same key.
fn check_unit(
    units: &mut BTreeMap<BonusKind, (BonusUnit, SkillIndex)>,
    bonus: &ParsedBonus,
    index: SkillIndex,
) -> Result<(), CatalogError> {
    match units.get(&bonus.kind) {
        Some((unit, first_index)) if *unit != bonus.unit => Err(CatalogError::MixedUnits {
            kind: bonus.kind.clone(),
            first: *unit,
            first_index: *first_index,
            second: bonus.unit,
            second_index: index,
        }),
        Some(_) => Ok(()),
        None => {
            units.insert(bonus.kind.clone(), (bonus.unit, index));
            Ok(())
        }
    }
}
