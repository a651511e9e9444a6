//! Error types for the `kami-skills` crate.
//!
//! Only catalog construction can fail. Lookups and aggregation never do:
//! unknown skills and unparsed descriptors contribute nothing.

use kami_types::{BonusKind, BonusUnit, SkillIndex};

/// Errors raised while building a [`SkillCatalog`](crate::SkillCatalog).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("failed to read skill catalog: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse skill catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Two entries share a skill index.
    #[error("duplicate skill index: {0}")]
    DuplicateIndex(SkillIndex),

    /// An entry's tier is outside `1..=6`.
    #[error("skill {index} has tier {tier}, expected 1-6")]
    TierOutOfRange {
        /// The offending skill.
        index: SkillIndex,
        /// The tier it declared.
        tier: u8,
    },

    /// One bonus key is denominated in two different units.
    #[error(
        "bonus {kind} is {first:?} on skill {first_index} but {second:?} on skill {second_index}"
    )]
    MixedUnits {
        /// The bonus key.
        kind: BonusKind,
        /// Unit seen first.
        first: BonusUnit,
        /// Skill that established the first unit.
        first_index: SkillIndex,
        /// Conflicting unit.
        second: BonusUnit,
        /// Skill carrying the conflicting unit.
        second_index: SkillIndex,
    },

    /// A descriptor did not parse and the catalog was built in strict mode.
    #[error("skill {index} has an unparseable bonus descriptor: {descriptor:?}")]
    UnparsedDescriptor {
        /// The offending skill.
        index: SkillIndex,
        /// The raw descriptor.
        descriptor: String,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
