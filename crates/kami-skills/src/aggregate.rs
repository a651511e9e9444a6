//! Bonus aggregation and skill summaries.
//!
//! A skill contributes its full parsed bonus once its level is above zero.
//! Level is not a multiplier: the descriptor magnitude is the whole
//! contribution. Level-0 skills, indices missing from the catalog, and
//! skills whose descriptor did not parse contribute nothing.

use std::collections::BTreeMap;

use kami_types::{AggregatedBonuses, SkillBreakdownEntry, SkillState, SkillSummary};
use tracing::debug;

use crate::catalog::SkillCatalog;

/// Sum the bonuses of every active skill into one vector.
///
/// Totals are keyed by bonus kind and carry the kind's unit. The result does
/// not depend on the order of `states`.
pub fn aggregate(catalog: &SkillCatalog, states: &[SkillState]) -> AggregatedBonuses {
    let mut bonuses = AggregatedBonuses::new();

    for state in states {
        if !state.is_active() {
            debug!(skill = %state.skill_index, "Skipping skill at level 0");
            continue;
        }
        let Some(skill) = catalog.lookup(state.skill_index) else {
            debug!(skill = %state.skill_index, level = state.level, "Unknown skill index");
            continue;
        };
        let Some(bonus) = &skill.bonus else {
            continue;
        };
        // The catalog already rejected mixed units, so this cannot fail.
        bonuses.accumulate(bonus.kind.clone(), bonus.unit, bonus.value);
    }

    bonuses
}

/// Summarize a creature's skill investment.
///
/// Only active skills are counted. Known skills are listed in index order;
/// unknown indices are reported separately, also in index order.
pub fn summarize(catalog: &SkillCatalog, states: &[SkillState]) -> SkillSummary {
    let mut active: Vec<&SkillState> = states.iter().filter(|s| s.is_active()).collect();
    active.sort_by_key(|s| s.skill_index);

    let mut summary = SkillSummary::default();
    let mut tiers: BTreeMap<_, Vec<u8>> = BTreeMap::new();

    for state in active {
        summary.total_points_used = summary.total_points_used.saturating_add(state.level);

        let Some(skill) = catalog.lookup(state.skill_index) else {
            summary.unknown.push(state.skill_index);
            continue;
        };

        let tree_tiers = tiers.entry(skill.tree).or_default();
        if !tree_tiers.contains(&skill.tier) {
            tree_tiers.push(skill.tier);
        }

        summary.skills.push(SkillBreakdownEntry {
            index: skill.index,
            name: skill.name.clone(),
            tree: skill.tree,
            tier: skill.tier,
            level: state.level,
            descriptor: skill.descriptor.clone(),
            bonus: skill.bonus.clone(),
        });
    }

    for tree_tiers in tiers.values_mut() {
        tree_tiers.sort_unstable();
    }
    summary.unlocked_tiers = tiers;
    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kami_types::{BonusKind, BonusUnit, SkillIndex, SkillTree};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::{CatalogOptions, SkillEntry};

    fn catalog() -> SkillCatalog {
        let rows = [
            (411, SkillTree::Harvester, 1, "1 power"),
            (421, SkillTree::Harvester, 2, "2 power"),
            (412, SkillTree::Harvester, 1, "6% fertility boost"),
            (213, SkillTree::Enlightened, 1, "5/hr intensity boost"),
            (311, SkillTree::Guardian, 1, "-3 harmony"),
            (999, SkillTree::Guardian, 6, "not a bonus"),
        ];
        SkillCatalog::from_entries(
            rows.into_iter().map(|(index, tree, tier, bonus)| SkillEntry {
                index: SkillIndex(index),
                tree,
                tier,
                name: format!("Skill {index}"),
                bonus: bonus.to_owned(),
                image: None,
            }),
            CatalogOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn active_skills_sum_by_kind_and_unit() {
        let catalog = catalog();
        let states = [
            SkillState::new(411, 1),
            SkillState::new(421, 3),
            SkillState::new(412, 2),
            SkillState::new(213, 1),
        ];
        let bonuses = aggregate(&catalog, &states);
        assert_eq!(bonuses.flat(&BonusKind::Power), dec!(3));
        assert_eq!(bonuses.percent(&BonusKind::FertilityBoost), dec!(6));
        assert_eq!(bonuses.per_hour(&BonusKind::IntensityBoost), dec!(5));
        assert_eq!(bonuses.flat(&BonusKind::FertilityBoost), Decimal::ZERO);
    }

    #[test]
    fn level_does_not_scale_magnitude() {
        let catalog = catalog();
        let one = aggregate(&catalog, &[SkillState::new(421, 1)]);
        let five = aggregate(&catalog, &[SkillState::new(421, 5)]);
        assert_eq!(one, five);
    }

    #[test]
    fn inactive_unknown_and_unparsed_contribute_nothing() {
        let catalog = catalog();
        let states = [
            SkillState::new(411, 0),
            SkillState::new(12_345, 4),
            SkillState::new(999, 2),
        ];
        assert!(aggregate(&catalog, &states).is_empty());
    }

    #[test]
    fn aggregation_is_order_independent() {
        let catalog = catalog();
        let forward = [
            SkillState::new(411, 1),
            SkillState::new(311, 1),
            SkillState::new(412, 1),
            SkillState::new(421, 1),
        ];
        let mut backward = forward;
        backward.reverse();
        assert_eq!(aggregate(&catalog, &forward), aggregate(&catalog, &backward));
    }

    #[test]
    fn negative_bonuses_are_kept_signed() {
        let catalog = catalog();
        let bonuses = aggregate(&catalog, &[SkillState::new(311, 1)]);
        assert_eq!(bonuses.flat(&BonusKind::Harmony), dec!(-3));
        assert_eq!(
            bonuses.totals.get(&BonusKind::Harmony).map(|t| t.unit),
            Some(BonusUnit::Flat)
        );
    }

    #[test]
    fn summary_counts_points_and_tiers() {
        let catalog = catalog();
        let states = [
            SkillState::new(421, 3),
            SkillState::new(411, 2),
            SkillState::new(412, 1),
            SkillState::new(213, 0),
            SkillState::new(12_345, 4),
        ];
        let summary = summarize(&catalog, &states);
        assert_eq!(summary.total_points_used, 10);
        assert_eq!(
            summary.unlocked_tiers.get(&SkillTree::Harvester),
            Some(&vec![1, 2])
        );
        assert!(!summary.unlocked_tiers.contains_key(&SkillTree::Enlightened));
        let indices: Vec<u32> = summary.skills.iter().map(|s| s.index.0).collect();
        assert_eq!(indices, vec![411, 412, 421]);
        assert_eq!(summary.unknown, vec![SkillIndex(12_345)]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    /// Built-in indices across every tree, plus two the catalog lacks.
    const INDICES: [u32; 12] = [
        111, 123, 213, 233, 311, 363, 411, 412, 431, 462, 9_999, 12_345,
    ];

    fn states_and_shuffle() -> impl Strategy<Value = (Vec<SkillState>, Vec<SkillState>)> {
        prop::collection::vec((prop::sample::select(INDICES.to_vec()), 0..4_u32), 0..24)
            .prop_flat_map(|pairs| {
                let states: Vec<SkillState> = pairs
                    .into_iter()
                    .map(|(index, level)| SkillState::new(index, level))
                    .collect();
                (Just(states.clone()), Just(states).prop_shuffle())
            })
    }

    proptest! {
        #[test]
        fn prop_aggregation_ignores_order((states, shuffled) in states_and_shuffle()) {
            let catalog = SkillCatalog::builtin().unwrap();
            prop_assert_eq!(aggregate(&catalog, &states), aggregate(&catalog, &shuffled));
            prop_assert_eq!(
                summarize(&catalog, &states).total_points_used,
                summarize(&catalog, &shuffled).total_points_used
            );
        }
    }
}
