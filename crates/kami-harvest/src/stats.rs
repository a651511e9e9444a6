//! Final stat resolution.

use kami_types::{AggregatedBonuses, Attribute, FinalStats, StatBlock};
use rust_decimal::Decimal;

/// Merge raw chain stats with flat skill bonuses.
///
/// `final = max(0, sync + flat bonus)` per attribute. Percent and per-hour
/// totals never reach final stats, even under an attribute's key.
pub fn resolve_final_stats(base: &StatBlock, bonuses: &AggregatedBonuses) -> FinalStats {
    let mut stats = FinalStats::default();
    for attribute in Attribute::ALL {
        let sync = Decimal::from(base.get(attribute).sync);
        let bonus = bonuses.flat(&attribute.bonus_kind());
        *stats.get_mut(attribute) = sync.saturating_add(bonus).max(Decimal::ZERO);
    }
    stats
}


#[cfg(test)]
mod proptests {
    use kami_types::{BonusUnit, Stat};
    use proptest::prelude::*;

    use super::*;

    fn flat_contributions() -> impl Strategy<Value = Vec<(Attribute, Decimal)>> {
        prop::collection::vec(
            (
                prop::sample::select(Attribute::ALL.to_vec()),
                any::<i64>(),
                0..=6_u32,
            )
                .prop_map(|(attribute, mantissa, scale)| {
                    (attribute, Decimal::new(mantissa, scale))
                }),
            0..16,
        )
    }

    proptest! {
        #[test]
        fn prop_final_stats_never_negative(
            syncs in prop::array::uniform4(any::<i32>()),
            contributions in flat_contributions(),
        ) {
            let [health, power, harmony, violence] = syncs;
            let base = StatBlock {
                health: Stat::synced(health),
                power: Stat::synced(power),
                harmony: Stat::synced(harmony),
                violence: Stat::synced(violence),
            };
            let mut bonuses = AggregatedBonuses::new();
            for (attribute, value) in contributions {
                bonuses.accumulate(attribute.bonus_kind(), BonusUnit::Flat, value);
            }

            let stats = resolve_final_stats(&base, &bonuses);
            for attribute in Attribute::ALL {
                let expected = Decimal::from(base.get(attribute).sync)
                    .saturating_add(bonuses.flat(&attribute.bonus_kind()))
                    .max(Decimal::ZERO);
                prop_assert!(stats.get(attribute) >= Decimal::ZERO);
                prop_assert_eq!(stats.get(attribute), expected);
            }
        }
    }
}
