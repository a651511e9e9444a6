//! Harvest yield projection.
//!
//! ```text
//! base      = max(0, final power)                  per hour
//! intensity = 1 + min(elapsed, 3600) / 3600 * 0.5  ramps 1.0 -> 1.5 over an hour
//! total     = base * intensity * affinity          per hour
//! output(d) = max(0, total * d / 3600)
//! ```
//!
//! A negative affinity multiplier makes `total` negative; projected output
//! is where that gets floored.

use kami_types::{Affinity, AffinityHarvestEstimate, AggregatedBonuses, HarvestYield};
use rust_decimal::Decimal;

use crate::affinity::{TraitAffinities, creature_breakdown, fertility_fraction};

/// Seconds in an hour.
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Seconds of continuous harvesting until intensity stops ramping.
pub const INTENSITY_RAMP_SECS: u64 = SECONDS_PER_HOUR;

/// Intensity gained over a full ramp (0.5).
pub const MAX_INTENSITY_GAIN: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Time-ramped intensity multiplier after `elapsed_secs` of harvesting.
pub fn intensity_multiplier(elapsed_secs: u64) -> Decimal {
    let ramp = Decimal::from(elapsed_secs.min(INTENSITY_RAMP_SECS));
    let gain = ramp
        .checked_mul(MAX_INTENSITY_GAIN)
        .and_then(|v| v.checked_div(Decimal::from(INTENSITY_RAMP_SECS)))
        .unwrap_or(Decimal::ZERO);
    Decimal::ONE.saturating_add(gain).normalize()
}

/// Project the harvest rate for a creature.
///
/// `fertility_boost` is reported for reference; it already reaches the rate
/// through `affinity_bonus`.
pub fn compute_yield(
    final_power: Decimal,
    affinity_bonus: Decimal,
    bonuses: &AggregatedBonuses,
    elapsed_secs: u64,
) -> HarvestYield {
    let base_rate_per_hour = final_power.max(Decimal::ZERO);
    let intensity = intensity_multiplier(elapsed_secs);
    let total_rate_per_hour = base_rate_per_hour
        .saturating_mul(intensity)
        .saturating_mul(affinity_bonus);

    HarvestYield {
        base_rate_per_hour,
        intensity_multiplier: intensity,
        affinity_bonus,
        fertility_boost: fertility_fraction(bonuses),
        total_rate_per_hour: total_rate_per_hour.normalize(),
    }
}

/// Output over `duration_secs` at the projected rate, floored at zero.
///
/// Computed as `total * d / 3600`, which equals `(total / 3600) * d` without
/// the intermediate rounding. When the product overflows, the rate is
/// divided first and the result saturates.
pub fn projected_output(harvest: &HarvestYield, duration_secs: u64) -> Decimal {
    let rate = harvest.total_rate_per_hour;
    let duration = Decimal::from(duration_secs);
    let hour = Decimal::from(SECONDS_PER_HOUR);
    rate.checked_mul(duration)
        .and_then(|v| v.checked_div(hour))
        .unwrap_or_else(|| {
            rate.checked_div(hour)
                .unwrap_or(Decimal::ZERO)
                .saturating_mul(duration)
        })
        .max(Decimal::ZERO)
        .normalize()
}

/// Yield estimates for the creature at every node affinity.
///
/// Every row is neutral when `traits` is `None`.
pub fn affinity_table(
    final_power: Decimal,
    traits: Option<TraitAffinities>,
    bonuses: &AggregatedBonuses,
    duration_secs: u64,
) -> Vec<AffinityHarvestEstimate> {
    let fertility = fertility_fraction(bonuses);
    Affinity::ALL
        .into_iter()
        .map(|affinity| {
            let breakdown = creature_breakdown(traits, Some(affinity), fertility);
            let harvest = compute_yield(final_power, breakdown.total, bonuses, duration_secs);
            AffinityHarvestEstimate {
                affinity,
                breakdown,
                harvest,
                estimated_output: projected_output(&harvest, duration_secs),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use kami_types::{BonusKind, BonusUnit};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn intensity_ramps_over_one_hour_then_holds() {
        assert_eq!(intensity_multiplier(0), dec!(1.0));
        assert_eq!(intensity_multiplier(1800), dec!(1.25));
        assert_eq!(intensity_multiplier(3600), dec!(1.5));
        assert_eq!(intensity_multiplier(86_400), dec!(1.5));
    }

    #[test]
    fn matched_creature_over_one_hour() {
        let harvest = compute_yield(dec!(45), dec!(1.65), &AggregatedBonuses::new(), 3600);
        assert_eq!(harvest.base_rate_per_hour, dec!(45));
        assert_eq!(harvest.intensity_multiplier, dec!(1.5));
        assert_eq!(harvest.affinity_bonus, dec!(1.65));
        assert_eq!(harvest.total_rate_per_hour, dec!(111.375));
        assert_eq!(projected_output(&harvest, 3600), dec!(111.375));
    }

    #[test]
    fn output_scales_with_duration() {
        let harvest = compute_yield(dec!(100), Decimal::ONE, &AggregatedBonuses::new(), 3600);
        assert_eq!(harvest.total_rate_per_hour, dec!(150));
        assert_eq!(projected_output(&harvest, 1800), dec!(75));
        assert_eq!(projected_output(&harvest, 0), Decimal::ZERO);
    }

    #[test]
    fn large_rate_over_long_duration_does_not_collapse_to_zero() {
        let harvest = compute_yield(
            dec!(5068061406.92),
            Decimal::ONE,
            &AggregatedBonuses::new(),
            3600,
        );
        assert_eq!(harvest.total_rate_per_hour, dec!(7602092110.38));
        let output = projected_output(&harvest, u64::MAX);
        assert!(output > harvest.total_rate_per_hour);

        let huge = compute_yield(Decimal::MAX, Decimal::ONE, &AggregatedBonuses::new(), 0);
        assert_eq!(projected_output(&huge, u64::MAX), Decimal::MAX);
    }

    #[test]
    fn negative_affinity_floors_output_not_rate() {
        let harvest = compute_yield(dec!(40), dec!(-0.2), &AggregatedBonuses::new(), 3600);
        assert!(harvest.total_rate_per_hour < Decimal::ZERO);
        assert_eq!(projected_output(&harvest, 3600), Decimal::ZERO);
    }

    #[test]
    fn negative_power_gives_zero_base() {
        let harvest = compute_yield(dec!(-5), Decimal::ONE, &AggregatedBonuses::new(), 60);
        assert_eq!(harvest.base_rate_per_hour, Decimal::ZERO);
        assert_eq!(harvest.total_rate_per_hour, Decimal::ZERO);
    }

    #[test]
    fn fertility_is_reported_as_fraction() {
        let mut bonuses = AggregatedBonuses::new();
        bonuses.accumulate(BonusKind::FertilityBoost, BonusUnit::Percent, dec!(24));
        let harvest = compute_yield(dec!(10), Decimal::ONE, &bonuses, 3600);
        assert_eq!(harvest.fertility_boost, dec!(0.24));
    }

    #[test]
    fn table_covers_every_affinity() {
        let traits = TraitAffinities {
            body: Some(Affinity::Insect),
            hand: Some(Affinity::Normal),
        };
        let table = affinity_table(dec!(45), Some(traits), &AggregatedBonuses::new(), 3600);
        let affinities: Vec<Affinity> = table.iter().map(|e| e.affinity).collect();
        assert_eq!(affinities, Affinity::ALL.to_vec());

        let insect = table.iter().find(|e| e.affinity == Affinity::Insect);
        assert_eq!(insect.map(|e| e.estimated_output), Some(dec!(111.375)));

        let scrap = table.iter().find(|e| e.affinity == Affinity::Scrap);
        assert_eq!(scrap.map(|e| e.breakdown.total), Some(dec!(0.75)));
        assert_eq!(scrap.map(|e| e.estimated_output), Some(dec!(50.625)));
    }

    #[test]
    fn table_without_trait_pair_is_neutral() {
        let table = affinity_table(dec!(45), None, &AggregatedBonuses::new(), 3600);
        assert!(table.iter().all(|e| e.breakdown.total == Decimal::ONE));
        assert!(table.iter().all(|e| e.estimated_output == dec!(67.5)));
    }
}
