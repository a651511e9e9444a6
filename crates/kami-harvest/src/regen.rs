//! Health and stamina regeneration.
//!
//! Health regenerates at `max(0, harmony) / 3600` per second. Stamina
//! refills from empty in one hour, so it regenerates at `max / 3600`.
//! Time to full is `deficit / rate` when both are positive, else zero.

use kami_types::{Regeneration, StaminaSnapshot};
use rust_decimal::Decimal;

use crate::harvest::SECONDS_PER_HOUR;

/// Per-second rate and seconds to full for one pool.
///
/// `per_hour` is the hourly rate; time to full is computed as
/// `deficit * 3600 / per_hour` so exact inputs give exact outputs.
fn pool(per_hour: Decimal, current: Decimal, max: Decimal) -> (Decimal, Decimal) {
    let hour = Decimal::from(SECONDS_PER_HOUR);
    let per_hour = per_hour.max(Decimal::ZERO);
    let per_second = per_hour.checked_div(hour).unwrap_or(Decimal::ZERO);

    let deficit = max.saturating_sub(current);
    let time_to_full = if deficit > Decimal::ZERO && per_hour > Decimal::ZERO {
        deficit
            .checked_mul(hour)
            .and_then(|v| v.checked_div(per_hour))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    (per_second.normalize(), time_to_full.normalize())
}

/// Regeneration rates and time to full.
///
/// `base_health` is the creature's current health as read from chain;
/// `final_max_health` is its final health stat.
pub fn compute_regeneration(
    final_harmony: Decimal,
    base_health: Decimal,
    final_max_health: Decimal,
    stamina: StaminaSnapshot,
) -> Regeneration {
    let (health_regen_per_second, time_to_full_health_secs) =
        pool(final_harmony, base_health, final_max_health);

    let max_stamina = Decimal::from(stamina.max);
    let (stamina_regen_per_second, time_to_full_stamina_secs) =
        pool(max_stamina, Decimal::from(stamina.current), max_stamina);

    Regeneration {
        health_regen_per_second,
        time_to_full_health_secs,
        stamina_regen_per_second,
        time_to_full_stamina_secs,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const FULL: StaminaSnapshot = StaminaSnapshot {
        max: 100,
        current: 100,
    };

    #[test]
    fn harmony_drives_health_regen() {
        let regen = compute_regeneration(dec!(36), dec!(50), dec!(90), FULL);
        assert_eq!(regen.health_regen_per_second, dec!(0.01));
        assert_eq!(regen.time_to_full_health_secs, dec!(4000));
    }

    #[test]
    fn full_health_needs_no_time() {
        let regen = compute_regeneration(dec!(36), dec!(90), dec!(90), FULL);
        assert_eq!(regen.time_to_full_health_secs, Decimal::ZERO);
        let over = compute_regeneration(dec!(36), dec!(120), dec!(90), FULL);
        assert_eq!(over.time_to_full_health_secs, Decimal::ZERO);
    }

    #[test]
    fn zero_or_negative_harmony_never_refills() {
        let zero = compute_regeneration(Decimal::ZERO, dec!(10), dec!(90), FULL);
        assert_eq!(zero.health_regen_per_second, Decimal::ZERO);
        assert_eq!(zero.time_to_full_health_secs, Decimal::ZERO);
        let negative = compute_regeneration(dec!(-4), dec!(10), dec!(90), FULL);
        assert_eq!(negative.health_regen_per_second, Decimal::ZERO);
    }

    #[test]
    fn full_stamina_placeholder() {
        let regen = compute_regeneration(dec!(36), dec!(50), dec!(90), FULL);
        assert_eq!(regen.time_to_full_stamina_secs, Decimal::ZERO);
        assert_eq!(
            regen.stamina_regen_per_second,
            Decimal::from(100).checked_div(Decimal::from(3600)).unwrap_or_default().normalize()
        );
    }

    #[test]
    fn partial_stamina_refills_proportionally() {
        let regen = compute_regeneration(
            dec!(36),
            dec!(50),
            dec!(90),
            StaminaSnapshot {
                max: 100,
                current: 40,
            },
        );
        assert_eq!(regen.time_to_full_stamina_secs, dec!(2160));
    }

    #[test]
    fn empty_stamina_capacity_is_zero() {
        let regen = compute_regeneration(
            dec!(36),
            dec!(50),
            dec!(90),
            StaminaSnapshot { max: 0, current: 0 },
        );
        assert_eq!(regen.stamina_regen_per_second, Decimal::ZERO);
        assert_eq!(regen.time_to_full_stamina_secs, Decimal::ZERO);
    }
}
