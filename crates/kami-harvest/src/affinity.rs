//! Trait/node affinity multiplier.
//!
//! Body is weighed before hand. For each trait:
//!
//! - `Normal` (or missing) contributes nothing
//! - matching the node adds the match weight plus the fertility fraction
//! - any other elemental type subtracts the mismatch penalty
//!
//! The fertility fraction is added to every matching trait, not split. The
//! total is `1 + body + hand` and is not clamped: it can exceed 2 or drop
//! below 0. Only projected output is floored.
//!
//! A creature missing its body or hand trait is neutral at every node.

use kami_types::{
    Affinity, AffinityBreakdown, AffinityMatch, AggregatedBonuses, BonusKind, TraitClassification,
    TraitSet,
};
use rust_decimal::Decimal;
use tracing::warn;

/// Body trait bonus on a match (0.65).
pub const BODY_MATCH_BONUS: Decimal = Decimal::from_parts(65, 0, 0, false, 2);

/// Body trait penalty on a mismatch (0.25).
pub const BODY_MISMATCH_PENALTY: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Hand trait bonus on a match (0.35).
pub const HAND_MATCH_BONUS: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// Hand trait penalty on a mismatch (0.10).
pub const HAND_MISMATCH_PENALTY: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// How a trait's affinity relates to the node's.
pub fn classify(trait_affinity: Option<Affinity>, node: Affinity) -> AffinityMatch {
    match trait_affinity.filter(|affinity| !affinity.is_normal()) {
        None => AffinityMatch::Neutral,
        Some(affinity) if affinity == node => AffinityMatch::Match,
        Some(_) => AffinityMatch::Mismatch,
    }
}

/// The affinity of a trait, `None` when its type is unrecognised.
pub fn trait_affinity(classification: &TraitClassification) -> Option<Affinity> {
    let affinity = classification.affinity();
    if affinity.is_none() {
        warn!(
            category = ?classification.category,
            trait_type = %classification.type_name,
            "Unrecognised trait affinity; treating as Normal"
        );
    }
    affinity
}

/// The aggregated `fertilityBoost` percentage as a fraction (`18` -> `0.18`).
pub fn fertility_fraction(bonuses: &AggregatedBonuses) -> Decimal {
    bonuses
        .percent(&BonusKind::FertilityBoost)
        .checked_div(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Body and hand affinities of a creature with both slots filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitAffinities {
    /// Body trait affinity; `None` reads as `Normal`.
    pub body: Option<Affinity>,
    /// Hand trait affinity; `None` reads as `Normal`.
    pub hand: Option<Affinity>,
}

impl TraitAffinities {
    /// Read the body and hand slots. `None` unless both are present.
    pub fn from_traits(traits: &TraitSet) -> Option<Self> {
        let body = traits.body.as_ref()?;
        let hand = traits.hand.as_ref()?;
        Some(Self {
            body: trait_affinity(body),
            hand: trait_affinity(hand),
        })
    }
}

/// Breakdown for a creature at a node.
///
/// Neutral unless both the node's affinity and the creature's trait pair
/// are known.
pub fn creature_breakdown(
    traits: Option<TraitAffinities>,
    node: Option<Affinity>,
    fertility: Decimal,
) -> AffinityBreakdown {
    match (traits, node) {
        (Some(traits), Some(node)) => affinity_breakdown(traits.body, traits.hand, node, fertility),
        _ => neutral_breakdown(),
    }
}

/// Signed contribution of one trait.
fn contribution(
    matched: AffinityMatch,
    match_bonus: Decimal,
    mismatch_penalty: Decimal,
    fertility: Decimal,
) -> Decimal {
    match matched {
        AffinityMatch::Neutral => Decimal::ZERO,
        AffinityMatch::Match => match_bonus.saturating_add(fertility),
        AffinityMatch::Mismatch => Decimal::ZERO.saturating_sub(mismatch_penalty),
    }
}

/// Body and hand contributions against one node affinity.
pub fn affinity_breakdown(
    body: Option<Affinity>,
    hand: Option<Affinity>,
    node: Affinity,
    fertility: Decimal,
) -> AffinityBreakdown {
    let body_match = classify(body, node);
    let body_contribution = contribution(
        body_match,
        BODY_MATCH_BONUS,
        BODY_MISMATCH_PENALTY,
        fertility,
    );
    let hand_match = classify(hand, node);
    let hand_contribution = contribution(
        hand_match,
        HAND_MATCH_BONUS,
        HAND_MISMATCH_PENALTY,
        fertility,
    );

    AffinityBreakdown {
        body_match,
        body_contribution,
        hand_match,
        hand_contribution,
        total: Decimal::ONE
            .saturating_add(body_contribution)
            .saturating_add(hand_contribution),
    }
}

/// The breakdown used when no node affinity is known: both traits neutral,
/// multiplier exactly `1.0`.
pub const fn neutral_breakdown() -> AffinityBreakdown {
    AffinityBreakdown {
        body_match: AffinityMatch::Neutral,
        body_contribution: Decimal::ZERO,
        hand_match: AffinityMatch::Neutral,
        hand_contribution: Decimal::ZERO,
        total: Decimal::ONE,
    }
}

/// The affinity multiplier (`1.0` = neutral).
pub fn affinity_bonus(
    body: Option<Affinity>,
    hand: Option<Affinity>,
    node: Affinity,
    fertility: Decimal,
) -> Decimal {
    affinity_breakdown(body, hand, node, fertility).total
}
