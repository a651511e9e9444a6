//! Bonus descriptor parsing.
//!
//! Catalog descriptors are short human strings such as `"1 Power"`,
//! `"6% Fertility Boost"`, `"5/hr Intensity Boost"` or
//! `"-10s Standard Cooldown Shift"`. [`parse_bonus`] turns one into a
//! [`ParsedBonus`]. Malformed descriptors yield `None`; callers treat that as
//! "no bonus contributed".
//!
//! # Shapes
//!
//! Tried in order against the lower-cased, trimmed input:
//!
//! | Shape        | Pattern                   | Unit      |
//! |--------------|---------------------------|-----------|
//! | percentage   | `<number> ?% <label>`     | `Percent` |
//! | per-hour     | `<number>/hr <label>`     | `PerHour` |
//! | seconds      | `<integer>s <label>`      | `Flat`    |
//! | flat         | `<number> <label>`        | `Flat`    |
//!
//! `<number>` is an optionally negative decimal (`-2.5`).

use std::str::FromStr;

use kami_types::{BonusKind, BonusUnit, ParsedBonus};
use rust_decimal::Decimal;

/// A numeric prefix split off a descriptor.
struct NumberPrefix<'a> {
    text: &'a str,
    is_integer: bool,
}

/// Parse a bonus descriptor.
///
/// Pure and deterministic; returns `None` when no shape matches or the
/// magnitude does not fit a [`Decimal`].
pub fn parse_bonus(descriptor: &str) -> Option<ParsedBonus> {
    let lowered = descriptor.trim().to_lowercase();
    let (number, rest) = split_number(&lowered)?;
    let value = Decimal::from_str(number.text).ok()?;

    if let Some(label) = rest.trim_start().strip_prefix('%') {
        return labelled(label, value, BonusUnit::Percent);
    }

    if let Some(label) = rest.strip_prefix("/hr") {
        return labelled(label, value, BonusUnit::PerHour);
    }

    if number.is_integer
        && let Some(label) = rest.strip_prefix('s')
        && label.starts_with(char::is_whitespace)
    {
        return labelled(label, value, BonusUnit::Flat);
    }

    if rest.starts_with(char::is_whitespace) {
        return labelled(rest, value, BonusUnit::Flat);
    }

    None
}

/// Split `-?\d+(\.\d+)?` off the front of `input`.
fn split_number(input: &str) -> Option<(NumberPrefix<'_>, &str)> {
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    let sign_len = input.len().checked_sub(unsigned.len())?;

    let int_len = leading_digits(unsigned);
    if int_len == 0 {
        return None;
    }

    let after_int = unsigned.get(int_len..)?;
    let frac_len = after_int
        .strip_prefix('.')
        .map(leading_digits)
        .filter(|len| *len > 0)
        .map_or(0, |len| len.saturating_add(1));

    let number_len = sign_len.checked_add(int_len)?.checked_add(frac_len)?;
    let text = input.get(..number_len)?;
    let rest = input.get(number_len..)?;
    Some((
        NumberPrefix {
            text,
            is_integer: frac_len == 0,
        },
        rest,
    ))
}

/// Byte length of the ASCII digit run at the start of `s`.
fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Build the bonus once a shape has matched; the label must be non-empty.
fn labelled(label: &str, value: Decimal, unit: BonusUnit) -> Option<ParsedBonus> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(ParsedBonus::new(normalize_label(label), value, unit))
}

/// Map a descriptor label to its canonical key.
///
/// Whitespace runs are collapsed before lookup. Labels outside the table
/// become lower-camel slugs (`"loot drop boost"` -> `lootDropBoost`).
pub fn normalize_label(label: &str) -> BonusKind {
    let words: Vec<String> = label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let collapsed = words.join(" ");

    match collapsed.as_str() {
        "power" => BonusKind::Power,
        "health" => BonusKind::Health,
        "harmony" => BonusKind::Harmony,
        "violence" => BonusKind::Violence,
        "fertility boost" => BonusKind::FertilityBoost,
        "bounty boost" => BonusKind::BountyBoost,
        "metabolism boost" => BonusKind::MetabolismBoost,
        "intensity boost" => BonusKind::IntensityBoost,
        "strain" => BonusKind::Strain,
        "defense shift" => BonusKind::DefenseShift,
        "defense ratio" => BonusKind::DefenseRatio,
        "salvage ratio" | "defense salvage ratio" => BonusKind::SalvageRatio,
        "atk spoils ratio" => BonusKind::AtkSpoilsRatio,
        "atk threshold ratio" => BonusKind::AtkThresholdRatio,
        "atk threshold shift" => BonusKind::AtkThresholdShift,
        "standard cooldown shift" => BonusKind::CooldownShift,
        _ => BonusKind::from_tag(&lower_camel(&words)),
    }
}

/// Join lower-case words as a lower-camel slug.
fn lower_camel(words: &[String]) -> String {
    let mut slug = String::new();
    for (position, word) in words.iter().enumerate() {
        let mut chars = word.chars();
        if position == 0 {
            slug.push_str(word);
        } else if let Some(first) = chars.next() {
            slug.extend(first.to_uppercase());
            slug.push_str(chars.as_str());
        }
    }
    slug
}
