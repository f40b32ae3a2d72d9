//! `RollBonus(RollType, Value, ...)` valuation.

use super::archetype::{ArchetypeProfile, RollKind};
use super::{BoostCategory, ClassifiedBoost};

/// Scale used whenever the bonus value is missing, malformed, or not positive.
pub const FALLBACK_SCALE: f32 = 1.0;

pub(crate) fn classify(segment: &str, profile: &ArchetypeProfile) -> Option<ClassifiedBoost> {
    let open = segment.find('(')?;
    let args = &segment[open + 1..];

    let type_end = args.find([',', ')']).unwrap_or(args.len());
    let roll_type = args[..type_end].trim();
    let kind = RollKind::from_roll_type(roll_type);

    let scale = args[type_end..]
        .strip_prefix(',')
        .map(|rest| {
            let value_end = rest.find([',', ')']).unwrap_or(rest.len());
            bonus_scale(&rest[..value_end])
        })
        .unwrap_or(FALLBACK_SCALE);

    Some(ClassifiedBoost {
        category: BoostCategory::RollBonus(kind),
        name: format!("RollBonus_{roll_type}"),
        multiplier: profile.roll_bonus(kind) * scale,
    })
}

/// Magnitude of a roll-bonus value.
///
/// - `NdM` evaluates to the mean roll `N * (M + 1) / 2` (`dM` means `1dM`)
/// - a bare positive number is used as-is
/// - anything else, or any result `<= 0`, yields [`FALLBACK_SCALE`]
///
/// A leading minus sign is dropped: the sign marks a debuff but only the
/// magnitude is scored.
pub fn bonus_scale(raw: &str) -> f32 {
    let trimmed = raw.trim();
    let magnitude = trimmed.strip_prefix('-').unwrap_or(trimmed).trim();

    let value = match magnitude.to_ascii_lowercase().split_once('d') {
        Some((count, sides)) => dice_mean(count, sides),
        None => magnitude.parse::<f32>().ok(),
    };

    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => FALLBACK_SCALE,
    }
}

fn dice_mean(count: &str, sides: &str) -> Option<f32> {
    let count: u32 = if count.is_empty() {
        1
    } else {
        count.parse().ok()?
    };
    let sides: u32 = sides.parse().ok()?;
    Some(count as f32 * (sides as f32 + 1.0) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_use_their_mean() {
        assert_eq!(bonus_scale("1d4"), 2.5);
        assert_eq!(bonus_scale("2d6"), 7.0);
        assert_eq!(bonus_scale("d8"), 4.5);
        assert_eq!(bonus_scale("1D4"), 2.5);
    }

    #[test]
    fn test_negative_values_keep_magnitude() {
        assert_eq!(bonus_scale("-2"), 2.0);
        assert_eq!(bonus_scale("-1d4"), 2.5);
    }

    #[test]
    fn test_malformed_or_non_positive_values_fall_back() {
        assert_eq!(bonus_scale("abc"), FALLBACK_SCALE);
        assert_eq!(bonus_scale("0"), FALLBACK_SCALE);
        assert_eq!(bonus_scale(""), FALLBACK_SCALE);
        assert_eq!(bonus_scale("0d6"), FALLBACK_SCALE);
        assert_eq!(bonus_scale("1d4+2"), FALLBACK_SCALE);
        assert_eq!(bonus_scale("NaN"), FALLBACK_SCALE);
    }

    #[test]
    fn test_roll_type_stops_at_first_comma_or_paren() {
        let profile = ArchetypeProfile::default();

        let boost = classify("RollBonus(SavingThrow,1d4,Wisdom)", &profile).unwrap();
        assert_eq!(boost.name, "RollBonus_SavingThrow");
        assert_eq!(boost.multiplier, profile.roll_bonus_saving_throw * 2.5);

        let bare = classify("RollBonus(Damage)", &profile).unwrap();
        assert_eq!(bare.name, "RollBonus_Damage");
        assert_eq!(bare.multiplier, profile.roll_bonus_damage);
    }
}
