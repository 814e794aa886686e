//! Number, volume, and age formatting shared by every section.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::Tone;

/// Direction of a move. Zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(value: Decimal) -> Self {
        if value >= Decimal::ZERO {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// `+` for up moves; down moves carry their own `-`.
    pub fn sign(&self) -> &'static str {
        match self {
            Trend::Up => "+",
            Trend::Down => "",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Trend::Up => Tone::Positive,
            Trend::Down => Tone::Negative,
        }
    }
}

/// `+` for values at or above zero, nothing otherwise.
pub fn sign_prefix(value: Decimal) -> &'static str {
    Trend::of(value).sign()
}

/// Formats `value` with exactly `dp` decimals, rounding halves away from zero.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// `$` followed by two decimals, e.g. `$80.00` or `$-1.50`.
pub fn format_currency(value: Decimal) -> String {
    format!("${}", fixed(value, 2))
}

/// Signed absolute change, e.g. `+1.25` or `-0.40`.
pub fn format_change(change: Decimal) -> String {
    format!("{}{}", Trend::of(change).sign(), fixed(change, 2))
}

/// Percent with the sign taken from `trend`, e.g. `+1.23%`.
///
/// The sign follows the absolute change rather than the percent itself so
/// the two always agree on screen.
pub fn format_percent(pct: Decimal, trend: Trend) -> String {
    format!("{}{}%", trend.sign(), fixed(pct, 2))
}

/// `{change} ({percent})`, both signed by the change.
pub fn format_change_with_percent(change: Decimal, pct: Decimal) -> String {
    let trend = Trend::of(change);
    format!("{}{} ({})", trend.sign(), fixed(change, 2), format_percent(pct, trend))
}

/// Compact volume: `1.3M`, `12K`, or the raw value below a thousand.
pub fn format_volume(volume: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    if volume >= million {
        format!("{}M", fixed(volume / million, 1))
    } else if volume >= thousand {
        format!("{}K", fixed(volume / thousand, 0))
    } else {
        volume.normalize().to_string()
    }
}

/// Age of `published` relative to `now`: `Nm ago`, `Nh ago`, or `Nd ago`.
///
/// Each tier floors, so 59m59s is `59m ago` and 23h59m is `23h ago`.
pub fn format_time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - published).num_milliseconds().div_euclid(60_000);
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins.div_euclid(60);
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours.div_euclid(24))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn currency_always_has_two_decimals() {
        assert_eq!(format_currency(dec!(80)), "$80.00");
        assert_eq!(format_currency(dec!(79.5)), "$79.50");
        assert_eq!(format_currency(dec!(1.005)), "$1.01");
        assert_eq!(format_currency(dec!(-1.5)), "$-1.50");
    }

    #[test]
    fn zero_change_is_positive() {
        assert_eq!(Trend::of(dec!(0)), Trend::Up);
        assert_eq!(format_change(dec!(0)), "+0.00");
        assert_eq!(format_change_with_percent(dec!(0), dec!(0)), "+0.00 (+0.00%)");
    }

    #[test]
    fn sign_prefix_only_for_non_negative() {
        assert_eq!(sign_prefix(dec!(0)), "+");
        assert_eq!(sign_prefix(dec!(0.01)), "+");
        assert_eq!(sign_prefix(dec!(-0.01)), "");
    }

    #[test]
    fn negative_change_keeps_own_minus() {
        assert_eq!(format_change(dec!(-1)), "-1.00");
        assert_eq!(
            format_change_with_percent(dec!(-1.00), dec!(-1.23)),
            "-1.00 (-1.23%)"
        );
    }

    #[test]
    fn volume_tiers() {
        assert_eq!(format_volume(dec!(999)), "999");
        assert_eq!(format_volume(dec!(1000)), "1K");
        assert_eq!(format_volume(dec!(1500)), "2K");
        assert_eq!(format_volume(dec!(999499)), "999K");
        assert_eq!(format_volume(dec!(1500000)), "1.5M");
        assert_eq!(format_volume(dec!(1250000)), "1.3M");
        assert_eq!(format_volume(dec!(0)), "0");
    }

    #[test]
    fn time_ago_minutes() {
        assert_eq!(format_time_ago(now(), now()), "0m ago");
        assert_eq!(format_time_ago(now() - Duration::seconds(59), now()), "0m ago");
        assert_eq!(format_time_ago(now() - Duration::minutes(59), now()), "59m ago");
    }

    #[test]
    fn time_ago_hour_boundary() {
        assert_eq!(format_time_ago(now() - Duration::minutes(60), now()), "1h ago");
        assert_eq!(
            format_time_ago(now() - Duration::minutes(23 * 60 + 59), now()),
            "23h ago"
        );
    }

    #[test]
    fn time_ago_day_boundary() {
        assert_eq!(format_time_ago(now() - Duration::hours(24), now()), "1d ago");
        assert_eq!(format_time_ago(now() - Duration::hours(73), now()), "3d ago");
    }
}
