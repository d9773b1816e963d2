use crate::core::primitives::unix_seconds_to_datetime;

/// Short day label such as `Mar 7`; out-of-range timestamps render empty.
#[must_use]
pub fn format_time_label(timestamp: f64) -> String {
    unix_seconds_to_datetime(timestamp)
        .map(|time| time.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// Gridline value with thousand/million abbreviation (`1.5K`, `2M`).
///
/// The value is truncated to an integer first; fractions never show.
#[must_use]
pub fn abbreviate_value(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let number = value.trunc();
    let magnitude = number.abs();
    let sign = if number < 0.0 { "-" } else { "" };

    if magnitude >= 1_000_000.0 {
        format!("{sign}{}M", one_decimal(magnitude / 1_000_000.0))
    } else if magnitude >= 1_000.0 {
        format!("{sign}{}K", one_decimal(magnitude / 1_000.0))
    } else {
        (number as i64).to_string()
    }
}

fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
