//! Narrative formatting shared by the rule catalog.

/// Render an amount with thousands separators and at most three fractional digits, trimming
/// trailing zeros (`12500` -> `12,500`, `10000.01` -> `10,000.01`).
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.3}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (whole != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Ratio rendered as a percentage with one decimal place (`0.6` -> `60.0%`).
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Ratio rendered as a percentage without superfluous decimals (`0.5` -> `50%`).
pub fn format_threshold_percent(ratio: f64) -> String {
    let rendered = format!("{:.3}", ratio * 100.0);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}
