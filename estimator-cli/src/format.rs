//! Terminal formatting for estimates and dollar amounts.

use estimator_core::{Estimate, PriceRange};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a whole-dollar amount with thousands separators.
pub fn format_dollars(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}")
}

/// Formats a price range as `$min - $max`.
pub fn format_range(range: &PriceRange) -> String {
    format!(
        "${} - ${}",
        format_dollars(range.min),
        format_dollars(range.max)
    )
}

/// Renders the three tiers with their taglines, one per line.
pub fn render_estimate(estimate: &Estimate) -> String {
    let rows = [
        ("Basic", &estimate.basic, "Good for MVP / small scope"),
        ("Standard", &estimate.standard, "Well-rounded product"),
        ("Premium", &estimate.premium, "Enterprise-grade, long-term"),
    ];

    let mut out = String::new();
    for (tier, range, tagline) in rows {
        let formatted = format_range(range);
        out.push_str(&format!("  {tier:<9} {formatted:<21} {tagline}\n"));
    }
    out
}
