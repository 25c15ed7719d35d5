use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A whole-dollar price span with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// The three-tier result of a pricing estimation.
///
/// Tiers deliberately overlap; they reflect scope and quality choices,
/// not strictly ordered price bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub basic: PriceRange,
    pub standard: PriceRange,
    pub premium: PriceRange,
}
