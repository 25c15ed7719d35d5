//! Pricing calculation modules for the instant project estimator.
//!
//! This module provides the deterministic estimation engine that maps the
//! accumulated wizard input to a three-tier price range.

pub mod common;
pub mod pricing;

pub use pricing::{
    BaseRates, ComplexityMultipliers, FeatureSurcharges, HourlyTiers, PricingCalculator,
    PricingConfig, PricingError, TierSpread, TierSpreads,
};
