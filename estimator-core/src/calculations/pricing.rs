//! Pricing estimation engine for the instant project estimator.
//!
//! This module maps the accumulated wizard input to a three-tier price
//! range. Every constant involved is configuration data on
//! [`PricingConfig`], not code, so rates can be tuned without touching the
//! algorithm.
//!
//! # Fixed-scope services
//!
//! All services except Hire Developers price a project subtotal first and
//! then spread it into tiers:
//!
//! | Step | Rule |
//! |------|------|
//! | 1    | Start from the service base rate |
//! | 2    | Web Development / CMS & Ecommerce: add (pages − 1) × extra page rate |
//! | 3    | Add integrations × integration rate |
//! | 4    | App Development: add base × platform factor per extra native platform |
//! | 5    | Add the surcharge of every selected feature |
//! | 6    | Multiply by the complexity multiplier |
//! | 7    | Multiply by the rush multiplier when rush delivery is requested |
//! | 8    | Spread the subtotal into Basic/Standard/Premium ranges |
//!
//! # Hire Developers
//!
//! Hourly work skips the subtotal entirely: each tier scales the requested
//! developer hours by its hours factor, prices them at the hourly base
//! rate, and applies its own spread. Complexity and rush do not apply.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimator_core::calculations::{PricingCalculator, PricingConfig};
//! use estimator_core::{Features, ProjectInput};
//!
//! // A five-page website with one integration and no extra features.
//! let input = ProjectInput {
//!     features: Features::default(),
//!     ..ProjectInput::default()
//! };
//!
//! let config = PricingConfig::default();
//! let estimate = PricingCalculator::new(&config).calculate(&input).unwrap();
//!
//! // Subtotal: 2500 + 4 × 150 + 1 × 400 = 3500
//! assert_eq!(estimate.standard.min, dec!(3325));
//! assert_eq!(estimate.standard.max, dec!(4375));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{
    Complexity, Estimate, Features, Platforms, PriceRange, ProjectInput, ServiceCategory,
};

/// Errors raised by pricing calculations.
///
/// Configuration variants come from [`PricingConfig::validate`]; the
/// input-bound variants reject values outside the constrained domain
/// instead of silently computing on them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A service base rate must be positive.
    #[error("base rate for {service} must be positive, got {rate}")]
    InvalidBaseRate {
        service: ServiceCategory,
        rate: Decimal,
    },

    /// A per-unit rate or surcharge must not be negative.
    #[error("{name} must not be negative, got {value}")]
    NegativeRate { name: &'static str, value: Decimal },

    /// A complexity multiplier must be positive.
    #[error("complexity multiplier for {level} must be positive, got {value}")]
    InvalidComplexityMultiplier {
        level: &'static str,
        value: Decimal,
    },

    /// The rush multiplier is a surcharge and must not discount.
    #[error("rush multiplier must be at least 1, got {0}")]
    InvalidRushMultiplier(Decimal),

    /// An hourly tier hours factor must be positive.
    #[error("hours factor for the {tier} tier must be positive, got {value}")]
    InvalidHoursFactor {
        tier: &'static str,
        value: Decimal,
    },

    /// A tier spread factor must not be negative.
    #[error("spread factors for the {tier} tier must not be negative, got {value}")]
    NegativeSpreadFactor {
        tier: &'static str,
        value: Decimal,
    },

    /// A tier spread must satisfy `min_factor <= max_factor`.
    #[error("spread for the {tier} tier is inverted: min factor {min_factor} exceeds max factor {max_factor}")]
    InvertedTierSpread {
        tier: &'static str,
        min_factor: Decimal,
        max_factor: Decimal,
    },

    /// The web page count is below the minimum of one.
    #[error("web page count must be at least 1, got {0}")]
    WebPagesOutOfRange(u32),

    /// The integration count exceeds the supported maximum of ten.
    #[error("integration count must be at most 10, got {0}")]
    TooManyIntegrations(u32),

    /// The developer hours are outside the supported 10..=800 range.
    #[error("developer hours must be between 10 and 800, got {0}")]
    DevHoursOutOfRange(u32),
}

/// Base rate per service category, in dollars.
///
/// The Hire Developers rate is hourly; every other rate is per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRates {
    pub generative_ai: Decimal,
    pub cloud_services: Decimal,
    pub web_development: Decimal,
    pub app_development: Decimal,
    pub cms_ecommerce: Decimal,
    pub digital_marketing: Decimal,
    pub designing: Decimal,
    pub hire_developers: Decimal,
}

impl BaseRates {
    /// Returns the base rate for a service category.
    pub fn rate(
        &self,
        service: ServiceCategory,
    ) -> Decimal {
        match service {
            ServiceCategory::GenerativeAi => self.generative_ai,
            ServiceCategory::CloudServices => self.cloud_services,
            ServiceCategory::WebDevelopment => self.web_development,
            ServiceCategory::AppDevelopment => self.app_development,
            ServiceCategory::CmsEcommerce => self.cms_ecommerce,
            ServiceCategory::DigitalMarketing => self.digital_marketing,
            ServiceCategory::Designing => self.designing,
            ServiceCategory::HireDevelopers => self.hire_developers,
        }
    }
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            generative_ai: Decimal::from(4000),
            cloud_services: Decimal::from(3000),
            web_development: Decimal::from(2500),
            app_development: Decimal::from(6000),
            cms_ecommerce: Decimal::from(2000),
            digital_marketing: Decimal::from(500),
            designing: Decimal::from(300),
            hire_developers: Decimal::from(20),
        }
    }
}

/// Flat surcharge per selected feature, in dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSurcharges {
    pub auth: Decimal,
    pub payments: Decimal,
    pub admin_panel: Decimal,
    pub api: Decimal,
}

impl FeatureSurcharges {
    /// Sum of the surcharges for the selected features.
    pub fn total(
        &self,
        features: &Features,
    ) -> Decimal {
        let mut total = Decimal::ZERO;
        if features.auth {
            total += self.auth;
        }
        if features.payments {
            total += self.payments;
        }
        if features.admin_panel {
            total += self.admin_panel;
        }
        if features.api {
            total += self.api;
        }
        total
    }
}

impl Default for FeatureSurcharges {
    fn default() -> Self {
        Self {
            auth: Decimal::from(600),
            payments: Decimal::from(900),
            admin_panel: Decimal::from(1200),
            api: Decimal::from(800),
        }
    }
}

/// Subtotal multiplier per complexity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityMultipliers {
    pub basic: Decimal,
    pub standard: Decimal,
    pub advanced: Decimal,
}

impl ComplexityMultipliers {
    pub fn for_level(
        &self,
        level: Complexity,
    ) -> Decimal {
        match level {
            Complexity::Basic => self.basic,
            Complexity::Standard => self.standard,
            Complexity::Advanced => self.advanced,
        }
    }
}

impl Default for ComplexityMultipliers {
    fn default() -> Self {
        Self {
            basic: Decimal::new(90, 2),
            standard: Decimal::ONE,
            advanced: Decimal::new(150, 2),
        }
    }
}

/// A pair of factors spreading an amount into a [`PriceRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpread {
    pub min_factor: Decimal,
    pub max_factor: Decimal,
}

impl TierSpread {
    /// Applies the spread to an amount, rounding each bound independently.
    pub fn apply(
        &self,
        amount: Decimal,
    ) -> PriceRange {
        PriceRange {
            min: round_half_up(amount * self.min_factor),
            max: round_half_up(amount * self.max_factor),
        }
    }

    fn validate(
        &self,
        tier: &'static str,
    ) -> Result<(), PricingError> {
        if self.min_factor < Decimal::ZERO {
            return Err(PricingError::NegativeSpreadFactor {
                tier,
                value: self.min_factor,
            });
        }
        if self.max_factor < Decimal::ZERO {
            return Err(PricingError::NegativeSpreadFactor {
                tier,
                value: self.max_factor,
            });
        }
        if self.min_factor > self.max_factor {
            return Err(PricingError::InvertedTierSpread {
                tier,
                min_factor: self.min_factor,
                max_factor: self.max_factor,
            });
        }
        Ok(())
    }
}

/// Tier spreads for fixed-scope services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSpreads {
    pub basic: TierSpread,
    pub standard: TierSpread,
    pub premium: TierSpread,
}

impl Default for TierSpreads {
    fn default() -> Self {
        Self {
            basic: TierSpread {
                min_factor: Decimal::new(85, 2),
                max_factor: Decimal::new(105, 2),
            },
            standard: TierSpread {
                min_factor: Decimal::new(95, 2),
                max_factor: Decimal::new(125, 2),
            },
            premium: TierSpread {
                min_factor: Decimal::new(120, 2),
                max_factor: Decimal::new(160, 2),
            },
        }
    }
}

/// Hours factors and spreads for the hourly (Hire Developers) branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyTiers {
    pub basic_hours_factor: Decimal,
    pub standard_hours_factor: Decimal,
    pub premium_hours_factor: Decimal,
    pub basic_spread: TierSpread,
    pub standard_spread: TierSpread,
    pub premium_spread: TierSpread,
}

impl Default for HourlyTiers {
    fn default() -> Self {
        Self {
            basic_hours_factor: Decimal::new(60, 2),
            standard_hours_factor: Decimal::ONE,
            premium_hours_factor: Decimal::new(150, 2),
            basic_spread: TierSpread {
                min_factor: Decimal::new(90, 2),
                max_factor: Decimal::new(110, 2),
            },
            standard_spread: TierSpread {
                min_factor: Decimal::new(90, 2),
                max_factor: Decimal::new(115, 2),
            },
            premium_spread: TierSpread {
                min_factor: Decimal::new(95, 2),
                max_factor: Decimal::new(120, 2),
            },
        }
    }
}

/// Complete pricing rule table.
///
/// The defaults reproduce the published estimator rates; any field can be
/// overridden through deserialization (missing keys keep their defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_rates: BaseRates,
    /// Dollars per web page beyond the first.
    pub extra_page_rate: Decimal,
    /// Dollars per third-party integration.
    pub integration_rate: Decimal,
    /// Share of the base rate added per extra native platform.
    pub extra_platform_factor: Decimal,
    pub feature_surcharges: FeatureSurcharges,
    pub complexity_multipliers: ComplexityMultipliers,
    pub rush_multiplier: Decimal,
    pub tier_spreads: TierSpreads,
    pub hourly_tiers: HourlyTiers,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rates: BaseRates::default(),
            extra_page_rate: Decimal::from(150),
            integration_rate: Decimal::from(400),
            extra_platform_factor: Decimal::new(40, 2),
            feature_surcharges: FeatureSurcharges::default(),
            complexity_multipliers: ComplexityMultipliers::default(),
            rush_multiplier: Decimal::new(125, 2),
            tier_spreads: TierSpreads::default(),
            hourly_tiers: HourlyTiers::default(),
        }
    }
}

impl PricingConfig {
    /// Validates the rule table.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if any base rate or multiplier is outside
    /// its valid range, or if a tier spread is inverted.
    pub fn validate(&self) -> Result<(), PricingError> {
        for service in ServiceCategory::ALL {
            let rate = self.base_rates.rate(service);
            if rate <= Decimal::ZERO {
                return Err(PricingError::InvalidBaseRate { service, rate });
            }
        }

        Self::non_negative("extra page rate", self.extra_page_rate)?;
        Self::non_negative("integration rate", self.integration_rate)?;
        Self::non_negative("extra platform factor", self.extra_platform_factor)?;
        Self::non_negative("auth surcharge", self.feature_surcharges.auth)?;
        Self::non_negative("payments surcharge", self.feature_surcharges.payments)?;
        Self::non_negative("admin panel surcharge", self.feature_surcharges.admin_panel)?;
        Self::non_negative("api surcharge", self.feature_surcharges.api)?;

        let multipliers = [
            ("Basic", self.complexity_multipliers.basic),
            ("Standard", self.complexity_multipliers.standard),
            ("Advanced", self.complexity_multipliers.advanced),
        ];
        for (level, value) in multipliers {
            if value <= Decimal::ZERO {
                return Err(PricingError::InvalidComplexityMultiplier { level, value });
            }
        }

        if self.rush_multiplier < Decimal::ONE {
            return Err(PricingError::InvalidRushMultiplier(self.rush_multiplier));
        }

        self.tier_spreads.basic.validate("basic")?;
        self.tier_spreads.standard.validate("standard")?;
        self.tier_spreads.premium.validate("premium")?;

        let hours_factors = [
            ("hourly basic", self.hourly_tiers.basic_hours_factor),
            ("hourly standard", self.hourly_tiers.standard_hours_factor),
            ("hourly premium", self.hourly_tiers.premium_hours_factor),
        ];
        for (tier, value) in hours_factors {
            if value <= Decimal::ZERO {
                return Err(PricingError::InvalidHoursFactor { tier, value });
            }
        }

        self.hourly_tiers.basic_spread.validate("hourly basic")?;
        self.hourly_tiers.standard_spread.validate("hourly standard")?;
        self.hourly_tiers.premium_spread.validate("hourly premium")?;

        Ok(())
    }

    fn non_negative(
        name: &'static str,
        value: Decimal,
    ) -> Result<(), PricingError> {
        if value < Decimal::ZERO {
            return Err(PricingError::NegativeRate { name, value });
        }
        Ok(())
    }
}

/// Calculator mapping a [`ProjectInput`] to a three-tier [`Estimate`].
///
/// Pure and deterministic: identical input always yields an identical
/// estimate, and the full estimate is cheap enough to recompute on every
/// input change.
#[derive(Debug, Clone)]
pub struct PricingCalculator<'a> {
    config: &'a PricingConfig,
}

impl<'a> PricingCalculator<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Calculates the estimate for the given input.
    ///
    /// Fields irrelevant to the active service are ignored, including their
    /// bounds: a stale `dev_hours` never fails a Web Development estimate.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the configuration is invalid or a field
    /// the active service reads is outside its constrained range.
    pub fn calculate(
        &self,
        input: &ProjectInput,
    ) -> Result<Estimate, PricingError> {
        self.config.validate()?;
        self.validate_input(input)?;

        if input.service.is_hourly() {
            Ok(self.hourly_estimate(input))
        } else {
            Ok(self.fixed_scope_estimate(input))
        }
    }

    fn validate_input(
        &self,
        input: &ProjectInput,
    ) -> Result<(), PricingError> {
        if input.service.is_hourly() {
            let range = ProjectInput::MIN_DEV_HOURS..=ProjectInput::MAX_DEV_HOURS;
            if !range.contains(&input.dev_hours) {
                return Err(PricingError::DevHoursOutOfRange(input.dev_hours));
            }
            return Ok(());
        }

        if input.service.uses_page_count() && input.web_pages < ProjectInput::MIN_WEB_PAGES {
            return Err(PricingError::WebPagesOutOfRange(input.web_pages));
        }
        if input.integrations > ProjectInput::MAX_INTEGRATIONS {
            return Err(PricingError::TooManyIntegrations(input.integrations));
        }
        Ok(())
    }

    fn fixed_scope_estimate(
        &self,
        input: &ProjectInput,
    ) -> Estimate {
        let base = self.config.base_rates.rate(input.service);

        let mut subtotal = base;
        subtotal += self.page_surcharge(input.service, input.web_pages);
        subtotal += self.integration_surcharge(input.integrations);
        subtotal += self.platform_surcharge(input.service, base, &input.platforms);
        subtotal += self.config.feature_surcharges.total(&input.features);

        subtotal *= self.config.complexity_multipliers.for_level(input.complexity);
        if input.rush {
            subtotal *= self.config.rush_multiplier;
        }

        let spreads = &self.config.tier_spreads;
        Estimate {
            basic: spreads.basic.apply(subtotal),
            standard: spreads.standard.apply(subtotal),
            premium: spreads.premium.apply(subtotal),
        }
    }

    /// Charge for pages beyond the first, on page-priced services only.
    fn page_surcharge(
        &self,
        service: ServiceCategory,
        web_pages: u32,
    ) -> Decimal {
        if !service.uses_page_count() {
            return Decimal::ZERO;
        }
        Decimal::from(web_pages.saturating_sub(1)) * self.config.extra_page_rate
    }

    fn integration_surcharge(
        &self,
        integrations: u32,
    ) -> Decimal {
        Decimal::from(integrations) * self.config.integration_rate
    }

    /// Surcharge for each native platform beyond the first.
    ///
    /// The base rate assumes a single platform. Web never counts toward
    /// the multiplier even when selected alongside iOS and Android.
    fn platform_surcharge(
        &self,
        service: ServiceCategory,
        base: Decimal,
        platforms: &Platforms,
    ) -> Decimal {
        if !service.uses_platforms() {
            return Decimal::ZERO;
        }

        let native = platforms.native_count();
        if native == 0 {
            warn!(service = %service, "no native platform selected; pricing as a single platform");
            return Decimal::ZERO;
        }
        if native == 1 {
            return Decimal::ZERO;
        }

        base * self.config.extra_platform_factor * Decimal::from(native - 1)
    }

    fn hourly_estimate(
        &self,
        input: &ProjectInput,
    ) -> Estimate {
        let hourly = self.config.base_rates.rate(input.service);
        let tiers = &self.config.hourly_tiers;

        Estimate {
            basic: self.hourly_tier(
                hourly,
                input.dev_hours,
                tiers.basic_hours_factor,
                tiers.basic_spread,
            ),
            standard: self.hourly_tier(
                hourly,
                input.dev_hours,
                tiers.standard_hours_factor,
                tiers.standard_spread,
            ),
            premium: self.hourly_tier(
                hourly,
                input.dev_hours,
                tiers.premium_hours_factor,
                tiers.premium_spread,
            ),
        }
    }

    /// Prices one hourly tier: scaled hours are rounded to whole hours
    /// before the rate applies, then the spread widens the amount.
    fn hourly_tier(
        &self,
        hourly: Decimal,
        dev_hours: u32,
        hours_factor: Decimal,
        spread: TierSpread,
    ) -> PriceRange {
        let hours = round_half_up(Decimal::from(dev_hours) * hours_factor);
        spread.apply(hourly * hours)
    }
}
