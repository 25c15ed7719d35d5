//! Wizard state machine for the instant project estimator.
//!
//! The wizard walks a fixed linear sequence of steps, accumulating a
//! [`ProjectInput`] as the user answers each one:
//!
//! ```text
//! Service → Details → Complexity → Contact → Estimate
//! ```
//!
//! The machine is framework-free: transitions are plain methods with no
//! side effects beyond state mutation, so any front-end can drive it. The
//! only gated transition is Contact → Estimate, which requires an email
//! address of a plausible shape.
//!
//! # Example
//!
//! ```
//! use estimator_core::{ServiceCategory, Wizard, WizardStep};
//! use estimator_core::calculations::PricingConfig;
//!
//! let mut wizard = Wizard::new();
//! wizard.select_service(ServiceCategory::WebDevelopment);
//! assert_eq!(wizard.step(), WizardStep::Details);
//!
//! wizard.advance().unwrap(); // Details → Complexity
//! wizard.advance().unwrap(); // Complexity → Contact
//! wizard.set_email("a@b.co");
//! wizard.advance().unwrap(); // Contact → Estimate
//!
//! let config = PricingConfig::default();
//! let estimate = wizard.estimate(&config).unwrap();
//! assert!(estimate.standard.min <= estimate.standard.max);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::{PricingCalculator, PricingConfig, PricingError};
use crate::models::{
    Complexity, Estimate, Feature, Platform, ProjectInput, QuoteRequest, ServiceCategory,
};

/// One step of the estimate wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Service,
    Details,
    Complexity,
    Contact,
    Estimate,
}

impl WizardStep {
    /// All steps, in order.
    pub const ALL: [WizardStep; 5] = [
        Self::Service,
        Self::Details,
        Self::Complexity,
        Self::Contact,
        Self::Estimate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Details => "Details",
            Self::Complexity => "Complexity",
            Self::Contact => "Contact",
            Self::Estimate => "Estimate",
        }
    }

    /// Zero-based position in the sequence.
    pub fn index(self) -> usize {
        match self {
            Self::Service => 0,
            Self::Details => 1,
            Self::Complexity => 2,
            Self::Contact => 3,
            Self::Estimate => 4,
        }
    }

    pub fn is_first(self) -> bool {
        self == Self::Service
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Estimate
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Service => Some(Self::Details),
            Self::Details => Some(Self::Complexity),
            Self::Complexity => Some(Self::Contact),
            Self::Contact => Some(Self::Estimate),
            Self::Estimate => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            Self::Service => None,
            Self::Details => Some(Self::Service),
            Self::Complexity => Some(Self::Details),
            Self::Contact => Some(Self::Complexity),
            Self::Estimate => Some(Self::Contact),
        }
    }
}

/// Errors raised at the gated Contact → Estimate transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email address is required")]
    MissingEmail,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Non-empty local part, "@", domain containing a dot.
    PATTERN.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}

/// Checks that an email address has a plausible shape.
///
/// This is the shape check the wizard gate uses, exposed so front-ends can
/// validate eagerly while the user types.
///
/// # Errors
///
/// Returns [`ValidationError::MissingEmail`] for an empty address and
/// [`ValidationError::InvalidEmail`] when the shape does not match.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !email_pattern().is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// The estimate wizard: current step plus accumulated input.
///
/// Each session owns its wizard exclusively; there is no shared state and
/// no I/O. The estimate is recomputed from scratch on demand, so no stale
/// intermediate state is ever observable.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    input: ProjectInput,
}

impl Wizard {
    /// Creates a wizard at the Service step with default input.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    /// Moves forward one step.
    ///
    /// The Contact step gates the transition on email validation; every
    /// other step advances unconditionally. At the terminal step this is a
    /// no-op. On failure the step is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when leaving Contact with a missing or
    /// malformed email address.
    pub fn advance(&mut self) -> Result<WizardStep, ValidationError> {
        if self.step == WizardStep::Contact {
            validate_email(&self.input.contact.email)?;
        }
        self.step = self.step.next().unwrap_or(self.step);
        Ok(self.step)
    }

    /// Moves back one step, with no validation. At the first step this is
    /// a no-op.
    pub fn retreat(&mut self) -> WizardStep {
        self.step = self.step.prev().unwrap_or(self.step);
        self.step
    }

    /// Sets the service and, from the Service step, jumps straight to
    /// Details (selecting a service answers the step's question).
    pub fn select_service(
        &mut self,
        service: ServiceCategory,
    ) -> WizardStep {
        self.input.service = service;
        if self.step == WizardStep::Service {
            self.step = WizardStep::Details;
        }
        self.step
    }

    /// Returns to the Service step and resets the input to defaults, so a
    /// restarted session never shows another session's stale answers.
    pub fn restart(&mut self) {
        self.step = WizardStep::Service;
        self.input = ProjectInput::default();
    }

    /// Wizard completion as a percentage, 0 at Service and 100 at Estimate.
    pub fn progress_percent(&self) -> u32 {
        let last = (WizardStep::ALL.len() - 1) as u32;
        let index = self.step.index() as u32;
        (index * 100 + last / 2) / last
    }

    pub fn set_web_pages(
        &mut self,
        pages: u32,
    ) {
        let clamped = pages.max(ProjectInput::MIN_WEB_PAGES);
        if clamped != pages {
            warn!(requested = pages, "web page count clamped to the minimum");
        }
        self.input.web_pages = clamped;
    }

    pub fn set_integrations(
        &mut self,
        count: u32,
    ) {
        let clamped = count.min(ProjectInput::MAX_INTEGRATIONS);
        if clamped != count {
            warn!(requested = count, "integration count clamped to the maximum");
        }
        self.input.integrations = clamped;
    }

    pub fn set_dev_hours(
        &mut self,
        hours: u32,
    ) {
        let clamped = hours.clamp(ProjectInput::MIN_DEV_HOURS, ProjectInput::MAX_DEV_HOURS);
        if clamped != hours {
            warn!(requested = hours, "developer hours clamped to the supported range");
        }
        self.input.dev_hours = clamped;
    }

    /// Flips a platform toggle and returns its new state.
    pub fn toggle_platform(
        &mut self,
        platform: Platform,
    ) -> bool {
        let flag = match platform {
            Platform::Web => &mut self.input.platforms.web,
            Platform::Ios => &mut self.input.platforms.ios,
            Platform::Android => &mut self.input.platforms.android,
        };
        *flag = !*flag;
        *flag
    }

    /// Flips a feature toggle and returns its new state.
    pub fn toggle_feature(
        &mut self,
        feature: Feature,
    ) -> bool {
        let flag = match feature {
            Feature::Auth => &mut self.input.features.auth,
            Feature::Payments => &mut self.input.features.payments,
            Feature::AdminPanel => &mut self.input.features.admin_panel,
            Feature::Api => &mut self.input.features.api,
        };
        *flag = !*flag;
        *flag
    }

    pub fn set_complexity(
        &mut self,
        complexity: Complexity,
    ) {
        self.input.complexity = complexity;
    }

    pub fn set_rush(
        &mut self,
        rush: bool,
    ) {
        self.input.rush = rush;
    }

    /// Stores the company name; blank input clears it.
    pub fn set_company_name(
        &mut self,
        name: &str,
    ) {
        let trimmed = name.trim();
        self.input.contact.company_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn set_email(
        &mut self,
        email: &str,
    ) {
        self.input.contact.email = email.trim().to_string();
    }

    /// Derives the estimate for the current input.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the configuration or input is invalid.
    pub fn estimate(
        &self,
        config: &PricingConfig,
    ) -> Result<Estimate, PricingError> {
        PricingCalculator::new(config).calculate(&self.input)
    }

    /// Packages the current input and estimate for the submission boundary.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the estimate cannot be computed.
    pub fn quote_request(
        &self,
        config: &PricingConfig,
    ) -> Result<QuoteRequest, PricingError> {
        let estimate = self.estimate(config)?;
        Ok(QuoteRequest::new(&self.input, estimate))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// Walks a fresh wizard to the given step without tripping the gate.
    fn wizard_at(step: WizardStep) -> Wizard {
        let mut wizard = Wizard::new();
        wizard.set_email("a@b.co");
        while wizard.step() != step {
            wizard.advance().unwrap();
        }
        wizard
    }

    // =========================================================================
    // WizardStep tests
    // =========================================================================

    #[test]
    fn steps_are_ordered_and_indexed() {
        for (position, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), position);
        }
    }

    #[test]
    fn only_service_is_first_and_only_estimate_is_terminal() {
        for step in WizardStep::ALL {
            assert_eq!(step.is_first(), step == WizardStep::Service);
            assert_eq!(step.is_terminal(), step == WizardStep::Estimate);
        }
    }

    // =========================================================================
    // Forward transition tests
    // =========================================================================

    #[test]
    fn advance_walks_the_linear_sequence() {
        let mut wizard = Wizard::new();
        wizard.set_email("a@b.co");

        assert_eq!(wizard.advance(), Ok(WizardStep::Details));
        assert_eq!(wizard.advance(), Ok(WizardStep::Complexity));
        assert_eq!(wizard.advance(), Ok(WizardStep::Contact));
        assert_eq!(wizard.advance(), Ok(WizardStep::Estimate));
    }

    #[test]
    fn advance_at_terminal_step_stays_put() {
        let mut wizard = wizard_at(WizardStep::Estimate);

        assert_eq!(wizard.advance(), Ok(WizardStep::Estimate));
        assert_eq!(wizard.step(), WizardStep::Estimate);
    }

    #[test]
    fn advance_from_contact_rejects_missing_email() {
        let mut wizard = Wizard::new();
        while wizard.step() != WizardStep::Contact {
            wizard.advance().unwrap();
        }

        let result = wizard.advance();

        assert_eq!(result, Err(ValidationError::MissingEmail));
        assert_eq!(wizard.step(), WizardStep::Contact);
    }

    #[test]
    fn advance_from_contact_rejects_malformed_email() {
        let mut wizard = wizard_at(WizardStep::Contact);
        wizard.set_email("not-an-email");

        let result = wizard.advance();

        assert_eq!(
            result,
            Err(ValidationError::InvalidEmail("not-an-email".to_string()))
        );
        assert_eq!(wizard.step(), WizardStep::Contact);
    }

    #[test]
    fn advance_from_contact_accepts_valid_email() {
        let mut wizard = wizard_at(WizardStep::Contact);
        wizard.set_email("a@b.co");

        let result = wizard.advance();

        assert_eq!(result, Ok(WizardStep::Estimate));
    }

    #[test]
    fn email_is_only_checked_when_leaving_contact() {
        let mut wizard = Wizard::new();

        // No email set; the first three transitions are ungated.
        assert_eq!(wizard.advance(), Ok(WizardStep::Details));
        assert_eq!(wizard.advance(), Ok(WizardStep::Complexity));
        assert_eq!(wizard.advance(), Ok(WizardStep::Contact));
    }

    // =========================================================================
    // Backward transition tests
    // =========================================================================

    #[test]
    fn retreat_walks_back_without_validation() {
        let mut wizard = wizard_at(WizardStep::Estimate);
        wizard.set_email(""); // invalid email must not block going back

        assert_eq!(wizard.retreat(), WizardStep::Contact);
        assert_eq!(wizard.retreat(), WizardStep::Complexity);
        assert_eq!(wizard.retreat(), WizardStep::Details);
        assert_eq!(wizard.retreat(), WizardStep::Service);
    }

    #[test]
    fn retreat_at_first_step_stays_put() {
        let mut wizard = Wizard::new();

        assert_eq!(wizard.retreat(), WizardStep::Service);
    }

    // =========================================================================
    // select_service tests
    // =========================================================================

    #[test]
    fn selecting_a_service_jumps_to_details() {
        let mut wizard = Wizard::new();

        let step = wizard.select_service(ServiceCategory::HireDevelopers);

        assert_eq!(step, WizardStep::Details);
        assert_eq!(wizard.input().service, ServiceCategory::HireDevelopers);
    }

    #[test]
    fn selecting_a_service_later_keeps_the_current_step() {
        let mut wizard = wizard_at(WizardStep::Complexity);

        let step = wizard.select_service(ServiceCategory::Designing);

        assert_eq!(step, WizardStep::Complexity);
        assert_eq!(wizard.input().service, ServiceCategory::Designing);
    }

    // =========================================================================
    // restart tests
    // =========================================================================

    #[test]
    fn restart_returns_to_service_and_clears_input() {
        let mut wizard = wizard_at(WizardStep::Estimate);
        wizard.select_service(ServiceCategory::AppDevelopment);
        wizard.set_integrations(7);
        wizard.set_company_name("Acme");

        wizard.restart();

        assert_eq!(wizard.step(), WizardStep::Service);
        assert_eq!(wizard.input(), &ProjectInput::default());
    }

    // =========================================================================
    // progress tests
    // =========================================================================

    #[test]
    fn progress_runs_from_zero_to_one_hundred() {
        let mut wizard = Wizard::new();
        wizard.set_email("a@b.co");

        let mut seen = vec![wizard.progress_percent()];
        while !wizard.step().is_terminal() {
            wizard.advance().unwrap();
            seen.push(wizard.progress_percent());
        }

        assert_eq!(seen, vec![0, 25, 50, 75, 100]);
    }

    // =========================================================================
    // Input mutation tests
    // =========================================================================

    #[test]
    fn web_pages_clamp_to_the_minimum() {
        let mut wizard = Wizard::new();

        wizard.set_web_pages(0);

        assert_eq!(wizard.input().web_pages, 1);
    }

    #[test]
    fn integrations_clamp_to_the_maximum() {
        let mut wizard = Wizard::new();

        wizard.set_integrations(15);

        assert_eq!(wizard.input().integrations, 10);
    }

    #[test]
    fn dev_hours_clamp_to_the_supported_range() {
        let mut wizard = Wizard::new();

        wizard.set_dev_hours(5);
        assert_eq!(wizard.input().dev_hours, 10);

        wizard.set_dev_hours(1000);
        assert_eq!(wizard.input().dev_hours, 800);

        wizard.set_dev_hours(120);
        assert_eq!(wizard.input().dev_hours, 120);
    }

    #[test]
    fn platform_toggle_flips_and_reports_state() {
        let mut wizard = Wizard::new();

        assert!(wizard.toggle_platform(Platform::Ios));
        assert!(wizard.input().platforms.ios);
        assert!(!wizard.toggle_platform(Platform::Ios));
        assert!(!wizard.input().platforms.ios);
    }

    #[test]
    fn feature_toggle_flips_and_reports_state() {
        let mut wizard = Wizard::new();

        // auth starts enabled by default
        assert!(!wizard.toggle_feature(Feature::Auth));
        assert!(wizard.toggle_feature(Feature::Payments));
        assert!(wizard.input().features.payments);
    }

    #[test]
    fn blank_company_name_clears_the_field() {
        let mut wizard = Wizard::new();

        wizard.set_company_name("  Acme  ");
        assert_eq!(wizard.input().contact.company_name.as_deref(), Some("Acme"));

        wizard.set_company_name("   ");
        assert_eq!(wizard.input().contact.company_name, None);
    }

    // =========================================================================
    // validate_email tests
    // =========================================================================

    #[test]
    fn validate_email_accepts_plain_addresses() {
        assert_eq!(validate_email("a@b.co"), Ok(()));
        assert_eq!(validate_email("first.last@example.com"), Ok(()));
        assert_eq!(validate_email("ops+quotes@agency.dev"), Ok(()));
    }

    #[test]
    fn validate_email_rejects_empty_input() {
        assert_eq!(validate_email(""), Err(ValidationError::MissingEmail));
    }

    #[test]
    fn validate_email_rejects_missing_at_sign() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn validate_email_rejects_dotless_domain() {
        assert_eq!(
            validate_email("a@b"),
            Err(ValidationError::InvalidEmail("a@b".to_string()))
        );
    }

    #[test]
    fn validate_email_rejects_embedded_whitespace() {
        assert_eq!(
            validate_email("a b@c.d"),
            Err(ValidationError::InvalidEmail("a b@c.d".to_string()))
        );
    }

    // =========================================================================
    // Estimate integration tests
    // =========================================================================

    #[test]
    fn estimate_reflects_the_accumulated_input() {
        let config = PricingConfig::default();
        let mut wizard = Wizard::new();
        wizard.select_service(ServiceCategory::WebDevelopment);
        wizard.toggle_feature(Feature::Auth); // back off the default

        let estimate = wizard.estimate(&config).unwrap();

        assert_eq!(estimate.standard.min, dec!(3325));
        assert_eq!(estimate.standard.max, dec!(4375));
    }

    #[test]
    fn estimate_changes_as_input_changes() {
        let config = PricingConfig::default();
        let mut wizard = Wizard::new();
        wizard.select_service(ServiceCategory::WebDevelopment);

        let before = wizard.estimate(&config).unwrap();
        wizard.set_integrations(5);
        let after = wizard.estimate(&config).unwrap();

        assert!(after.standard.min > before.standard.min);
    }

    #[test]
    fn quote_request_carries_contact_and_estimate() {
        let config = PricingConfig::default();
        let mut wizard = wizard_at(WizardStep::Estimate);
        wizard.set_company_name("Acme");

        let request = wizard.quote_request(&config).unwrap();

        assert_eq!(request.company_name.as_deref(), Some("Acme"));
        assert_eq!(request.email, "a@b.co");
        assert_eq!(request.estimate, wizard.estimate(&config).unwrap());
    }
}
