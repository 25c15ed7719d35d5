use std::fmt;

use serde::{Deserialize, Serialize};

/// Service category offered by the agency.
///
/// Serialized with the human-readable labels used on the quote wire format
/// (e.g. `"Web Development"`, `"CMS & Ecommerce"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "Generative AI")]
    GenerativeAi,
    #[serde(rename = "Cloud Services")]
    CloudServices,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "App Development")]
    AppDevelopment,
    #[serde(rename = "CMS & Ecommerce")]
    CmsEcommerce,
    #[serde(rename = "Digital Marketing")]
    DigitalMarketing,
    #[serde(rename = "Designing")]
    Designing,
    #[serde(rename = "Hire Developers")]
    HireDevelopers,
}

impl ServiceCategory {
    /// All categories, in menu order.
    pub const ALL: [ServiceCategory; 8] = [
        Self::GenerativeAi,
        Self::CloudServices,
        Self::WebDevelopment,
        Self::AppDevelopment,
        Self::CmsEcommerce,
        Self::DigitalMarketing,
        Self::Designing,
        Self::HireDevelopers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerativeAi => "Generative AI",
            Self::CloudServices => "Cloud Services",
            Self::WebDevelopment => "Web Development",
            Self::AppDevelopment => "App Development",
            Self::CmsEcommerce => "CMS & Ecommerce",
            Self::DigitalMarketing => "Digital Marketing",
            Self::Designing => "Designing",
            Self::HireDevelopers => "Hire Developers",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Generative AI" => Some(Self::GenerativeAi),
            "Cloud Services" => Some(Self::CloudServices),
            "Web Development" => Some(Self::WebDevelopment),
            "App Development" => Some(Self::AppDevelopment),
            "CMS & Ecommerce" => Some(Self::CmsEcommerce),
            "Digital Marketing" => Some(Self::DigitalMarketing),
            "Designing" => Some(Self::Designing),
            "Hire Developers" => Some(Self::HireDevelopers),
            _ => None,
        }
    }

    /// Whether this category is billed by the hour rather than per project.
    pub fn is_hourly(&self) -> bool {
        matches!(self, Self::HireDevelopers)
    }

    /// Whether the page count affects the price for this category.
    pub fn uses_page_count(&self) -> bool {
        matches!(self, Self::WebDevelopment | Self::CmsEcommerce)
    }

    /// Whether the target platform selection affects the price.
    pub fn uses_platforms(&self) -> bool {
        matches!(self, Self::AppDevelopment)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_category() {
        for category in ServiceCategory::ALL {
            assert_eq!(ServiceCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn parse_rejects_unknown_label() {
        assert_eq!(ServiceCategory::parse("Quantum Computing"), None);
    }

    #[test]
    fn only_hire_developers_is_hourly() {
        for category in ServiceCategory::ALL {
            assert_eq!(
                category.is_hourly(),
                category == ServiceCategory::HireDevelopers
            );
        }
    }

    #[test]
    fn page_count_applies_to_web_and_cms() {
        assert!(ServiceCategory::WebDevelopment.uses_page_count());
        assert!(ServiceCategory::CmsEcommerce.uses_page_count());
        assert!(!ServiceCategory::AppDevelopment.uses_page_count());
        assert!(!ServiceCategory::Designing.uses_page_count());
    }

    #[test]
    fn platforms_apply_to_app_development_only() {
        for category in ServiceCategory::ALL {
            assert_eq!(
                category.uses_platforms(),
                category == ServiceCategory::AppDevelopment
            );
        }
    }

    #[test]
    fn serializes_with_human_label() {
        let json = serde_json::to_string(&ServiceCategory::CmsEcommerce).unwrap();

        assert_eq!(json, "\"CMS & Ecommerce\"");
    }
}
