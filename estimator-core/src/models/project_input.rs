use serde::{Deserialize, Serialize};

use super::ServiceCategory;

/// Target platforms for an app project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    pub web: bool,
    pub ios: bool,
    pub android: bool,
}

impl Platforms {
    /// Number of selected native platforms (iOS and Android).
    ///
    /// Web is not a native platform and never counts here.
    pub fn native_count(&self) -> u32 {
        u32::from(self.ios) + u32::from(self.android)
    }
}

/// Optional feature toggles, each with its own surcharge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub auth: bool,
    pub payments: bool,
    pub admin_panel: bool,
    pub api: bool,
}

/// Project complexity level, a three-step price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Basic,
    Standard,
    Advanced,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Self::Basic, Self::Standard, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Selector for a single platform toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Some(Self::Web),
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            _ => None,
        }
    }
}

/// Selector for a single feature toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Auth,
    Payments,
    AdminPanel,
    Api,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Payments => "payments",
            Self::AdminPanel => "admin panel",
            Self::Api => "api",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auth" | "authentication" => Some(Self::Auth),
            "payments" => Some(Self::Payments),
            "admin" | "adminpanel" | "admin_panel" => Some(Self::AdminPanel),
            "api" => Some(Self::Api),
            _ => None,
        }
    }
}

/// Contact details collected on the Contact step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub company_name: Option<String>,
    pub email: String,
}

/// The accumulated wizard state fed to the pricing engine.
///
/// Exactly one `service` is active at a time; fields irrelevant to the
/// active service keep their values and are ignored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub service: ServiceCategory,
    pub web_pages: u32,
    pub integrations: u32,
    pub platforms: Platforms,
    pub features: Features,
    pub complexity: Complexity,
    pub rush: bool,
    pub dev_hours: u32,
    pub contact: ContactInfo,
}

impl ProjectInput {
    pub const MIN_WEB_PAGES: u32 = 1;
    pub const MAX_INTEGRATIONS: u32 = 10;
    pub const MIN_DEV_HOURS: u32 = 10;
    pub const MAX_DEV_HOURS: u32 = 800;
}

impl Default for ProjectInput {
    fn default() -> Self {
        Self {
            service: ServiceCategory::WebDevelopment,
            web_pages: 5,
            integrations: 1,
            platforms: Platforms {
                web: true,
                ios: false,
                android: false,
            },
            features: Features {
                auth: true,
                payments: false,
                admin_panel: false,
                api: false,
            },
            complexity: Complexity::Standard,
            rush: false,
            dev_hours: 80,
            contact: ContactInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_input_matches_wizard_start_values() {
        let input = ProjectInput::default();

        assert_eq!(input.service, ServiceCategory::WebDevelopment);
        assert_eq!(input.web_pages, 5);
        assert_eq!(input.integrations, 1);
        assert!(input.platforms.web);
        assert!(!input.platforms.ios);
        assert!(!input.platforms.android);
        assert!(input.features.auth);
        assert!(!input.features.payments);
        assert_eq!(input.complexity, Complexity::Standard);
        assert!(!input.rush);
        assert_eq!(input.dev_hours, 80);
        assert_eq!(input.contact.company_name, None);
        assert_eq!(input.contact.email, "");
    }

    #[test]
    fn native_count_ignores_web() {
        let platforms = Platforms {
            web: true,
            ios: true,
            android: false,
        };

        assert_eq!(platforms.native_count(), 1);
    }

    #[test]
    fn native_count_counts_ios_and_android() {
        let platforms = Platforms {
            web: false,
            ios: true,
            android: true,
        };

        assert_eq!(platforms.native_count(), 2);
    }

    #[test]
    fn complexity_parse_is_case_insensitive() {
        assert_eq!(Complexity::parse("basic"), Some(Complexity::Basic));
        assert_eq!(Complexity::parse("Standard"), Some(Complexity::Standard));
        assert_eq!(Complexity::parse("ADVANCED"), Some(Complexity::Advanced));
        assert_eq!(Complexity::parse("extreme"), None);
    }

    #[test]
    fn platform_parse_accepts_known_names() {
        assert_eq!(Platform::parse("ios"), Some(Platform::Ios));
        assert_eq!(Platform::parse("Android"), Some(Platform::Android));
        assert_eq!(Platform::parse(" web "), Some(Platform::Web));
        assert_eq!(Platform::parse("windows"), None);
    }

    #[test]
    fn feature_parse_accepts_aliases() {
        assert_eq!(Feature::parse("auth"), Some(Feature::Auth));
        assert_eq!(Feature::parse("authentication"), Some(Feature::Auth));
        assert_eq!(Feature::parse("admin"), Some(Feature::AdminPanel));
        assert_eq!(Feature::parse("admin_panel"), Some(Feature::AdminPanel));
        assert_eq!(Feature::parse("api"), Some(Feature::Api));
        assert_eq!(Feature::parse("blockchain"), None);
    }
}
