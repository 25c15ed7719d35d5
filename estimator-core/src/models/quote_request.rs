use serde::{Deserialize, Serialize};

use super::{Complexity, Estimate, Features, Platforms, ProjectInput, ServiceCategory};

/// Scope details echoed back in the quote payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetails {
    pub web_pages: u32,
    pub integrations: u32,
    pub platforms: Platforms,
    pub features: Features,
    pub complexity: Complexity,
    pub rush: bool,
    pub dev_hours: u32,
}

/// The flat record handed to the quote submission boundary.
///
/// Submission itself (backend call, email service, PDF rendering) is out of
/// scope; producing this well-formed payload is the core's only obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub company_name: Option<String>,
    pub email: String,
    pub service: ServiceCategory,
    pub details: QuoteDetails,
    pub estimate: Estimate,
}

impl QuoteRequest {
    /// Packages the accumulated input and a computed estimate for submission.
    pub fn new(
        input: &ProjectInput,
        estimate: Estimate,
    ) -> Self {
        Self {
            company_name: input.contact.company_name.clone(),
            email: input.contact.email.clone(),
            service: input.service,
            details: QuoteDetails {
                web_pages: input.web_pages,
                integrations: input.integrations,
                platforms: input.platforms,
                features: input.features,
                complexity: input.complexity,
                rush: input.rush,
                dev_hours: input.dev_hours,
            },
            estimate,
        }
    }
}
