mod price_range;
mod project_input;
mod quote_request;
mod service_category;

pub use price_range::{Estimate, PriceRange};
pub use project_input::{
    Complexity, ContactInfo, Feature, Features, Platform, Platforms, ProjectInput,
};
pub use quote_request::{QuoteDetails, QuoteRequest};
pub use service_category::ServiceCategory;
