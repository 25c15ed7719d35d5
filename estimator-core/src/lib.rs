pub mod calculations;
pub mod models;
pub mod wizard;

pub use models::*;
pub use wizard::{ValidationError, Wizard, WizardStep, validate_email};
