use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use estimator_core::calculations::PricingConfig;

use crate::session::Session;

mod format;
mod session;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Instant project estimator.
///
/// Walks the estimate wizard on the terminal: pick a service, describe the
/// project, and get a Basic/Standard/Premium price range plus a quote
/// request payload.
#[derive(Debug, Parser)]
struct Cli {
    /// Pricing override file (TOML). Keys not present keep their defaults.
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// Emit the quote payload as a single JSON line on `send`.
    #[arg(long)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` so the interactive prompt stays clean.
/// * Strips timestamps and target names to keep CLI output readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── pricing configuration ───────────────────────────────────────────────────

/// Loads the pricing rule table, overlaying a TOML file when given.
fn load_pricing(path: Option<&Path>) -> Result<PricingConfig> {
    let Some(path) = path else {
        return Ok(PricingConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read pricing file: {}", path.display()))?;
    let config: PricingConfig = toml::from_str(&text)
        .with_context(|| format!("invalid pricing file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("rejected pricing file: {}", path.display()))?;

    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_pricing(cli.pricing.as_deref())?;
    debug!("pricing configuration ready");

    let mut session = Session::new(config, cli.json);
    session.run(&mut io::stdin().lock(), &mut io::stdout())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn load_pricing_without_file_uses_defaults() {
        let config = load_pricing(None).unwrap();

        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let overrides = "extra_page_rate = 175\n\n[base_rates]\ndesigning = 450\n";

        let config: PricingConfig = toml::from_str(overrides).unwrap();

        assert_eq!(config.extra_page_rate, dec!(175));
        assert_eq!(config.base_rates.designing, dec!(450));
        assert_eq!(config.integration_rate, dec!(400));
        assert_eq!(config.base_rates.web_development, dec!(2500));
    }

    #[test]
    fn toml_accepts_fractional_multipliers() {
        let overrides = "rush_multiplier = 1.3\n";

        let config: PricingConfig = toml::from_str(overrides).unwrap();

        assert_eq!(config.rush_multiplier, dec!(1.3));
        assert_eq!(config.validate(), Ok(()));
    }
}
