//! Interactive wizard session.
//!
//! Reads one command per line, applies it to the wizard, and reprints the
//! step prompt whenever the step changes. Command parsing is a pure
//! function over the input line; the loop is a thin shell around it.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::info;

use estimator_core::calculations::PricingConfig;
use estimator_core::{
    Complexity, Feature, Platform, ServiceCategory, Wizard, WizardStep, validate_email,
};

use crate::format::{format_dollars, render_estimate};

/// A single parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick a service by its menu number.
    Select(usize),
    Pages(u32),
    Hours(u32),
    Integrations(u32),
    TogglePlatform(Platform),
    ToggleFeature(Feature),
    SetComplexity(Complexity),
    Rush(bool),
    Company(String),
    Email(String),
    Next,
    Back,
    Show,
    Send,
    Pdf,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("nothing entered")]
    Empty,

    #[error("unknown command '{0}'; type 'help' for the command list")]
    Unknown(String),

    #[error("'{0}' expects a number")]
    ExpectsNumber(&'static str),

    #[error("'rush' expects 'on' or 'off'")]
    ExpectsOnOff,

    #[error("unknown platform '{0}' (ios, android, web)")]
    UnknownPlatform(String),

    #[error("unknown feature '{0}' (auth, payments, admin, api)")]
    UnknownFeature(String),
}

/// Parses one input line into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseCommandError::Empty);
    }
    if let Ok(number) = line.parse::<usize>() {
        return Ok(Command::Select(number));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "pages" => parse_number("pages", rest).map(Command::Pages),
        "hours" => parse_number("hours", rest).map(Command::Hours),
        "integrations" | "int" => parse_number("integrations", rest).map(Command::Integrations),
        "platform" => Platform::parse(rest)
            .map(Command::TogglePlatform)
            .ok_or_else(|| ParseCommandError::UnknownPlatform(rest.to_string())),
        "feature" => Feature::parse(rest)
            .map(Command::ToggleFeature)
            .ok_or_else(|| ParseCommandError::UnknownFeature(rest.to_string())),
        "basic" => Ok(Command::SetComplexity(Complexity::Basic)),
        "standard" => Ok(Command::SetComplexity(Complexity::Standard)),
        "advanced" => Ok(Command::SetComplexity(Complexity::Advanced)),
        "rush" => match rest.to_ascii_lowercase().as_str() {
            "on" => Ok(Command::Rush(true)),
            "off" => Ok(Command::Rush(false)),
            _ => Err(ParseCommandError::ExpectsOnOff),
        },
        "company" => Ok(Command::Company(rest.to_string())),
        "email" => Ok(Command::Email(rest.to_string())),
        "next" | "n" | "start" => Ok(Command::Next),
        "back" | "b" => Ok(Command::Back),
        "show" => Ok(Command::Show),
        "send" => Ok(Command::Send),
        "pdf" => Ok(Command::Pdf),
        "restart" => Ok(Command::Restart),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(ParseCommandError::Unknown(word.to_string())),
    }
}

fn parse_number(
    name: &'static str,
    rest: &str,
) -> Result<u32, ParseCommandError> {
    rest.parse()
        .map_err(|_| ParseCommandError::ExpectsNumber(name))
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

enum Flow {
    Continue,
    Quit,
}

/// One interactive run of the estimate wizard.
pub struct Session {
    wizard: Wizard,
    config: PricingConfig,
    json_payload: bool,
}

impl Session {
    pub fn new(
        config: PricingConfig,
        json_payload: bool,
    ) -> Self {
        Self {
            wizard: Wizard::new(),
            config,
            json_payload,
        }
    }

    /// Runs the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "Instant Project Estimator")?;
        self.print_step(out)?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Err(ParseCommandError::Empty) => {}
                Err(error) => writeln!(out, "{error}")?,
                Ok(command) => {
                    let step_before = self.wizard.step();
                    match self.apply(command, out)? {
                        Flow::Quit => break,
                        Flow::Continue => {
                            if self.wizard.step() != step_before {
                                self.print_step(out)?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        command: Command,
        out: &mut dyn Write,
    ) -> io::Result<Flow> {
        match command {
            Command::Select(number) => self.select_service(number, out)?,
            Command::Pages(pages) => {
                self.wizard.set_web_pages(pages);
                writeln!(out, "pages: {}", self.wizard.input().web_pages)?;
            }
            Command::Hours(hours) => {
                self.wizard.set_dev_hours(hours);
                writeln!(out, "hours: {}", self.wizard.input().dev_hours)?;
            }
            Command::Integrations(count) => {
                self.wizard.set_integrations(count);
                writeln!(out, "integrations: {}", self.wizard.input().integrations)?;
            }
            Command::TogglePlatform(platform) => {
                let enabled = self.wizard.toggle_platform(platform);
                writeln!(out, "{}: {}", platform.as_str(), on_off(enabled))?;
            }
            Command::ToggleFeature(feature) => {
                let enabled = self.wizard.toggle_feature(feature);
                writeln!(out, "{}: {}", feature.as_str(), on_off(enabled))?;
            }
            Command::SetComplexity(complexity) => {
                self.wizard.set_complexity(complexity);
                writeln!(out, "complexity: {}", complexity.as_str())?;
            }
            Command::Rush(rush) => {
                self.wizard.set_rush(rush);
                writeln!(out, "rush delivery: {}", on_off(rush))?;
            }
            Command::Company(name) => self.wizard.set_company_name(&name),
            Command::Email(email) => self.wizard.set_email(&email),
            Command::Next => {
                if let Err(error) = self.wizard.advance() {
                    writeln!(out, "{error}")?;
                }
            }
            Command::Back => {
                self.wizard.retreat();
            }
            Command::Show => self.print_estimate(out)?,
            Command::Send => self.send_quote(out)?,
            Command::Pdf => writeln!(
                out,
                "PDF export is handled by the quoting backend; nothing generated here"
            )?,
            Command::Restart => self.wizard.restart(),
            Command::Help => self.print_help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn select_service(
        &mut self,
        number: usize,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        if self.wizard.step() != WizardStep::Service {
            writeln!(
                out,
                "service selection happens on the Service step; type 'back' to return"
            )?;
            return Ok(());
        }
        match ServiceCategory::ALL.get(number.wrapping_sub(1)) {
            Some(&service) => {
                self.wizard.select_service(service);
            }
            None => writeln!(
                out,
                "pick a service between 1 and {}",
                ServiceCategory::ALL.len()
            )?,
        }
        Ok(())
    }

    fn print_step(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let step = self.wizard.step();
        writeln!(out)?;
        writeln!(
            out,
            "── {} (step {} of {}, {}%)",
            step.title(),
            step.index() + 1,
            WizardStep::ALL.len(),
            self.wizard.progress_percent()
        )?;

        match step {
            WizardStep::Service => self.print_service_menu(out)?,
            WizardStep::Details => self.print_details(out)?,
            WizardStep::Complexity => {
                let input = self.wizard.input();
                writeln!(
                    out,
                    "Complexity: {} (basic | standard | advanced)",
                    input.complexity.as_str()
                )?;
                writeln!(
                    out,
                    "Rush delivery: {} ('rush on' adds ~25%)",
                    on_off(input.rush)
                )?;
            }
            WizardStep::Contact => {
                let contact = &self.wizard.input().contact;
                writeln!(
                    out,
                    "Company: {} ('company <name>', optional)",
                    contact.company_name.as_deref().unwrap_or("-")
                )?;
                let email = if contact.email.is_empty() {
                    "-"
                } else {
                    &contact.email
                };
                writeln!(out, "Email: {email} ('email <address>', required)")?;
            }
            WizardStep::Estimate => {
                self.print_estimate(out)?;
                writeln!(
                    out,
                    "Type 'send' to request a detailed quote, 'restart' to start over."
                )?;
            }
        }
        Ok(())
    }

    fn print_service_menu(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "Choose a service category:")?;
        for (position, service) in ServiceCategory::ALL.iter().enumerate() {
            let rate = self.config.base_rates.rate(*service);
            let hint = if service.is_hourly() {
                format!("${}/hr", format_dollars(rate))
            } else {
                format!("starting from ${}", format_dollars(rate))
            };
            writeln!(out, "  {}. {:<18} {hint}", position + 1, service.as_str())?;
        }
        Ok(())
    }

    fn print_details(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let input = self.wizard.input();

        if input.service.is_hourly() {
            writeln!(
                out,
                "Estimated developer hours: {} ('hours <10-800>')",
                input.dev_hours
            )?;
            return Ok(());
        }

        if input.service.uses_page_count() {
            writeln!(out, "Pages: {} ('pages <n>')", input.web_pages)?;
        }
        if input.service.uses_platforms() {
            let platforms = &input.platforms;
            writeln!(
                out,
                "Platforms: web {} | ios {} | android {} ('platform <name>' toggles)",
                on_off(platforms.web),
                on_off(platforms.ios),
                on_off(platforms.android)
            )?;
        }
        writeln!(
            out,
            "Integrations: {} ('integrations <0-10>')",
            input.integrations
        )?;
        let features = &input.features;
        writeln!(
            out,
            "Features: auth {} | payments {} | admin {} | api {} ('feature <name>' toggles)",
            on_off(features.auth),
            on_off(features.payments),
            on_off(features.admin_panel),
            on_off(features.api)
        )?;
        Ok(())
    }

    fn print_estimate(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        match self.wizard.estimate(&self.config) {
            Ok(estimate) => {
                writeln!(out, "Estimated price range:")?;
                write!(out, "{}", render_estimate(&estimate))?;
            }
            Err(error) => writeln!(out, "estimate unavailable: {error}")?,
        }
        Ok(())
    }

    fn send_quote(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let request = match self.wizard.quote_request(&self.config) {
            Ok(request) => request,
            Err(error) => {
                writeln!(out, "cannot build the quote request: {error}")?;
                return Ok(());
            }
        };
        if let Err(error) = validate_email(&request.email) {
            writeln!(out, "{error}")?;
            return Ok(());
        }

        let payload = if self.json_payload {
            serde_json::to_string(&request)
        } else {
            serde_json::to_string_pretty(&request)
        };
        match payload {
            Ok(payload) => {
                info!(
                    email = %request.email,
                    service = %request.service,
                    "quote request ready for submission"
                );
                writeln!(out, "{payload}")?;
                writeln!(
                    out,
                    "Quote request sent! Wire this payload to the quoting backend."
                )?;
            }
            Err(error) => writeln!(out, "cannot serialize the quote request: {error}")?,
        }
        Ok(())
    }

    fn print_help(
        &self,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "Commands:")?;
        writeln!(out, "  1-8                     pick a service (Service step)")?;
        writeln!(out, "  pages <n>               set the page count")?;
        writeln!(out, "  hours <n>               set developer hours")?;
        writeln!(out, "  integrations <n>        set the integration count")?;
        writeln!(out, "  platform <name>         toggle ios, android or web")?;
        writeln!(out, "  feature <name>          toggle auth, payments, admin or api")?;
        writeln!(out, "  basic|standard|advanced set the complexity")?;
        writeln!(out, "  rush on|off             toggle rush delivery")?;
        writeln!(out, "  company <name>          set the company name")?;
        writeln!(out, "  email <address>         set the contact email")?;
        writeln!(out, "  next, back              move between steps")?;
        writeln!(out, "  show                    show the current estimate")?;
        writeln!(out, "  send, pdf               submit the quote request")?;
        writeln!(out, "  restart, quit           start over or leave")?;
        Ok(())
    }
}
