// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::AutofillConfig;
use crate::dispatcher::Dispatcher;
use crate::page::{ElementKind, HtmlPage, Page};
use crate::types::{ApplicationOptions, FillContext, Profile};

#[derive(Parser)]
#[command(name = "cv-autofill")]
#[command(about = "Fill Polish recruiting forms from a JSON Resume profile")]
pub struct AutofillCli {
    #[command(subcommand)]
    pub command: AutofillCommand,

    /// Configuration file (defaults to AUTOFILL_CONFIG or ./autofill.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct PageArgs {
    /// Saved HTML of the application page
    #[arg(long)]
    pub html: PathBuf,

    /// URL the page was served from
    #[arg(long)]
    pub url: String,
}

#[derive(Subcommand)]
pub enum AutofillCommand {
    /// Report which platform form the page contains
    Detect {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Fill the page's form from a profile
    Fill {
        #[command(flatten)]
        page: PageArgs,

        /// JSON Resume profile
        #[arg(long)]
        cv: PathBuf,

        /// Application options as JSON
        #[arg(long)]
        options: Option<PathBuf>,

        /// Print the form control values after filling
        #[arg(long)]
        dump: bool,
    },
    /// Answer a raw control message, e.g. '{"action":"detectForm"}'
    Message {
        #[command(flatten)]
        page: PageArgs,

        message: String,
    },
}

pub async fn handle_command(cli: AutofillCli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AutofillConfig::load_from_file(path)?,
        None => AutofillConfig::load()?,
    };
    let dispatcher = Dispatcher::from_config(&config);

    match cli.command {
        AutofillCommand::Detect { page } => {
            let mut page = load_page(&page)?;
            let outcome = dispatcher.detect(&page);
            if let Some(notice) = dispatcher.announce_detected(&mut page, &outcome) {
                info!("Notice: {}", serde_json::to_string(&notice)?);
            }
            print_json(&outcome)?;
        }

        AutofillCommand::Fill {
            page,
            cv,
            options,
            dump,
        } => {
            let context = load_context(&cv, options.as_deref())?;
            let mut page = match load_page(&page) {
                Ok(page) => page,
                Err(e) => {
                    print_json(&Dispatcher::transport_failure(&format!("{:#}", e)))?;
                    return Ok(());
                }
            };

            if let Some(bound) = dispatcher.worst_case_duration(&page) {
                info!("Worst-case fill duration: {:?}", bound);
            }
            let outcome = dispatcher.fill(&mut page, &context).await;
            print_json(&outcome)?;

            if dump {
                print_json(&control_values(&page)?)?;
            }
        }

        AutofillCommand::Message { page, message } => {
            let reply = match load_page(&page) {
                Ok(mut page) => dispatcher.handle_message(&mut page, &message).await,
                Err(e) => serde_json::to_value(Dispatcher::transport_failure(&format!("{:#}", e)))?,
            };
            print_json(&reply)?;
        }
    }

    Ok(())
}

fn load_page(args: &PageArgs) -> Result<HtmlPage> {
    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("Failed to read {}", args.html.display()))?;
    Ok(HtmlPage::parse(&args.url, &html))
}

fn load_context(cv: &Path, options: Option<&Path>) -> Result<FillContext> {
    let raw = std::fs::read_to_string(cv)
        .with_context(|| format!("Failed to read profile {}", cv.display()))?;
    let profile = Profile::from_json(&raw)
        .with_context(|| format!("Failed to parse profile {}", cv.display()))?;

    let options = match options {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options {}", path.display()))?;
            serde_json::from_str::<ApplicationOptions>(&raw)
                .with_context(|| format!("Failed to parse options {}", path.display()))?
        }
        None => ApplicationOptions::default(),
    };

    Ok(FillContext::new(profile, options))
}

/// Final value of every identifiable form control, keyed by id or name.
fn control_values(page: &HtmlPage) -> Result<Value> {
    let dom = page.snapshot()?;
    let mut values = Map::new();

    for (handle, el) in dom.iter().filter(|(_, el)| el.is_form_control()) {
        let Some(key) = el.id().or_else(|| el.attr("name")) else {
            continue;
        };
        let value = match el.kind() {
            ElementKind::Checkbox | ElementKind::Radio => Value::Bool(page.is_checked(handle)?),
            _ => Value::String(page.value(handle)?),
        };
        values.insert(key.to_string(), value);
    }

    Ok(Value::Object(values))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
