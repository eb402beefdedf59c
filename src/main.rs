//! Command-line front end for the house price form.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Args, Parser, Subcommand};
use house_price_form::form::{parse_assignment, values_from_json, Field, FormController};
use house_price_form::predictor::{format_price, PredictionClient};
use house_price_form::storage::FileStore;
use house_price_form::{Config, EstimatorService};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// House price estimates from property details
#[derive(Parser)]
#[command(name = "house-price-form")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List form fields and accepted values
    Fields,

    /// Check property details without submitting them
    Validate(FormArgs),

    /// Validate and request a price estimate
    Predict(FormArgs),

    /// Check that the prediction service is up
    Health,

    /// Inspect or clear recent predictions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recent predictions, newest first
    List,

    /// Print the input of one prediction as JSON
    Show { id: i64 },

    /// Delete all stored predictions
    Clear,
}

#[derive(Args)]
struct FormArgs {
    /// JSON object of field name -> value, applied on top of the defaults
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Set one field, e.g. `--set GrLivArea=1500`. Repeatable, applied after --input
    #[arg(short, long = "set", value_parser = parse_assignment)]
    set: Vec<(Field, String)>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from_env()?;
    debug!(?cfg, "Loaded configuration");

    match cli.command {
        Commands::Fields => print_fields(),
        Commands::Validate(args) => {
            let mut form = FormController::new();
            apply_form_args(&mut form, &args).await?;
            validate(&mut form)?;
        }
        Commands::Predict(args) => {
            let mut service = open_service(&cfg)?;
            apply_form_args(service.form_mut(), &args).await?;

            match service.submit().await {
                Ok(result) => {
                    println!("Estimated value: {}", format_price(result.predicted_price));
                }
                Err(e) => {
                    print_errors(service.form());
                    bail!("{e}");
                }
            }
        }
        Commands::Health => {
            let client = PredictionClient::new(&cfg.base_url, cfg.request_timeout)?;
            let body = client.check_health().await?;
            println!("{}: {}", client.base_url(), body);
        }
        Commands::History { action } => {
            let mut service = open_service(&cfg)?;
            match action {
                HistoryAction::List => print_history(&service),
                HistoryAction::Show { id } => {
                    let entry = service
                        .history()
                        .get(id)
                        .with_context(|| format!("No prediction with id {id}"))?;
                    println!("{}", serde_json::to_string_pretty(&entry.input)?);
                }
                HistoryAction::Clear => {
                    service.clear_history()?;
                    println!("Prediction history cleared");
                }
            }
        }
    }

    Ok(())
}

fn open_service(cfg: &Config) -> Result<EstimatorService<FileStore>> {
    let client = PredictionClient::new(&cfg.base_url, cfg.request_timeout)?;
    let store = FileStore::open(&cfg.history_path)
        .with_context(|| format!("Failed to open history file {}", cfg.history_path.display()))?;
    Ok(EstimatorService::new(client, store))
}

async fn apply_form_args(form: &mut FormController, args: &FormArgs) -> Result<()> {
    if let Some(path) = &args.input {
        for (field, value) in read_input_file(path).await? {
            form.set_field(field, value);
        }
    }
    for (field, value) in &args.set {
        form.set_field(*field, value.clone());
    }
    Ok(())
}

async fn read_input_file(path: &Path) -> Result<Vec<(Field, String)>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    values_from_json(json)
        .with_context(|| format!("Invalid form input in {}", path.display()))
}

fn validate(form: &mut FormController) -> Result<()> {
    Field::ALL.iter().for_each(|f| form.touch(*f));
    print_errors(form);

    let missing = form.missing_mandatory();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(Field::as_str).collect();
        println!("Missing mandatory fields: {}", names.join(", "));
    }

    if !form.errors().is_empty() || !missing.is_empty() {
        bail!("Property details are not valid");
    }
    println!("All fields valid");
    Ok(())
}

fn print_errors(form: &FormController) {
    for field in Field::ALL {
        if let Some(msg) = form.visible_error(field) {
            println!("  {field}: {msg}");
        }
    }
}

fn print_fields() {
    for field in Field::ALL {
        let marker = if field.is_mandatory() { "*" } else { " " };
        println!("{marker} {:<14} {}", field.as_str(), field.label());
        if let Some(choices) = field.choices() {
            for (code, name) in choices {
                println!("      {code:<8} {name}");
            }
        }
    }
}

fn print_history(service: &EstimatorService<FileStore>) {
    let history = service.history();
    if history.is_empty() {
        println!("No predictions yet");
        return;
    }

    for entry in history.entries() {
        let when = DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|t| t.format("%b %-d, %H:%M").to_string())
            .unwrap_or_else(|_| entry.timestamp.clone());
        let input = &entry.input;
        let show = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());

        println!(
            "[{}] {:>12}  {}  living {} sq ft, quality {}/10, built {}",
            entry.id,
            format_price(entry.prediction),
            when,
            show(input.gr_liv_area),
            show(input.overall_qual),
            show(input.year_built),
        );
    }
}
