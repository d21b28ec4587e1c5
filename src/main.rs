use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use frete::{
    book::TariffBook,
    config::{OutputFormat, Settings},
    handlers::{
        destinations::{DestinationFilter, handle_destinations},
        quote::{QuoteInput, handle_quote},
        tariff::handle_tariff,
    },
    render,
};
use frete_engine::utils::unit::{LengthUnit, MassUnit};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(long, help = "(Optional) Sets the settings file path.", global = true)]
    pub config: Option<String>,

    #[arg(long, help = "(Optional) Overrides the tariff book path.", global = true)]
    pub book: Option<PathBuf>,

    #[arg(
        long,
        help = "(Optional) Prices against this tariff version.",
        global = true
    )]
    pub version_id: Option<String>,

    #[arg(long, help = "Prints JSON instead of text.", global = true)]
    pub json: bool,

    #[arg(
        long,
        default_value = "info",
        help = "Log level when RUST_LOG is unset.",
        global = true
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prices a shipment to a destination.
    Quote(QuoteArgs),
    /// Lists destinations, optionally only those with special surcharges.
    Destinations(DestinationArgs),
    /// Shows the rate table resolved for a category.
    Tariff(TariffArgs),
}

#[derive(clap::Args)]
pub struct QuoteArgs {
    #[arg(long, help = "Destination id from the tariff book.")]
    pub destination: String,

    #[arg(long, help = "Catalogued product to ship.")]
    pub product: Option<String>,

    #[arg(long, help = "Dimensions as WIDTHxHEIGHTxDEPTH.")]
    pub dims: Option<String>,

    #[arg(long, help = "Real weight.")]
    pub weight: Option<f64>,

    #[arg(long, default_value = "cm", help = "Unit of --dims: cm, m or in.")]
    pub dim_unit: LengthUnit,

    #[arg(long, default_value = "kg", help = "Unit of --weight: kg, g, lb or oz.")]
    pub mass_unit: MassUnit,

    #[arg(long, help = "Declared invoice value.")]
    pub value: Option<f64>,

    #[arg(long, help = "Route corridor code.")]
    pub corridor: Option<String>,

    #[arg(long, help = "Insurance fee percentage as a fraction, e.g. 0.005.")]
    pub insurance_pct: Option<f64>,

    #[arg(long, help = "Packaging or goods value added to the grand total.")]
    pub packaging_value: Option<f64>,
}

#[derive(clap::Args)]
pub struct DestinationArgs {
    #[arg(long, help = "Two-letter state code.")]
    pub state: Option<String>,

    #[arg(long, help = "Only destinations with active special surcharges.")]
    pub with_surcharges: bool,

    #[arg(long, help = "Maximum number of destinations listed.")]
    pub limit: Option<usize>,
}

#[derive(clap::Args)]
pub struct TariffArgs {
    #[arg(long, help = "Category code, e.g. SP_CAPITAL.")]
    pub category: String,
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(&args.config)?;
    if let Some(book) = args.book {
        settings.book = book;
    }
    if args.version_id.is_some() {
        settings.version = args.version_id;
    }
    if args.json {
        settings.output = OutputFormat::Json;
    }

    let book = TariffBook::load(&settings.book)?;
    let now = Utc::now();

    match args.command {
        Command::Quote(quote) => {
            let input = QuoteInput {
                destination: quote.destination,
                product: quote.product,
                dims: quote.dims,
                weight: quote.weight,
                length_unit: quote.dim_unit,
                mass_unit: quote.mass_unit,
                value: quote.value,
                corridor: quote.corridor,
                insurance_percent: quote.insurance_pct,
                packaging_value: quote.packaging_value,
                version: settings.version.clone(),
            };
            let result = handle_quote(&book, &input, now)?;
            emit(settings.output, &result, render::render_quote)
        }
        Command::Destinations(list) => {
            let filter = DestinationFilter {
                state: list.state,
                with_surcharges: list.with_surcharges,
                limit: list.limit,
            };
            let summaries = handle_destinations(&book, &filter, now);
            info!("{} destinations listed", summaries.len());
            emit(settings.output, &summaries, |s| render::render_destinations(s))
        }
        Command::Tariff(tariff) => {
            let report = handle_tariff(&book, &tariff.category, settings.version.as_deref())?;
            emit(settings.output, &report, render::render_tariff)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
