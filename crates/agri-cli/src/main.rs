//! Command-line interface for agri-assist

use agri_llm::{AnswerSource, AssistantConfig, AssistantRouter};
use agri_market::{MarketConfig, MarketSnapshot, NormalizedPriceRecord, PriceNormalizer};
use agri_utils::AppConfig;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agri")]
#[command(about = "Farming assistant and mandi price lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the farming assistant a question
    Ask {
        /// The question, e.g. "best crop for red soil"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Fetch and normalize market prices
    Prices {
        /// District to filter by; all districts when omitted
        #[arg(short, long, default_value = "")]
        district: String,

        /// Print the snapshot as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::from_env()?;
    agri_utils::init_tracing_with(&app_config);

    let cli = Cli::parse();
    info!("Starting {}", app_config.app_name);

    match cli.command {
        Commands::Ask { query } => ask(&query.join(" ")).await,
        Commands::Prices { district, json } => prices(&district, json).await,
    }
}

async fn ask(query: &str) -> anyhow::Result<()> {
    let router = AssistantRouter::from_config(AssistantConfig::from_env())?;
    let resolution = router.resolve_detailed(query).await;

    println!("{}", resolution.text);
    println!();
    println!("({})", describe_source(&resolution.source));
    Ok(())
}

async fn prices(district: &str, json: bool) -> anyhow::Result<()> {
    let normalizer = PriceNormalizer::from_config(MarketConfig::from_env())?;
    let snapshot = normalizer.fetch_and_normalize(district).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if let Some(error) = &snapshot.error {
        anyhow::bail!("{error}");
    }

    println!("{}", price_table(&snapshot));
    if let Some(updated) = snapshot.last_updated {
        println!("Updated {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

fn describe_source(source: &AnswerSource) -> String {
    match source {
        AnswerSource::NotConfigured => "assistant not configured".to_string(),
        AnswerSource::Local => "local answer".to_string(),
        AnswerSource::Remote { api_version, model } => format!("remote: {api_version}/{model}"),
        AnswerSource::RemoteFallback => "offline fallback answer".to_string(),
    }
}

fn price_table(snapshot: &MarketSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Commodity", "Variety", "Market", "District", "Date", "Modal", "Unit", "Per kg",
        ]);

    for record in &snapshot.records {
        table.add_row(price_row(record));
    }

    table
}

fn price_row(record: &NormalizedPriceRecord) -> Vec<Cell> {
    let per_kg = match record.price_per_kg {
        Some(price) if record.approximate => format!("~{price:.2}"),
        Some(price) => format!("{price:.2}"),
        None => "-".to_string(),
    };

    vec![
        Cell::new(&record.commodity),
        Cell::new(&record.variety),
        Cell::new(&record.market),
        Cell::new(&record.district),
        Cell::new(
            record
                .arrival_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
        ),
        Cell::new(record.modal_price.map(|p| p.to_string()).unwrap_or_default()),
        Cell::new(&record.unit),
        Cell::new(per_kg),
    ]
}
