//! DCA projection CLI
//!
//! Command-line interface for running a single projection

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use dca_projection::format::{
    format_asset, format_fiat, format_percent, format_sub_units, results_sentence, share_text,
    ASSET_SYMBOL,
};
use dca_projection::preset::{self, DEFAULT_SHARE_BASE_URL, MAX_PROJECTION_YEARS};
use dca_projection::price::DEFAULT_FALLBACK_PRICE;
use dca_projection::report::{render_table, write_series_csv_path};
use dca_projection::{
    PriceFeed, PriceFeedConfig, PriceOrigin, PriceQuote, ProjectionEngine, ProjectionInputs,
};

#[derive(Debug, Parser)]
#[command(name = "dca", version, about = "Project a dollar-cost-averaging bitcoin strategy")]
struct Cli {
    /// Shareable query string to start from, e.g. "initial=100&dca=500&years=10&growth=20"
    #[arg(long)]
    query: Option<String>,

    /// One-time initial investment (fiat)
    #[arg(long)]
    initial: Option<f64>,

    /// Monthly contribution (fiat)
    #[arg(long)]
    dca: Option<f64>,

    /// Horizon in years
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PROJECTION_YEARS as i64))]
    years: Option<u32>,

    /// Annual growth rate in percent
    #[arg(long, allow_negative_numbers = true)]
    growth: Option<f64>,

    /// Starting price; skips the price feed
    #[arg(long)]
    price: Option<f64>,

    /// Never contact price providers; use the fallback price when --price is absent
    #[arg(long)]
    offline: bool,

    /// Last-resort starting price when every provider fails
    #[arg(long, default_value_t = DEFAULT_FALLBACK_PRICE)]
    fallback_price: f64,

    /// Seconds between price refreshes in --watch mode
    #[arg(long, default_value_t = 60)]
    poll_secs: u64,

    /// Keep refreshing the price and re-projecting until interrupted
    #[arg(long, conflicts_with_all = ["price", "offline"])]
    watch: bool,

    /// Write the monthly series to this CSV file
    #[arg(long)]
    monthly_csv: Option<PathBuf>,

    /// Write the yearly series to this CSV file
    #[arg(long)]
    yearly_csv: Option<PathBuf>,

    /// Base address for the printed share link
    #[arg(long, default_value = DEFAULT_SHARE_BASE_URL)]
    share_base: String,
}

impl Cli {
    /// Inputs from --query, overridden by explicit flags
    fn inputs(&self) -> ProjectionInputs {
        let mut inputs = match &self.query {
            Some(query) => preset::from_query(query),
            None => ProjectionInputs::default(),
        };

        if let Some(initial) = self.initial {
            inputs.initial_investment = initial;
        }
        if let Some(dca) = self.dca {
            inputs.periodic_contribution = dca;
        }
        if let Some(years) = self.years {
            inputs.horizon_years = years;
        }
        if let Some(growth) = self.growth {
            inputs.annual_growth_rate_percent = growth;
        }

        inputs
    }

    fn feed_config(&self) -> PriceFeedConfig {
        PriceFeedConfig {
            fallback_price: self.fallback_price,
            poll_interval: Duration::from_secs(self.poll_secs.max(1)),
            ..PriceFeedConfig::default()
        }
    }
}

fn print_report(
    engine: &ProjectionEngine,
    inputs: &ProjectionInputs,
    quote: PriceQuote,
    cli: &Cli,
) -> Result<()> {
    let result = engine.project(inputs);
    let summary = result.summary();

    println!("Starting price: {} ({:?})", format_fiat(quote.price), quote.origin);
    println!();
    println!("{}", results_sentence(inputs, &result));
    println!();
    println!("  Total {} Stacked:  {}", ASSET_SYMBOL, format_asset(result.total_asset_quantity));
    println!("  Total Future Value: {}", format_fiat(result.final_portfolio_value));
    println!("  Total Invested:     {}", format_fiat(result.total_contributed));
    println!("  Total Sats:         {}", format_sub_units(result.total_sub_units));
    println!(
        "  Projected {} Price in {}: {} ({} per year)",
        ASSET_SYMBOL,
        engine.projected_year(inputs),
        format_fiat(summary.final_price),
        format_percent(inputs.annual_growth_rate_percent)
    );
    println!("  Gain: {} ({:.2}x)", format_fiat(summary.unrealized_gain), summary.return_multiple);
    println!();
    print!("{}", render_table(&result.yearly_series));
    println!();
    println!("{}", share_text(inputs, &result));
    println!("{}", preset::share_url(&cli.share_base, inputs));

    if let Some(path) = &cli.monthly_csv {
        write_series_csv_path(path, &result.monthly_series)
            .with_context(|| format!("writing monthly series to {}", path.display()))?;
        info!("monthly series written to {}", path.display());
    }
    if let Some(path) = &cli.yearly_csv {
        write_series_csv_path(path, &result.yearly_series)
            .with_context(|| format!("writing yearly series to {}", path.display()))?;
        info!("yearly series written to {}", path.display());
    }

    Ok(())
}

async fn watch(
    engine: &ProjectionEngine,
    inputs: &ProjectionInputs,
    config: &PriceFeedConfig,
    cli: &Cli,
) -> Result<()> {
    let mut feed = PriceFeed::from_config(config).context("building price feed")?;
    let mut interval = tokio::time::interval(config.poll_interval);
    let mut shown: Option<f64> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let quote = feed.resolve().await;
                // Recompute only when the price moved; the latest price always wins
                if shown != Some(quote.price) {
                    shown = Some(quote.price);
                    print_report(engine, &inputs.clone().with_price(quote.price), quote, cli)?;
                    println!("{}", "=".repeat(99));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping price watch");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.inputs();
    if let Err(reason) = preset::validate(&inputs) {
        bail!("invalid inputs: {}", reason);
    }

    let engine = ProjectionEngine::default();
    let config = cli.feed_config();

    if cli.watch {
        return watch(&engine, &inputs, &config, &cli).await;
    }

    let quote = match (cli.price, cli.offline) {
        (Some(price), _) => {
            if !(price > 0.0) {
                bail!("--price must be positive, got {}", price);
            }
            PriceQuote { price, origin: PriceOrigin::Manual }
        }
        (None, true) => PriceQuote {
            price: config.fallback_price,
            origin: PriceOrigin::Fallback,
        },
        (None, false) => {
            let mut feed = PriceFeed::from_config(&config).context("building price feed")?;
            feed.resolve().await
        }
    };

    print_report(&engine, &inputs.with_price(quote.price), quote, &cli)
}
