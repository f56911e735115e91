use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gramlens_browser::BrowserlessDriver;
use gramlens_collector::{CollectorTuning, StaticRoster};
use gramlens_core::{AnalyzeReport, UuidIdGenerator};
use gramlens_pipeline::{
    AnalyzeOptions, Pipeline, DEFAULT_COMPETITOR_COUNT, DEFAULT_GENERATE_POST_COUNT,
    DEFAULT_MAX_RECENT_POSTS, DEFAULT_RECENCY_WINDOW_DAYS,
};

#[derive(Debug, Parser)]
#[command(name = "gramlens-cli")]
#[command(about = "Instagram brand intelligence, one shot at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full analysis pipeline for a target handle and print the
    /// report as JSON.
    Analyze {
        /// Target handle (`name`, `@name` or a full profile URL).
        #[arg(long)]
        handle: String,
        #[arg(long, default_value_t = DEFAULT_RECENCY_WINDOW_DAYS)]
        recency_window_days: u32,
        #[arg(long, default_value_t = DEFAULT_MAX_RECENT_POSTS)]
        max_recent_posts: usize,
        #[arg(long, default_value_t = DEFAULT_COMPETITOR_COUNT)]
        competitor_count: usize,
        #[arg(long, default_value_t = DEFAULT_GENERATE_POST_COUNT)]
        post_count: usize,
    },
    /// Render a saved report JSON file as an HTML document.
    Render {
        /// Path to a report JSON file (as printed by `analyze`).
        #[arg(long)]
        input: PathBuf,
        /// Where to write the HTML document.
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            handle,
            recency_window_days,
            max_recent_posts,
            competitor_count,
            post_count,
        } => {
            let options = AnalyzeOptions {
                target_handle: handle,
                recency_window_days,
                max_recent_posts,
                competitor_count,
                generate_post_count: post_count,
            };
            let report = build_pipeline()?.run(&options).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Render { input, output } => {
            let raw = std::fs::read_to_string(&input)?;
            let report: AnalyzeReport = serde_json::from_str(&raw)?;
            std::fs::write(&output, gramlens_report::render_report(&report))?;
            tracing::info!(output = %output.display(), "report rendered");
        }
    }

    Ok(())
}

fn build_pipeline() -> anyhow::Result<Pipeline> {
    let config = gramlens_core::load_app_config()?;
    let roster = gramlens_core::load_roster(&config.competitors_path)?;

    let navigation_timeout = Duration::from_secs(config.navigation_timeout_secs);
    let scroll_step_delay = Duration::from_millis(config.scroll_step_delay_ms);
    let request_timeout =
        navigation_timeout + scroll_step_delay * config.scroll_steps + Duration::from_secs(20);
    let driver = BrowserlessDriver::new(
        &config.browserless_url,
        config.browserless_token.as_deref(),
        request_timeout,
    )?;

    let tuning = CollectorTuning {
        navigation_timeout,
        scroll_steps: config.scroll_steps,
        scroll_step_delay,
        ..CollectorTuning::default()
    };

    Ok(Pipeline::new(
        Arc::new(driver),
        Arc::new(UuidIdGenerator),
        Arc::new(StaticRoster::new(roster)),
        tuning,
    ))
}
