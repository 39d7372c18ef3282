mod analysis;
mod api;
mod config;
mod display;
mod error;
mod history;
mod logging;

use api::client::RiotApiClient;
use api::ddragon::PortraitFetcher;
use api::live_client;
use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand};
use config::{Config, Overrides};
use display::output::{
    display_error, display_info, display_live_status, display_no_history, display_report,
    display_success, Portraits,
};
use error::AppError;
use history::pipeline::{generate_report, HistoryOutcome, DEFAULT_MATCH_COUNT};
use indicatif::ProgressBar;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "LoL Track")]
#[command(about = "Recent match history and stats for a Riot ID", long_about = None)]
struct Args {
    /// Path to a config.json (defaults: ./config.json, ~/.lol_track/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Routing cluster for account lookups (americas, asia, europe)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Routing cluster for match lookups (americas, asia, europe, sea)
    #[arg(long, global = true)]
    routing: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show win rate, KDA, top champions and role over recent matches
    Report {
        /// Riot ID, e.g. "Hide on bush#KR1"
        riot_id: String,

        /// Number of recent matches to load
        #[arg(short, long, default_value_t = DEFAULT_MATCH_COUNT,
              value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from))]
        count: usize,

        /// Download champion portraits into this directory
        #[arg(long)]
        save_portraits: Option<PathBuf>,
    },
    /// Check whether a game is running on this machine
    Live,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        if let AppError::AccountNotFound { body, .. } = &e {
            tracing::debug!("account lookup response: {}", body);
        }
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let overrides = Overrides {
        region: args.region,
        routing: args.routing,
    };
    let config = Config::load(args.config.as_deref(), overrides)?;

    match args.command {
        Command::Report {
            riot_id,
            count,
            save_portraits,
        } => run_report(config, &riot_id, count, save_portraits.as_deref()),
        Command::Live => run_live(&config),
    }
}

fn run_report(
    config: Config,
    riot_id: &str,
    count: usize,
    save_portraits: Option<&Path>,
) -> Result<(), AppError> {
    display_info(&format!(
        "Fetching {} recent matches for {} (account: {}, matches: {})",
        count, riot_id, config.region, config.routing
    ));

    let ddragon_version = config.ddragon_version.clone();
    let timeout = config.timeout;
    let client = RiotApiClient::new(config)?;

    let pb = ProgressBar::new(count as u64);
    pb.set_message("Fetching match details");
    let outcome = generate_report(&client, riot_id, count, &pb);
    pb.finish_and_clear();

    let report = match outcome? {
        HistoryOutcome::NoHistory { riot_id } => {
            display_no_history(&riot_id);
            return Ok(());
        }
        HistoryOutcome::Report(report) => report,
    };
    display_success(&format!(
        "Loaded {}/{} matches",
        report.records.len(),
        report.requested
    ));

    let fetcher = PortraitFetcher::new(ddragon_version, timeout);
    let saved = match save_portraits {
        Some(dir) => fetcher.save_all(
            report.records.iter().map(|r| r.champion_name.as_str()),
            dir,
        ),
        None => BTreeMap::new(),
    };
    let portraits = Portraits {
        version: fetcher.version().to_string(),
        saved,
    };

    display_report(&report, &portraits);
    Ok(())
}

fn run_live(config: &Config) -> Result<(), AppError> {
    let status = live_client::probe(&config.live_client_url, config.timeout)?;
    display_live_status(&status);
    Ok(())
}
