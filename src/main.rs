mod analysis;
mod config;
mod display;
mod error;
mod parser;
mod service;
mod store;

use analysis::report::TeamConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use display::output::{
    display_error, display_global_ranking, display_info, display_ingested_matches, display_match_list,
    display_match_report, display_mvp_report, display_success,
};
use error::AppError;
use indicatif::ProgressBar;
use serde::Serialize;
use service::LogService;
use std::path::PathBuf;
use store::JsonMatchStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Frag Report")]
#[command(about = "Match statistics and leaderboards from deathmatch server logs", long_about = None)]
struct Args {
    /// Directory holding the match archive (overrides FRAG_REPORT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a raw server log and store one report per match
    Ingest {
        /// Path to the log file
        log_file: PathBuf,

        /// Team configuration JSON, {"team": ["player", ...]} (overrides FRAG_REPORT_TEAMS)
        #[arg(short, long)]
        teams: Option<PathBuf>,
    },

    /// Frags and deaths summed across all stored matches
    Ranking,

    /// Players ranked by awards won across all stored matches
    Mvp,

    /// List stored matches
    Matches,

    /// Show the full report of one match
    Show {
        /// Match id as written in the log, e.g. 11348965
        match_id: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = JsonMatchStore::open(&config.data_dir)?;
    tracing::debug!(path = %store.path().display(), "opened match archive");
    let mut service = LogService::new(store);

    match args.command {
        Command::Ingest { log_file, teams } => {
            let content = std::fs::read_to_string(&log_file)
                .with_context(|| format!("Failed to read log file {}", log_file.display()))?;

            let teams = match teams.or(config.teams_file) {
                Some(path) => Some(TeamConfig::load(&path)?),
                None => None,
            };

            if !args.json {
                display_info(&format!("Processing {}", log_file.display()));
                if teams.is_none() {
                    display_info("No team configuration, friendly fire detection disabled");
                }
            }

            let pb = if args.json {
                ProgressBar::hidden()
            } else {
                ProgressBar::new_spinner()
            };
            pb.set_message("Building match reports");

            let stored = service.process_and_save_log(&content, teams.as_ref(), |report| {
                pb.set_message(format!("Built report for match {}", report.match_id));
                pb.inc(1);
            })?;
            pb.finish_and_clear();

            if args.json {
                print_json(&stored)?;
            } else {
                display_ingested_matches(&stored);
                if !stored.is_empty() {
                    display_success(&format!("Saved {} match report(s)", stored.len()));
                }
            }
        }
        Command::Ranking => {
            let ranking = service.global_ranking()?;
            if args.json {
                print_json(&ranking)?;
            } else {
                display_global_ranking(&ranking);
            }
        }
        Command::Mvp => {
            let report = service.mvp_report()?;
            if args.json {
                print_json(&report)?;
            } else {
                display_mvp_report(&report);
            }
        }
        Command::Matches => {
            let matches = service.matches_summary()?;
            if args.json {
                print_json(&matches)?;
            } else {
                display_match_list(&matches);
            }
        }
        Command::Show { match_id } => {
            let stored = service
                .match_by_id(&match_id)?
                .ok_or(AppError::MatchNotFound(match_id))?;
            if args.json {
                print_json(&stored)?;
            } else {
                display_match_report(&stored);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::Json(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
