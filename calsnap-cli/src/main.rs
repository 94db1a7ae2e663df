mod commands;
mod config;
mod render;
mod source;
mod utils;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use crate::config::{CalsnapConfig, ConfigOverrides};
use crate::source::Source;

#[derive(Parser)]
#[command(name = "calsnap")]
#[command(about = "Find meeting times that work for everyone from their .ics calendars")]
struct Cli {
    /// More logging on stderr (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank meeting slots across the given calendars
    Find {
        /// Calendar files or http(s) URLs (defaults to `calendars` from the config file)
        sources: Vec<String>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the busy intervals read from each calendar
    Events {
        /// Calendar files or http(s) URLs (defaults to `calendars` from the config file)
        sources: Vec<String>,

        /// Show every event, not only those in the search window
        #[arg(short, long)]
        all: bool,

        /// Days ahead to list
        #[arg(long)]
        days: Option<u32>,

        /// Time zone for floating times (e.g. "Europe/Berlin")
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Show the config file path and effective settings
    Config {
        /// Write a commented default config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Meeting length in minutes
    #[arg(short, long)]
    duration: Option<u32>,

    /// Days ahead to search
    #[arg(long)]
    days: Option<u32>,

    /// First working hour (0-23)
    #[arg(long)]
    start: Option<u32>,

    /// Hour the working day ends (1-24)
    #[arg(long)]
    end: Option<u32>,

    /// Keep lunch free
    #[arg(long, conflicts_with = "no_lunch")]
    lunch: bool,

    /// Ignore lunch even if the config file enables it
    #[arg(long)]
    no_lunch: bool,

    /// Lunch start hour
    #[arg(long)]
    lunch_start: Option<u32>,

    /// Lunch end hour
    #[arg(long)]
    lunch_end: Option<u32>,

    /// Number of slots to show
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Time zone for working hours and floating times (e.g. "Europe/Berlin")
    #[arg(long)]
    timezone: Option<String>,
}

impl From<SearchArgs> for ConfigOverrides {
    fn from(args: SearchArgs) -> Self {
        let lunch_enabled = match (args.lunch, args.no_lunch) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        ConfigOverrides {
            duration_minutes: args.duration,
            search_days: args.days,
            day_start_hour: args.start,
            day_end_hour: args.end,
            lunch_enabled,
            lunch_start_hour: args.lunch_start,
            lunch_end_hour: args.lunch_end,
            timezone: args.timezone,
            limit: args.limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            sources,
            search,
            json,
        } => {
            let config = CalsnapConfig::load()?.with_overrides(search.into());
            let sources = resolve_sources(sources, &config)?;
            commands::find::run(sources, config, json).await
        }
        Commands::Events {
            sources,
            all,
            days,
            timezone,
        } => {
            let config = CalsnapConfig::load()?.with_overrides(ConfigOverrides {
                search_days: days,
                timezone,
                ..Default::default()
            });
            let sources = resolve_sources(sources, &config)?;
            commands::events::run(sources, config, all).await
        }
        Commands::Config { init } => commands::config::run(init),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // Only fails if a logger is already installed
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn resolve_sources(args: Vec<String>, config: &CalsnapConfig) -> Result<Vec<Source>> {
    let raw = if args.is_empty() { config.calendars.clone() } else { args };

    if raw.is_empty() {
        anyhow::bail!(
            "No calendars given.\n\n\
            Pass .ics files or URLs:\n  \
            calsnap find alice.ics bob.ics https://example.com/carol.ics\n\n\
            Or list them under `calendars` in the config file:\n  \
            calsnap config --init"
        );
    }

    Ok(raw.iter().map(|s| Source::parse(s)).collect())
}
