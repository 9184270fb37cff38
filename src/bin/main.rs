use anyhow::{Context, Result};
use clap::Parser;
use jpcal::config::{DataSource, RunConfig, Settings};
use jpcal::shell::{Outcome, Shell};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Print a monthly calendar marking Japanese national holidays
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Year to show, asked for if omitted
    year: Option<i32>,
    /// Month to show (1-12), asked for if omitted
    month: Option<u32>,
    /// Download the holiday data without asking if no cache exists
    #[arg(long, conflicts_with_all = ["refresh", "offline"])]
    download: bool,
    /// Download the holiday data even if a cache exists
    #[arg(long, conflicts_with = "offline")]
    refresh: bool,
    /// Never download, continue without holidays if no cache exists
    #[arg(long)]
    offline: bool,
    /// Holiday cache file
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,
    /// Holiday CSV source
    #[arg(long)]
    url: Option<String>,
    /// Print the month's holidays as JSON
    #[arg(long)]
    json: bool,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let source = if self.download {
            DataSource::Download
        } else if self.refresh {
            DataSource::Refresh
        } else if self.offline {
            DataSource::Offline
        } else {
            DataSource::Prompt
        };
        RunConfig {
            year: self.year,
            month: self.month,
            source,
            json: self.json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings = Settings::load().context("could not load jpcal settings")?;
    if let Some(cache) = &args.cache {
        settings.cache_path = cache.clone();
    }
    if let Some(url) = &args.url {
        settings.url = url.clone();
    }

    let run = args.run_config();
    let stdin = io::stdin().lock();
    let stdout = io::stdout();
    let console: Box<dyn Write> = if run.json {
        Box::new(io::stderr())
    } else {
        Box::new(stdout.lock())
    };
    let mut shell = Shell::new(settings, stdin, console, stdout.lock());

    match shell.run(&run)? {
        Outcome::Rendered => Ok(ExitCode::SUCCESS),
        Outcome::InvalidMonth | Outcome::InvalidYear => Ok(ExitCode::from(2)),
    }
}
