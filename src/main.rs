use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{debug, error};

use jobwatch::cli::Cli;
use jobwatch::clock::SystemClock;
use jobwatch::config::{self, Config};
use jobwatch::error::WatchError;
use jobwatch::fetch::HttpPageSource;
use jobwatch::logging;
use jobwatch::notify::TelegramBot;
use jobwatch::pipeline::{self, RunContext, RunSettings};
use jobwatch::watermark::WatermarkStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.file_name {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let config = config::load_config(&config_path)?;

    logging::init(&config.paths.log_file)?;
    debug!("Loaded config from {}", config_path.display());
    debug!("Chat id: {}", config.telegram.chat_id);

    match run_once(&config) {
        Ok(report) => {
            if report.new_jobs == 0 {
                println!("{} No new jobs!", "ℹ".blue().bold());
            } else {
                println!(
                    "{} Sent {} new job(s) out of {} listed",
                    "✓".green().bold(),
                    report.new_jobs.to_string().green(),
                    report.listed
                );
            }
            Ok(())
        }
        Err(err) => {
            if let Some(WatchError::HttpStatus { status, .. }) = err.downcast_ref::<WatchError>() {
                println!("{}", format!("Status code: {}", status).red());
            }
            error!("Run aborted: {:#}", err);
            Err(err)
        }
    }
}

fn run_once(config: &Config) -> Result<pipeline::RunReport> {
    let timeout = config.source.timeout();
    let source = HttpPageSource::new(timeout)?;
    let bot = TelegramBot::new(&config.telegram.api_base, &config.telegram.api_key, timeout)?;
    let clock = SystemClock;

    let ctx = RunContext {
        source: &source,
        messenger: &bot,
        clock: &clock,
        store: WatermarkStore::new(&config.paths.state_file),
        settings: RunSettings {
            url: config.source.url.clone(),
            base_url: config.source.base_url.clone(),
            chat_id: config.telegram.chat_id.clone(),
            parse_mode: config.telegram.parse_mode.clone(),
        },
    };

    pipeline::run(&ctx)
}
