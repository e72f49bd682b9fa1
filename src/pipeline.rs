//! One run of the listing watch
//!
//! fetch -> extract -> filter -> notify -> persist watermark. Every stage
//! failure ends the run before the watermark file is touched.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::extract::extract_jobs;
use crate::fetch::PageSource;
use crate::filter::new_since;
use crate::notify::{notify_jobs, Messenger};
use crate::watermark::{Watermark, WatermarkStore};

/// Per-run settings taken from the config file
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub url: String,
    pub base_url: String,
    pub chat_id: String,
    pub parse_mode: String,
}

/// Collaborators for a single run
pub struct RunContext<'a> {
    pub source: &'a dyn PageSource,
    pub messenger: &'a dyn Messenger,
    pub clock: &'a dyn Clock,
    pub store: WatermarkStore,
    pub settings: RunSettings,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub listed: usize,
    pub new_jobs: usize,
    pub messages_sent: usize,
    pub watermark: Watermark,
}

pub fn run(ctx: &RunContext<'_>) -> Result<RunReport> {
    let settings = &ctx.settings;

    let page = ctx.source.fetch(&settings.url)?;
    let html = page.into_html(&settings.url)?;

    let jobs = extract_jobs(&html, &settings.base_url)
        .with_context(|| format!("Failed to extract listings from {}", settings.url))?;
    info!("Found {} listings", jobs.len());

    let last_run = match ctx.store.load()? {
        Some(watermark) => watermark,
        None => {
            let baseline = Watermark::from_datetime(ctx.clock.now());
            warn!(
                "No watermark at {}, using {} as first-run baseline",
                ctx.store.path().display(),
                baseline
            );
            baseline
        }
    };
    debug!("Last run watermark: {}", last_run);

    let fresh = new_since(&jobs, last_run).context("Failed to filter listings")?;
    info!("{} listing(s) newer than {}", fresh.len(), last_run);
    for job in &fresh {
        debug!("New listing: {}", serde_json::to_string(job).unwrap_or_default());
    }

    let messages_sent = notify_jobs(ctx.messenger, &settings.chat_id, &settings.parse_mode, &fresh)?;

    let watermark = Watermark::from_datetime(ctx.clock.now());
    ctx.store.save(watermark)?;
    info!("Successfully ran at {}", watermark);

    Ok(RunReport {
        listed: jobs.len(),
        new_jobs: fresh.len(),
        messages_sent,
        watermark,
    })
}
