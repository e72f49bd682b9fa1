// Notification module - message formatting and delivery

pub mod telegram;

pub use telegram::TelegramBot;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::JobRecord;

pub const NO_NEW_JOBS: &str = "No new jobs!";

/// Delivery channel for outbound messages
pub trait Messenger {
    fn send(&self, chat_id: &str, text: &str, parse_mode: &str) -> Result<()>;
}

/// Render one listing as a Markdown chat message
pub fn format_job_message(job: &JobRecord) -> String {
    format!(
        "[{}]({})\n{}  {}\n\n***Category*** \n{}\n\n***Organization*** \n{}\n",
        job.title, job.link, job.updated, job.county, job.category, job.organization
    )
}

/// Send one message per job, in order, or a single "no new jobs" message.
///
/// Stops at the first failed delivery. Returns the number of messages sent.
pub fn notify_jobs(
    messenger: &dyn Messenger,
    chat_id: &str,
    parse_mode: &str,
    jobs: &[JobRecord],
) -> Result<usize> {
    if jobs.is_empty() {
        info!("No new jobs!");
        messenger.send(chat_id, NO_NEW_JOBS, parse_mode)?;
        return Ok(1);
    }

    for (idx, job) in jobs.iter().enumerate() {
        debug!("Sending job {}/{}: {}", idx + 1, jobs.len(), job.title);
        messenger
            .send(chat_id, &format_job_message(job), parse_mode)
            .with_context(|| format!("failed to deliver job {:?}", job.title))?;
    }
    info!("Sent {} new job(s)", jobs.len());
    Ok(jobs.len())
}
