//! Jobwatch - nonprofit job board watcher
//!
//! This library fetches a job listings page, extracts its table rows,
//! keeps the listings updated since the last successful run, and forwards
//! them to a Telegram chat.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod watermark;
