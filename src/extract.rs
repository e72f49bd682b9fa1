//! Listing table extraction
//!
//! Walks the first `<table>` on the page one `<tr>` at a time and reads each
//! column from its own cell, so a row can never borrow a value from a
//! neighbouring row.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::error::WatchError;
use crate::models::JobRecord;

pub const TITLE_CLASS: &str = "views-field-title";
pub const CATEGORY_CLASS: &str = "views-field-field-jp-category";
pub const ORGANIZATION_CLASS: &str = "views-field-field-jp-organization-name";
pub const UPDATED_CLASS: &str = "views-field-changed";
pub const COUNTY_CLASS: &str = "views-field-field-ypl-county";

struct RowSelectors {
    title: Selector,
    category: Selector,
    organization: Selector,
    updated: Selector,
    county: Selector,
    any_column: Selector,
    link: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            title: cell_selector(TITLE_CLASS)?,
            category: cell_selector(CATEGORY_CLASS)?,
            organization: cell_selector(ORGANIZATION_CLASS)?,
            updated: cell_selector(UPDATED_CLASS)?,
            county: cell_selector(COUNTY_CLASS)?,
            any_column: parse_selector(
                &[
                    TITLE_CLASS,
                    CATEGORY_CLASS,
                    ORGANIZATION_CLASS,
                    UPDATED_CLASS,
                    COUNTY_CLASS,
                ]
                .iter()
                .map(|class| format!("td.{}", class))
                .collect::<Vec<_>>()
                .join(", "),
            )?,
            link: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {}: {}", css, e))
}

fn cell_selector(class: &str) -> Result<Selector> {
    parse_selector(&format!("td.{}", class))
}

/// Extract every job row from the listings page, in document order
pub fn extract_jobs(html: &str, base_url: &str) -> Result<Vec<JobRecord>> {
    let document = Html::parse_document(html);
    let table_sel = parse_selector("table")?;
    let row_sel = parse_selector("tr")?;
    let selectors = RowSelectors::new()?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| WatchError::ParseError("no <table> found on listings page".to_string()))?;

    let mut jobs = Vec::new();
    for (idx, row) in table.select(&row_sel).enumerate() {
        if row.select(&selectors.any_column).next().is_none() {
            // header or spacer row
            continue;
        }
        let title_cell = row.select(&selectors.title).next().ok_or_else(|| {
            WatchError::ParseError(format!("row {} is missing the title column", idx + 1))
        })?;
        jobs.push(parse_row(row, title_cell, &selectors, base_url, idx + 1)?);
    }

    tracing::debug!("Extracted {} job rows", jobs.len());
    Ok(jobs)
}

fn parse_row(
    row: ElementRef<'_>,
    title_cell: ElementRef<'_>,
    selectors: &RowSelectors,
    base_url: &str,
    row_number: usize,
) -> Result<JobRecord> {
    let column = |selector: &Selector, name: &str| -> Result<String> {
        row.select(selector)
            .next()
            .map(cell_text)
            .ok_or_else(|| {
                WatchError::ParseError(format!("row {} is missing the {} column", row_number, name))
                    .into()
            })
    };

    let href = title_cell
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| WatchError::ParseError(format!("row {} has no job link", row_number)))?;

    Ok(JobRecord {
        title: cell_text(title_cell),
        category: column(&selectors.category, "category")?,
        organization: column(&selectors.organization, "organization")?,
        updated: column(&selectors.updated, "updated date")?,
        county: column(&selectors.county, "county")?,
        link: absolute_link(base_url, href),
    })
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix relative links with the site origin; absolute links pass through
pub fn absolute_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
