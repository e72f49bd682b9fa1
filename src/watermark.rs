use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WatchError;

/// On-disk format, e.g. `03-Dec-20`
pub const WATERMARK_FORMAT: &str = "%d-%b-%y";
const LEGACY_FORMAT_WITH_TIME: &str = "%d-%b-%y %H:%M";

/// Day-granularity cutoff separating seen listings from new ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Watermark(NaiveDate);

impl Watermark {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_datetime(instant: NaiveDateTime) -> Self {
        Self(instant.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, WATERMARK_FORMAT) {
            return Ok(Self(date));
        }
        NaiveDateTime::parse_from_str(value, LEGACY_FORMAT_WITH_TIME)
            .map(Self::from_datetime)
            .map_err(|_| WatchError::ParseError(format!("invalid watermark: {:?}", value)).into())
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WATERMARK_FORMAT))
    }
}

/// Flat file holding the last successful run's watermark
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored watermark; `None` when no run has completed yet
    pub fn load(&self) -> Result<Option<Watermark>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read watermark file {}", self.path.display()))?;
        let watermark = Watermark::parse(&content)
            .with_context(|| format!("Corrupt watermark file {}", self.path.display()))?;
        Ok(Some(watermark))
    }

    pub fn save(&self, watermark: Watermark) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create watermark directory")?;
        }
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, watermark.to_string()).context("Failed to write watermark file")?;
        fs::rename(&tmp_path, &self.path).context("Failed to finalize watermark file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    #[test]
    fn test_parse_canonical_format() {
        let wm = Watermark::parse("03-Dec-20").unwrap();
        assert_eq!(wm.date(), NaiveDate::from_ymd_opt(2020, 12, 3).unwrap());
    }

    #[test]
    fn test_parse_legacy_time_variant_truncates_to_day() {
        let wm = Watermark::parse("03-Dec-20 17:45\n").unwrap();
        assert_eq!(wm.date(), NaiveDate::from_ymd_opt(2020, 12, 3).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Watermark::parse("last tuesday").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WatchError>(),
            Some(WatchError::ParseError(_))
        ));
    }

    #[test]
    fn test_display_uses_file_format() {
        let wm = Watermark::new(NaiveDate::from_ymd_opt(2021, 3, 7).unwrap());
        assert_eq!(wm.to_string(), "07-Mar-21");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("run_timestamp.txt"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips_day() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("state").join("run_timestamp.txt"));
        let now = NaiveDate::from_ymd_opt(2020, 12, 3)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());

        store.save(Watermark::from_datetime(now)).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.date(), now.date());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "03-Dec-20");
        assert!(!dir.path().join("state").join("run_timestamp.txt.tmp").exists());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("run_timestamp.txt"));
        store
            .save(Watermark::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()))
            .unwrap();
        store
            .save(Watermark::new(NaiveDate::from_ymd_opt(2020, 12, 3).unwrap()))
            .unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "03-Dec-20");
    }
}
