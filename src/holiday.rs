//! Holiday records as published in the Cabinet Office `syukujitsu.csv`.
//!
//! The file is a header line followed by `date,name` rows, where the date is
//! written either as `YYYY/MM/DD` or `YYYY-MM-DD`. Rows that cannot be read are
//! skipped, so a partially damaged file still yields every good record.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

/// A single holiday on a fixed date
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    year: i32,
    month: u32,
    day: u32,
    name: String,
}

impl HolidayRecord {
    /// Create a record, or `None` if `month` is not in 1..=12 or `day` not in 1..=31.
    ///
    /// The day is not checked against the real length of the month: a record for
    /// Feb 30 is kept and simply never shows up in a rendered calendar.
    pub fn new(year: i32, month: u32, day: u32, name: impl Into<String>) -> Option<HolidayRecord> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(HolidayRecord {
            year,
            month,
            day,
            name: name.into(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the record falls on the given date
    pub fn is_on(&self, year: i32, month: u32, day: u32) -> bool {
        self.year == year && self.month == month && self.day == day
    }
}

/// Split a `YYYY/MM/DD` or `YYYY-MM-DD` date into its numeric components.
///
/// Both separators may appear in the same field; anything other than exactly
/// three integer components is rejected.
pub fn parse_date(field: &str) -> Option<(i32, u32, u32)> {
    let normalized = field.trim().replace('/', "-");
    let parts: Vec<&str> = normalized.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;
    Some((year, month, day))
}

/// Holidays in file order. Duplicate dates are kept; lookups return the first.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HolidayCollection {
    records: Vec<HolidayRecord>,
}

impl HolidayCollection {
    pub fn new() -> HolidayCollection {
        HolidayCollection::default()
    }

    /// Load the collection from a cache file.
    ///
    /// A missing file is reported as [`Error::CacheMissing`] so that callers can
    /// offer to download it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<HolidayCollection> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::CacheMissing(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let holidays = HolidayCollection::from_reader(file)?;
        info!(path = %path.display(), count = holidays.len(), "loaded holidays");
        Ok(holidays)
    }

    /// Parse holidays from any CSV source. The first line is a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<HolidayCollection> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.byte_records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    debug!("skipping unreadable row: {}", e);
                    continue;
                }
            };
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            if row.len() < 2 {
                debug!(line, "skipping row with fewer than two fields");
                continue;
            }
            let date = String::from_utf8_lossy(&row[0]);
            let Some((year, month, day)) = parse_date(&date) else {
                debug!(line, date = %date, "skipping row with malformed date");
                continue;
            };
            let name = String::from_utf8_lossy(&row[1]).trim().to_string();
            match HolidayRecord::new(year, month, day, name) {
                Some(record) => records.push(record),
                None => debug!(line, date = %date, "skipping row with out of range date"),
            }
        }
        Ok(HolidayCollection { records })
    }

    /// First holiday on the given date, if any
    pub fn find(&self, year: i32, month: u32, day: u32) -> Option<&HolidayRecord> {
        self.records.iter().find(|h| h.is_on(year, month, day))
    }

    /// Returns true if some record falls on the given date
    pub fn is_holiday(&self, year: i32, month: u32, day: u32) -> bool {
        self.find(year, month, day).is_some()
    }

    /// All holidays of a month, in collection order
    pub fn in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &HolidayRecord> + '_ {
        self.records
            .iter()
            .filter(move |h| h.year == year && h.month == month)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HolidayRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<HolidayRecord> for HolidayCollection {
    fn from_iter<I: IntoIterator<Item = HolidayRecord>>(iter: I) -> Self {
        HolidayCollection {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HolidayCollection {
    type Item = &'a HolidayRecord;
    type IntoIter = std::slice::Iter<'a, HolidayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
