//! Monthly calendar with Japanese national holidays.
//!
//! Holidays come from the Cabinet Office CSV, cached locally after the first
//! download:
//!
//! ```rust,no_run
//! use jpcal::calendar::MonthView;
//! use jpcal::holiday::HolidayCollection;
//!
//! let holidays = HolidayCollection::load("holidays.csv")?;
//! print!("{}", MonthView::new(&holidays, 2025, 5)?);
//! # Ok::<(), jpcal::Error>(())
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod fetch;
pub mod holiday;
pub mod shell;

pub use error::{Error, Result};
