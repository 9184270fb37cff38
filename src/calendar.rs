//! Month calendar layout with holiday marks.
//! Week rows start on Sunday and every day takes a four character cell.

use crate::error::{Error, Result};
use crate::holiday::{HolidayCollection, HolidayRecord};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::io::{self, Write};

/// Weekday labels, Sunday first
pub const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

const RULE: &str = "----------------------------";
const BLANK_CELL: &str = "    ";
const HOLIDAY_MARK: char = '*';

/// First day of the given month
pub fn first_day(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidDate { year, month })
}

/// Weekday of the first day of the month, 0 for Sunday through 6 for Saturday
pub fn first_weekday(year: i32, month: u32) -> Result<u32> {
    Ok(first_day(year, month)?.weekday().num_days_from_sunday())
}

/// Calculate the number of days of a given month in a given year
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    first_day(year, month)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month
        .and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .ok_or(Error::InvalidDate { year, month })
}

/// A single month laid out against a holiday collection.
///
/// Building the view validates the month; rendering it afterwards cannot fail
/// except on the output itself.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    holidays: &'a HolidayCollection,
    year: i32,
    month: u32,
    first_weekday: u32,
    days: u32,
}

impl<'a> MonthView<'a> {
    pub fn new(holidays: &'a HolidayCollection, year: i32, month: u32) -> Result<MonthView<'a>> {
        Ok(MonthView {
            holidays,
            year,
            month,
            first_weekday: first_weekday(year, month)?,
            days: days_in_month(year, month)?,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Holidays of this month in collection order
    pub fn holidays(&self) -> impl Iterator<Item = &'a HolidayRecord> + 'a {
        self.holidays.in_month(self.year, self.month)
    }

    /// Write the calendar followed by the month's holiday list
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }

    fn fmt_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.first_weekday {
            f.write_str(BLANK_CELL)?;
        }
        let mut column = self.first_weekday;
        for day in 1..=self.days {
            let mark = if self.holidays.is_holiday(self.year, self.month, day) {
                HOLIDAY_MARK
            } else {
                ' '
            };
            write!(f, "{:3}{}", day, mark)?;
            column += 1;
            if column == 7 {
                writeln!(f)?;
                column = 0;
            }
        }
        if column != 0 {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for MonthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "        {}年 {}月", self.year, self.month)?;
        writeln!(f, "{}", RULE)?;
        for label in WEEKDAYS.iter() {
            write!(f, " {} ", label)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        self.fmt_grid(f)?;
        writeln!(f, "{}", RULE)?;

        writeln!(f)?;
        writeln!(f, "【祝日】")?;
        let mut any = false;
        for holiday in self.holidays() {
            writeln!(f, "  {:2}日: {}", holiday.day(), holiday.name())?;
            any = true;
        }
        if !any {
            writeln!(f, "  なし")?;
        }
        writeln!(f)
    }
}
