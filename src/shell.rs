//! Interactive front end: fills in missing input, loads or downloads the
//! holidays and prints the month.
//!
//! The shell writes the calendar (or JSON listing) to `output` and everything
//! else, prompts and status lines, to `console`. The binary points both at
//! stdout unless JSON was requested.

use crate::calendar::MonthView;
use crate::config::{DataSource, RunConfig, Settings};
use crate::error::{Error, Result};
use crate::fetch::{fetch_holidays, FetchOutcome};
use crate::holiday::{HolidayCollection, HolidayRecord};
use chrono::{Datelike, Local};
use std::io::{BufRead, Write};
use tracing::warn;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    /// Month outside 1..=12 or not a number, nothing was rendered
    InvalidMonth,
    /// Year outside the supported date range, nothing was rendered
    InvalidYear,
}

pub struct Shell<R, C, W> {
    settings: Settings,
    input: R,
    console: C,
    output: W,
}

impl<R: BufRead, C: Write, W: Write> Shell<R, C, W> {
    pub fn new(settings: Settings, input: R, console: C, output: W) -> Self {
        Shell {
            settings,
            input,
            console,
            output,
        }
    }

    pub fn run(&mut self, run: &RunConfig) -> Result<Outcome> {
        writeln!(self.console, "=== 月間カレンダー（祝日対応版） ===")?;
        writeln!(self.console)?;

        let holidays = self.load_holidays(run.source)?;

        let year = match run.year {
            Some(year) => year,
            None => {
                writeln!(self.console)?;
                let answer = self.ask("年を入力してください (例: 2025): ")?;
                answer.parse().unwrap_or_else(|_| Local::now().year())
            }
        };
        let month = match run.month {
            Some(month) => Some(month),
            None => {
                let answer = self.ask("月を入力してください (1-12): ")?;
                answer.parse::<u32>().ok()
            }
        };
        let month = match month {
            Some(month) if (1..=12).contains(&month) => month,
            _ => {
                writeln!(self.console, "月は1から12の間で入力してください。")?;
                return Ok(Outcome::InvalidMonth);
            }
        };

        let view = match MonthView::new(&holidays, year, month) {
            Ok(view) => view,
            Err(Error::InvalidDate { .. }) => {
                writeln!(self.console, "{}年は表示できません。", year)?;
                return Ok(Outcome::InvalidYear);
            }
            Err(e) => return Err(e),
        };
        if run.json {
            let records: Vec<&HolidayRecord> = view.holidays().collect();
            serde_json::to_writer_pretty(&mut self.output, &records)?;
            writeln!(self.output)?;
            self.output.flush()?;
        } else {
            view.write_to(&mut self.output)?;
        }
        Ok(Outcome::Rendered)
    }

    fn load_holidays(&mut self, source: DataSource) -> Result<HolidayCollection> {
        if source == DataSource::Refresh {
            // a failed download leaves any previous cache in place
            self.download()?;
            return self.read_cache();
        }

        match HolidayCollection::load(&self.settings.cache_path) {
            Ok(holidays) => {
                self.report_loaded(&holidays)?;
                return Ok(holidays);
            }
            Err(Error::CacheMissing(path)) => {
                writeln!(
                    self.console,
                    "ローカルファイル '{}' が見つかりません。",
                    path.display()
                )?;
            }
            Err(e) => {
                writeln!(self.console, "読み込みエラー: {}", e)?;
                return self.without_holidays();
            }
        }

        let consent = match source {
            DataSource::Prompt => {
                let answer = self.ask("内閣府から祝日データをダウンロードしますか？ (y/n): ")?;
                answer.eq_ignore_ascii_case("y")
            }
            DataSource::Download | DataSource::Refresh => true,
            DataSource::Offline => false,
        };
        if consent && self.download()? {
            self.read_cache()
        } else {
            self.without_holidays()
        }
    }

    /// Returns false if the download failed; the failure is reported, not raised
    fn download(&mut self) -> Result<bool> {
        writeln!(self.console, "内閣府から祝日データをダウンロード中...")?;
        let cache_path = self.settings.cache_path.clone();
        match fetch_holidays(&self.settings.url, &cache_path, self.settings.timeout()) {
            Ok(outcome) => {
                writeln!(
                    self.console,
                    "祝日データを保存しました: {}",
                    cache_path.display()
                )?;
                match outcome {
                    FetchOutcome::Converted => writeln!(self.console, "✅ UTF-8に変換しました")?,
                    FetchOutcome::Raw => writeln!(self.console, "⚠️  UTF-8変換をスキップしました")?,
                }
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "holiday download failed");
                writeln!(self.console, "ダウンロードエラー: {}", e)?;
                Ok(false)
            }
        }
    }

    fn read_cache(&mut self) -> Result<HolidayCollection> {
        match HolidayCollection::load(&self.settings.cache_path) {
            Ok(holidays) => {
                self.report_loaded(&holidays)?;
                Ok(holidays)
            }
            Err(e) => {
                writeln!(self.console, "読み込みエラー: {}", e)?;
                self.without_holidays()
            }
        }
    }

    fn without_holidays(&mut self) -> Result<HolidayCollection> {
        writeln!(self.console, "祝日データなしで続行します。")?;
        Ok(HolidayCollection::new())
    }

    fn report_loaded(&mut self, holidays: &HolidayCollection) -> Result<()> {
        writeln!(self.console, "祝日データを読み込みました: {}件", holidays.len())?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; end of input reads as empty
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.console, "{}", prompt)?;
        self.console.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}
