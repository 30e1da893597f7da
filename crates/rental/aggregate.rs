//! Group-by-then-sum summaries of the daily rental records.
//!
//! Every operation reads the selected records and returns a fresh [`Table`].
//! Categorical keys are grouped by exact string match, in order of first
//! appearance. The monthly table is the only one with a fixed shape: twelve
//! rows `Jan..Dec`, zero-filled.

use crate::error::RentalError;
use crate::month::Month;
use crate::record::DailyRecord;
use crate::table::{RiderSplit, Table};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// Rentals per calendar day.
pub type DailyTable = Table<NaiveDate, u64>;
/// Rentals per categorical value (weekday, flags, weather).
pub type CategoryTable = Table<String, u64>;
pub type SeasonTable = Table<String, RiderSplit>;
pub type MonthTable = Table<Month, u64>;

/// The three metrics shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// Everything the dashboard displays for one date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summaries {
    pub headline: Headline,
    pub daily: DailyTable,
    pub casual: DailyTable,
    pub registered: DailyTable,
    pub season: SeasonTable,
    pub monthly: MonthTable,
    pub weekday: CategoryTable,
    pub workingday: CategoryTable,
    pub holiday: CategoryTable,
    pub weathersit: CategoryTable,
}

impl Summaries {
    /// Categorical tables in display order, named.
    pub fn categories(&self) -> [(&'static str, &CategoryTable); 4] {
        [
            ("weathersit", &self.weathersit),
            ("weekday", &self.weekday),
            ("workingday", &self.workingday),
            ("holiday", &self.holiday),
        ]
    }
}

/// Read-only view over a selection of records.
#[derive(Debug, Clone, Default)]
pub struct Aggregator<'a> {
    records: Vec<&'a DailyRecord>,
}

impl<'a> Aggregator<'a> {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        Aggregator {
            records: records.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn by_date(&self, value: impl Fn(&DailyRecord) -> u64) -> DailyTable {
        Table::group_sum(self.records.iter().copied(), |r| r.date, |r| value(r))
    }

    fn by_category(&self, key: impl Fn(&DailyRecord) -> &str) -> CategoryTable {
        Table::group_sum(self.records.iter().copied(), |r| key(r).to_string(), |r| r.count)
    }

    pub fn daily_totals(&self) -> DailyTable {
        self.by_date(|r| r.count)
    }

    pub fn casual_totals(&self) -> DailyTable {
        self.by_date(|r| r.casual)
    }

    pub fn registered_totals(&self) -> DailyTable {
        self.by_date(|r| r.registered)
    }

    pub fn season_totals(&self) -> SeasonTable {
        Table::group_sum(
            self.records.iter().copied(),
            |r| r.season.clone(),
            |r| RiderSplit::new(r.casual, r.registered),
        )
    }

    /// Twelve rows `Jan..Dec`. Month keys that are not one of those literal
    /// abbreviations are dropped.
    pub fn monthly_totals(&self) -> MonthTable {
        let mut sums = [0u64; 12];
        let mut dropped = 0usize;
        for r in &self.records {
            match r.month.parse::<Month>() {
                Ok(m) => sums[m.index()] += r.count,
                Err(_) => {
                    debug!("month key {:?} on {} not in Jan..Dec", r.month, r.date);
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            debug!("monthly totals dropped {} rows with unknown month keys", dropped);
        }
        Table::new(Month::ALL.iter().map(|m| (*m, sums[m.index()])).collect())
    }

    /// Rows whose month key `monthly_totals` would drop.
    pub fn unknown_month_rows(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.month.parse::<Month>().is_err())
            .count()
    }

    /// Like [`Aggregator::monthly_totals`], but an unknown month key is an
    /// error instead of being dropped.
    pub fn monthly_totals_strict(&self) -> Result<MonthTable, RentalError> {
        if let Some(r) = self
            .records
            .iter()
            .find(|r| r.month.parse::<Month>().is_err())
        {
            return Err(RentalError::UnknownMonth {
                month: r.month.clone(),
                date: r.date,
            });
        }
        Ok(self.monthly_totals())
    }

    pub fn weekday_totals(&self) -> CategoryTable {
        self.by_category(|r| &r.weekday)
    }

    pub fn workingday_totals(&self) -> CategoryTable {
        self.by_category(|r| &r.workingday)
    }

    pub fn holiday_totals(&self) -> CategoryTable {
        self.by_category(|r| &r.holiday)
    }

    pub fn weathersit_totals(&self) -> CategoryTable {
        self.by_category(|r| &r.weathersit)
    }

    pub fn headline(&self) -> Headline {
        Headline {
            casual: self.casual_totals().total(),
            registered: self.registered_totals().total(),
            total: self.daily_totals().total(),
        }
    }

    pub fn summarize(&self) -> Summaries {
        self.build(self.monthly_totals())
    }

    pub fn summarize_strict(&self) -> Result<Summaries, RentalError> {
        Ok(self.build(self.monthly_totals_strict()?))
    }

    fn build(&self, monthly: MonthTable) -> Summaries {
        let daily = self.daily_totals();
        let casual = self.casual_totals();
        let registered = self.registered_totals();
        Summaries {
            headline: Headline {
                casual: casual.total(),
                registered: registered.total(),
                total: daily.total(),
            },
            daily,
            casual,
            registered,
            season: self.season_totals(),
            monthly,
            weekday: self.weekday_totals(),
            workingday: self.workingday_totals(),
            holiday: self.holiday_totals(),
            weathersit: self.weathersit_totals(),
        }
    }
}
