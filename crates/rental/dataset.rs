use crate::aggregate::Aggregator;
use crate::error::RentalError;
use crate::record::DailyRecord;
use chrono::NaiveDate;
use log::{debug, info};
use std::fs::File;
use std::io;
use std::path::Path;

/// Inclusive `[start, end]` day range. `start > end` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of calendar days covered, 0 for an empty range.
    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

/// The daily dataset, loaded once and never modified.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DailyRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Dataset { records }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RentalError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RentalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            "dataset loaded: {:?}, {} rows, range {:?}",
            path,
            dataset.len(),
            dataset.full_range()
        );
        Ok(dataset)
    }

    /// Read a CSV with a header row. Columns not used by `DailyRecord` are
    /// ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RentalError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = vec![];
        for row in rdr.deserialize::<DailyRecord>() {
            records.push(row?);
        }
        debug!("csv rows read: {}", records.len());
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date present.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    pub fn full_range(&self) -> Option<DateRange> {
        self.date_bounds()
            .map(|(start, end)| DateRange::new(start, end))
    }

    /// Range from optional bounds, each falling back to the dataset edge.
    /// `None` only when a bound is missing and the dataset is empty.
    pub fn resolve_range(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Option<DateRange> {
        let bounds = self.date_bounds();
        let start = since.or(bounds.map(|b| b.0))?;
        let end = until.or(bounds.map(|b| b.1))?;
        Some(DateRange::new(start, end))
    }

    /// Aggregator over the records inside `range`, in file order.
    pub fn select(&self, range: &DateRange) -> Aggregator<'_> {
        let aggregator = Aggregator::new(self.records.iter().filter(|r| range.contains(&r.date)));
        debug!(
            "selected {} of {} rows for {} .. {}",
            aggregator.len(),
            self.len(),
            range.start,
            range.end
        );
        aggregator
    }

    /// Aggregator over every record.
    pub fn all(&self) -> Aggregator<'_> {
        Aggregator::new(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
instant,dateday,season,year,month,holiday,weekday,workingday,weathersit,temp,casual,registered,count
1,2011-01-01,Winter,2011,Jan,0,Sat,0,Misty,0.34,331,654,985
2,2011-01-02 00:00:00,Winter,2011,Jan,0,Sun,0,Misty,0.36,131,670,801
3,2011-02-01,Winter,2011,Feb,0,Tue,1,Clear,0.2,47,1360,1407
";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_reader_ignores_extra_columns() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(3, ds.len());
        let first = &ds.records()[0];
        assert_eq!(day(2011, 1, 1), first.date);
        assert_eq!(985, first.count);
        assert_eq!(331, first.casual);
        assert_eq!(654, first.registered);
        assert_eq!("Jan", first.month);
        assert_eq!("0", first.holiday);
        assert_eq!("Sat", first.weekday);
        assert_eq!(day(2011, 1, 2), ds.records()[1].date);
    }

    #[test]
    fn from_reader_missing_column() {
        let csv = "dateday,count,casual,registered\n2011-01-01,1,0,1\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RentalError::Csv(_)));
    }

    #[test]
    fn from_reader_bad_count() {
        let csv = CSV.replace("985", "lots");
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn from_reader_bad_date() {
        let csv = CSV.replace("2011-02-01", "1 Feb 2011");
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn load_missing_file() {
        let err = Dataset::load("./no/such/days.csv").unwrap_err();
        assert!(matches!(err, RentalError::Io { .. }));
    }

    #[test]
    fn bounds_and_ranges() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(Some((day(2011, 1, 1), day(2011, 2, 1))), ds.date_bounds());
        assert_eq!(
            Some(DateRange::new(day(2011, 1, 2), day(2011, 2, 1))),
            ds.resolve_range(Some(day(2011, 1, 2)), None)
        );
        assert_eq!(None, Dataset::default().date_bounds());
        assert_eq!(None, Dataset::default().resolve_range(Some(day(2011, 1, 1)), None));
        assert!(Dataset::default()
            .resolve_range(Some(day(2011, 1, 1)), Some(day(2011, 1, 2)))
            .is_some());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = DateRange::new(day(2011, 1, 1), day(2011, 1, 3));
        assert!(range.contains(&day(2011, 1, 1)));
        assert!(range.contains(&day(2011, 1, 3)));
        assert!(!range.contains(&day(2011, 1, 4)));
        assert_eq!(3, range.days());

        let backwards = DateRange::new(day(2011, 1, 3), day(2011, 1, 1));
        assert!(backwards.is_empty());
        assert!(!backwards.contains(&day(2011, 1, 2)));
        assert_eq!(0, backwards.days());
    }

    #[test]
    fn select_filters_by_range() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let range = DateRange::new(day(2011, 1, 1), day(2011, 1, 2));
        assert_eq!(2, ds.select(&range).len());
        assert_eq!(3, ds.all().len());
        let backwards = DateRange::new(day(2011, 2, 1), day(2011, 1, 1));
        assert!(ds.select(&backwards).is_empty());
    }
}
