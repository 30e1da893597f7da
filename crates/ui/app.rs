use crate::data::{generate_data_vec, Data};
use chrono::{Duration, NaiveDate};
use log::debug;
use rental::{Dataset, DateRange, Summaries};

/// Which end of the date range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Dashboard state. Every range change re-runs the aggregation.
pub struct App<'a> {
    dataset: &'a Dataset,
    pub title: String,
    bounds: Option<(NaiveDate, NaiveDate)>,
    initial: DateRange,
    pub range: DateRange,
    pub focus: Bound,
    pub summaries: Summaries,
    pub items: Vec<Data>,
    pub selected_rows: usize,
}

impl<'a> App<'a> {
    pub fn new(dataset: &'a Dataset, title: impl Into<String>, range: DateRange) -> Self {
        let bounds = dataset.date_bounds();
        let range = clamp_range(range, bounds);
        let aggregator = dataset.select(&range);
        let summaries = aggregator.summarize();
        App {
            dataset,
            title: title.into(),
            bounds,
            initial: range,
            range,
            focus: Bound::Start,
            items: generate_data_vec(&summaries),
            selected_rows: aggregator.len(),
            summaries,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Bound::Start => Bound::End,
            Bound::End => Bound::Start,
        };
    }

    /// Move the focused bound by `days`, staying inside the dataset.
    pub fn shift(&mut self, days: i64) {
        let current = match self.focus {
            Bound::Start => self.range.start,
            Bound::End => self.range.end,
        };
        let moved = current
            .checked_add_signed(Duration::days(days))
            .map(|d| clamp_day(d, self.bounds))
            .unwrap_or(current);
        if moved == current {
            return;
        }
        match self.focus {
            Bound::Start => self.range.start = moved,
            Bound::End => self.range.end = moved,
        }
        self.refresh();
    }

    pub fn reset(&mut self) {
        if self.range != self.initial {
            self.range = self.initial;
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        let aggregator = self.dataset.select(&self.range);
        self.selected_rows = aggregator.len();
        self.summaries = aggregator.summarize();
        self.items = generate_data_vec(&self.summaries);
        debug!(
            "range {} .. {}: {} rows, total {}",
            self.range.start, self.range.end, self.selected_rows, self.summaries.headline.total
        );
    }
}

fn clamp_day(day: NaiveDate, bounds: Option<(NaiveDate, NaiveDate)>) -> NaiveDate {
    match bounds {
        Some((min, max)) => day.clamp(min, max),
        None => day,
    }
}

/// Trim a range that overlaps the data to the data's edges. A range that
/// misses the data entirely is kept as is so it still selects nothing.
fn clamp_range(range: DateRange, bounds: Option<(NaiveDate, NaiveDate)>) -> DateRange {
    match bounds {
        Some((min, max)) if !range.is_empty() && range.start <= max && range.end >= min => {
            DateRange::new(clamp_day(range.start, bounds), clamp_day(range.end, bounds))
        }
        _ => range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
dateday,season,month,holiday,weekday,workingday,weathersit,casual,registered,count
2011-01-01,Winter,Jan,0,Sat,0,Misty,30,70,100
2011-01-02,Winter,Jan,0,Sun,0,Clear,10,40,50
2011-02-01,Winter,Feb,0,Tue,1,Clear,5,20,25
";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn new_uses_full_range() {
        let ds = dataset();
        let app = App::new(&ds, "test", ds.full_range().unwrap());
        assert_eq!(175, app.summaries.headline.total);
        assert_eq!(3, app.selected_rows);
        assert_eq!(Bound::Start, app.focus);
    }

    #[test]
    fn new_clamps_to_dataset() {
        let ds = dataset();
        let app = App::new(&ds, "test", DateRange::new(day(2010, 1, 1), day(2020, 1, 1)));
        assert_eq!(ds.full_range().unwrap(), app.range);
    }

    #[test]
    fn new_keeps_range_outside_dataset() {
        let ds = dataset();
        let outside = DateRange::new(day(2013, 1, 1), day(2013, 12, 31));
        let app = App::new(&ds, "test", outside);
        assert_eq!(outside, app.range);
        assert_eq!(0, app.selected_rows);
        assert_eq!(0, app.summaries.headline.total);
        assert!(app.items.is_empty());
        assert_eq!(ds.select(&outside).summarize(), app.summaries);

        let before = DateRange::new(day(2009, 1, 1), day(2010, 12, 31));
        let app = App::new(&ds, "test", before);
        assert_eq!(0, app.selected_rows);
        assert_eq!(0, app.summaries.monthly.total());
    }

    #[test]
    fn shift_recomputes_summaries() {
        let ds = dataset();
        let mut app = App::new(&ds, "test", ds.full_range().unwrap());

        app.shift(1);
        assert_eq!(day(2011, 1, 2), app.range.start);
        assert_eq!(75, app.summaries.headline.total);

        app.toggle_focus();
        app.shift(-30);
        assert_eq!(day(2011, 1, 2), app.range.end);
        assert_eq!(50, app.summaries.headline.total);
        assert_eq!(Some(&0), app.summaries.monthly.get(&rental::Month::Feb));

        app.reset();
        assert_eq!(175, app.summaries.headline.total);
    }

    #[test]
    fn shift_stops_at_bounds() {
        let ds = dataset();
        let mut app = App::new(&ds, "test", ds.full_range().unwrap());
        app.shift(-5);
        assert_eq!(day(2011, 1, 1), app.range.start);
        app.toggle_focus();
        app.shift(365);
        assert_eq!(day(2011, 2, 1), app.range.end);
    }

    #[test]
    fn crossing_bounds_empties_tables() {
        let ds = dataset();
        let mut app = App::new(&ds, "test", ds.full_range().unwrap());
        app.shift(60);
        assert_eq!(day(2011, 2, 1), app.range.start);
        app.toggle_focus();
        app.shift(-31);
        assert!(app.range.is_empty());
        assert_eq!(0, app.selected_rows);
        assert!(app.items.is_empty());
        assert_eq!(12, app.summaries.monthly.len());
    }
}
