use polars::prelude::*;
use rental::aggregate::{CategoryTable, DailyTable, MonthTable, SeasonTable};
use rental::Summaries;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn daily_frame(table: &DailyTable, value: &str) -> PolarsResult<DataFrame> {
    let dates: Vec<String> = table
        .keys()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();
    let values: Vec<u64> = table.values().copied().collect();
    DataFrame::new(vec![
        Series::new("dateday", dates),
        Series::new(value, values),
    ])
}

fn category_frame(table: &CategoryTable, key: &str) -> PolarsResult<DataFrame> {
    let keys: Vec<String> = table.keys().cloned().collect();
    let values: Vec<u64> = table.values().copied().collect();
    DataFrame::new(vec![Series::new(key, keys), Series::new("count", values)])
}

fn season_frame(table: &SeasonTable) -> PolarsResult<DataFrame> {
    let keys: Vec<String> = table.keys().cloned().collect();
    let casual: Vec<u64> = table.values().map(|s| s.casual).collect();
    let registered: Vec<u64> = table.values().map(|s| s.registered).collect();
    DataFrame::new(vec![
        Series::new("season", keys),
        Series::new("casual", casual),
        Series::new("registered", registered),
    ])
}

fn monthly_frame(table: &MonthTable) -> PolarsResult<DataFrame> {
    let keys: Vec<&str> = table.keys().map(|m| m.as_str()).collect();
    let values: Vec<u64> = table.values().copied().collect();
    DataFrame::new(vec![Series::new("month", keys), Series::new("count", values)])
}

fn headline_frame(summaries: &Summaries) -> PolarsResult<DataFrame> {
    let h = summaries.headline;
    DataFrame::new(vec![
        Series::new("casual", [h.casual]),
        Series::new("registered", [h.registered]),
        Series::new("total", [h.total]),
    ])
}

/// Every summary as a named frame, in display order.
pub fn summary_frames(summaries: &Summaries) -> PolarsResult<Vec<(&'static str, DataFrame)>> {
    Ok(vec![
        ("headline", headline_frame(summaries)?),
        ("daily", daily_frame(&summaries.daily, "count")?),
        ("casual", daily_frame(&summaries.casual, "casual")?),
        ("registered", daily_frame(&summaries.registered, "registered")?),
        ("season", season_frame(&summaries.season)?),
        ("monthly", monthly_frame(&summaries.monthly)?),
        ("weekday", category_frame(&summaries.weekday, "weekday")?),
        ("workingday", category_frame(&summaries.workingday, "workingday")?),
        ("holiday", category_frame(&summaries.holiday, "holiday")?),
        ("weathersit", category_frame(&summaries.weathersit, "weathersit")?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental::Dataset;

    const CSV: &str = "\
dateday,season,month,holiday,weekday,workingday,weathersit,casual,registered,count
2023-01-01,Winter,Jan,0,Sun,0,Clear,4,6,10
2023-01-02,Winter,Jan,0,Mon,1,Misty,1,4,5
2023-02-01,Winter,Feb,0,Wed,1,Clear,2,5,7
";

    fn frames() -> Vec<(&'static str, DataFrame)> {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        summary_frames(&ds.all().summarize()).unwrap()
    }

    fn frame<'a>(frames: &'a [(&'static str, DataFrame)], name: &str) -> &'a DataFrame {
        &frames.iter().find(|(n, _)| *n == name).unwrap().1
    }

    #[test]
    fn ten_named_frames() {
        let frames = frames();
        let names: Vec<&str> = frames.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            vec![
                "headline",
                "daily",
                "casual",
                "registered",
                "season",
                "monthly",
                "weekday",
                "workingday",
                "holiday",
                "weathersit"
            ],
            names
        );
    }

    #[test]
    fn monthly_frame_has_twelve_rows() {
        let frames = frames();
        let monthly = frame(&frames, "monthly");
        assert_eq!(12, monthly.height());
        assert_eq!(2, monthly.width());
        let counts = monthly.column("count").unwrap().u64().unwrap();
        assert_eq!(Some(15), counts.get(0));
        assert_eq!(Some(7), counts.get(1));
        assert_eq!(Some(0), counts.get(11));
        let months = monthly.column("month").unwrap().str().unwrap();
        assert_eq!(Some("Jan"), months.get(0));
        assert_eq!(Some("Dec"), months.get(11));
    }

    #[test]
    fn daily_and_season_frames() {
        let frames = frames();
        let daily = frame(&frames, "daily");
        assert_eq!(3, daily.height());
        let dates = daily.column("dateday").unwrap().str().unwrap();
        assert_eq!(Some("2023-02-01"), dates.get(2));

        let season = frame(&frames, "season");
        assert_eq!(1, season.height());
        assert_eq!(3, season.width());
        assert_eq!(Some(7), season.column("casual").unwrap().u64().unwrap().get(0));
        assert_eq!(
            Some(15),
            season.column("registered").unwrap().u64().unwrap().get(0)
        );

        let headline = frame(&frames, "headline");
        assert_eq!(Some(22), headline.column("total").unwrap().u64().unwrap().get(0));
    }

    #[test]
    fn empty_summaries_keep_monthly() {
        let frames = summary_frames(&Dataset::default().all().summarize()).unwrap();
        assert_eq!(0, frame(&frames, "daily").height());
        assert_eq!(0, frame(&frames, "weathersit").height());
        assert_eq!(12, frame(&frames, "monthly").height());
    }
}
