use crate::frames::summary_frames;
use log::info;
use polars::prelude::*;
use rental::{Dataset, DateRange, Summaries};
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;

pub enum OutputType {
    CSV,
    TABLE,
    POLAR,
    JSON,
}

impl OutputType {
    pub const NAMES: [&'static str; 4] = ["table", "polar", "csv", "json"];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(OutputType::CSV),
            "table" => Some(OutputType::TABLE),
            "polar" => Some(OutputType::POLAR),
            "json" => Some(OutputType::JSON),
            _ => None,
        }
    }
}

pub trait Output {
    fn output(&self) -> Result<(), Box<dyn Error>>;
}

/// Prints each summary table as a polars frame.
pub struct PolarOutput {
    summaries: Summaries,
}

impl PolarOutput {
    pub fn new(summaries: Summaries) -> Self {
        PolarOutput { summaries }
    }
}

impl Output for PolarOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        for (name, df) in summary_frames(&self.summaries)? {
            println!("{}\n{}", name, df);
        }
        Ok(())
    }
}

/// Writes `<dir>/<table>.csv` for each summary table.
pub struct CsvOutput {
    dir: PathBuf,
    summaries: Summaries,
}

impl CsvOutput {
    pub fn new(dir: PathBuf, summaries: Summaries) -> Self {
        CsvOutput { dir, summaries }
    }
}

impl Output for CsvOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.dir)?;
        for (name, mut df) in summary_frames(&self.summaries)? {
            let path = self.dir.join(format!("{}.csv", name));
            let mut file = File::create(&path)?;
            CsvWriter::new(&mut file).finish(&mut df)?;
            info!("CSV file written successfully: {:?}", path);
        }
        Ok(())
    }
}

pub struct JsonOutput {
    summaries: Summaries,
}

impl JsonOutput {
    pub fn new(summaries: Summaries) -> Self {
        JsonOutput { summaries }
    }
}

impl Output for JsonOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        println!("{}", serde_json::to_string_pretty(&self.summaries)?);
        Ok(())
    }
}

/// Interactive terminal dashboard; recomputes on every range change.
pub struct TableOutput<'a> {
    dataset: &'a Dataset,
    title: String,
    range: DateRange,
}

impl<'a> TableOutput<'a> {
    pub fn new(dataset: &'a Dataset, title: String, range: DateRange) -> Self {
        TableOutput {
            dataset,
            title,
            range,
        }
    }
}

impl Output for TableOutput<'_> {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        ui::tui::run(self.dataset, &self.title, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
dateday,season,month,holiday,weekday,workingday,weathersit,casual,registered,count
2023-01-01,Winter,Jan,0,Sun,0,Clear,4,6,10
2023-02-01,Winter,Feb,0,Wed,1,Clear,2,5,7
";

    fn summaries() -> Summaries {
        Dataset::from_reader(CSV.as_bytes())
            .unwrap()
            .all()
            .summarize()
    }

    #[test]
    fn output_type_from_str() {
        for name in OutputType::NAMES {
            assert!(OutputType::from_str(name).is_some());
        }
        assert!(OutputType::from_str("html").is_none());
    }

    #[test]
    fn csv_output_writes_one_file_per_table() {
        let dir = std::env::temp_dir().join(format!("bike-dash-report-{}", std::process::id()));
        CsvOutput::new(dir.clone(), summaries()).output().unwrap();

        let monthly = fs::read_to_string(dir.join("monthly.csv")).unwrap();
        let lines: Vec<&str> = monthly.lines().collect();
        assert_eq!("month,count", lines[0]);
        assert_eq!("Jan,10", lines[1]);
        assert_eq!("Feb,7", lines[2]);
        assert_eq!(13, lines.len());
        assert!(dir.join("weathersit.csv").exists());
        assert!(dir.join("headline.csv").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn json_shape() {
        let value = serde_json::to_value(summaries()).unwrap();
        assert_eq!(17, value["headline"]["total"]);
        assert_eq!(12, value["monthly"].as_array().unwrap().len());
        assert_eq!("Jan", value["monthly"][0]["key"]);
        assert_eq!("2023-01-01", value["daily"][0]["key"]);
        assert_eq!(11, value["season"][0]["value"]["registered"]);
    }
}
