mod frames;
mod output;

use config::Config;
use output::{CsvOutput, JsonOutput, Output, OutputType, PolarOutput, TableOutput};
use rental::record::parse_day;
use rental::{Dataset, DateRange};

use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::path::PathBuf;

use log::{debug, error, info, warn};

/// Bicycle rental dashboard over a daily rentals csv
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short = 'c',
        long = "config",
        default_value = config::DEFAULT_FILENAME,
        help = "config file"
    )]
    config: PathBuf,

    #[arg(
        short = 's',
        long = "source",
        help = "daily rentals csv, overrides `source` in config"
    )]
    source: Option<PathBuf>,

    #[arg(
        short = 'F',
        long = "format",
        value_parser = PossibleValuesParser::new(OutputType::NAMES),
        help = "output format, overrides `output` in config"
    )]
    format: Option<String>,

    #[arg(
        long = "report-dir",
        help = "directory for csv output, e.g. --report-dir report"
    )]
    report_dir: Option<PathBuf>,

    /// since date
    #[arg(long = "since", value_parser = parse_date, help = "since date, 2011-01-01")]
    since: Option<NaiveDate>,

    /// until date
    #[arg(long = "until", value_parser = parse_date, help = "until date, 2012-12-31")]
    until: Option<NaiveDate>,

    #[arg(long = "strict-months", action = clap::ArgAction::SetTrue, help = "fail on month keys other than Jan..Dec")]
    strict_months: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<std::io::Error>> {
    match parse_day(s) {
        Some(d) => Ok(d),
        None => {
            error!("parse date err: {:?}", s);
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Invalid date format, expected YYYY-MM-DD",
            )))
        }
    }
}

/// Command line flags take precedence over the config file.
fn merge(args: &Args, mut conf: Config) -> Config {
    if let Some(source) = &args.source {
        conf.source = source.clone();
    }
    if let Some(format) = &args.format {
        conf.output = format.clone();
    }
    if let Some(dir) = &args.report_dir {
        conf.report_dir = dir.clone();
    }
    conf.strict_months |= args.strict_months;
    conf
}

fn get_output<'a>(
    output_type: OutputType,
    conf: Config,
    dataset: &'a Dataset,
    range: DateRange,
) -> Box<dyn Output + 'a> {
    match output_type {
        OutputType::TABLE => Box::new(TableOutput::new(dataset, conf.title, range)),
        OutputType::CSV => Box::new(CsvOutput::new(
            conf.report_dir,
            dataset.select(&range).summarize(),
        )),
        OutputType::POLAR => Box::new(PolarOutput::new(dataset.select(&range).summarize())),
        OutputType::JSON => Box::new(JsonOutput::new(dataset.select(&range).summarize())),
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let conf = merge(&args, Config::new(&args.config)?);
    debug!("config: {:?}", conf);

    let out_type = OutputType::from_str(conf.output.as_str())
        .ok_or_else(|| format!("output not match: {:?}", conf.output))?;

    let dataset = Dataset::load(&conf.source)?;
    if conf.strict_months {
        dataset.all().monthly_totals_strict()?;
    } else {
        let unknown = dataset.all().unknown_month_rows();
        if unknown > 0 {
            warn!(
                "{} rows have month keys outside Jan..Dec, monthly totals will skip them",
                unknown
            );
        }
    }

    let range = dataset
        .resolve_range(args.since, args.until)
        .ok_or("dataset is empty, pass both --since and --until")?;
    info!("range: {} .. {}", range.start, range.end);
    if range.is_empty() {
        info!("since is after until, every table will be empty");
    }

    // the boxed output borrows `dataset`; drop it before `dataset` goes
    #[allow(clippy::let_and_return)]
    let res = get_output(out_type, conf, &dataset, range).output();
    res
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
