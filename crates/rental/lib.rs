pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod month;
pub mod record;
pub mod table;

pub use aggregate::{Aggregator, Headline, Summaries};
pub use dataset::{Dataset, DateRange};
pub use error::RentalError;
pub use month::Month;
pub use record::DailyRecord;
pub use table::{RiderSplit, Table};
