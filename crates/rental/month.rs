use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar month keyed by its three-letter abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Display order of the monthly table.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Zero based position in `Month::ALL`.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Month {
    type Err = ();

    /// Exact match only: "jan", "January" or " Jan" are not months.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_abbreviations() {
        assert_eq!("Jan".parse::<Month>(), Ok(Month::Jan));
        assert_eq!("Dec".parse::<Month>(), Ok(Month::Dec));
        assert!("jan".parse::<Month>().is_err());
        assert!("January".parse::<Month>().is_err());
        assert!(" Feb".parse::<Month>().is_err());
        assert!("1".parse::<Month>().is_err());
    }

    #[test]
    fn all_is_calendar_order() {
        for (i, m) in Month::ALL.iter().enumerate() {
            assert_eq!(i, m.index());
        }
        assert_eq!("Sep", Month::ALL[8].to_string());
    }
}
