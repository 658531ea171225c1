use std::{fmt, str::FromStr};

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Named reporting bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Period::Day => "DAILY",
            Period::Week => "WEEKLY",
            Period::Month => "MONTHLY",
        }
    }

    /// Top-N rankings are only offered for weekly and monthly buckets.
    pub fn allows_ranking(self) -> bool {
        matches!(self, Period::Week | Period::Month)
    }

    /// Length of the trailing window used when period filtering is enabled.
    pub fn window(self) -> Duration {
        match self {
            Period::Day => Duration::days(1),
            Period::Week => Duration::days(7),
            Period::Month => Duration::days(30),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown report type `{}`", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

/// How a period narrows the transactions a report looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilter {
    /// Every transaction is reported regardless of period; the period only labels the report.
    #[default]
    Unfiltered,
    /// Only transactions stamped within the trailing [`Period::window`] of now.
    Trailing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_periods() {
        assert_eq!("day".parse::<Period>(), Ok(Period::Day));
        assert_eq!(" week ".parse::<Period>(), Ok(Period::Week));
        assert_eq!("month".parse::<Period>(), Ok(Period::Month));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_periods() {
        assert_eq!(
            "year".parse::<Period>(),
            Err(UnknownPeriod("year".to_string()))
        );
        assert!("Week".parse::<Period>().is_err());
    }

    #[test]
    fn only_week_and_month_rank() {
        let ranked: Vec<Period> = Period::ALL
            .into_iter()
            .filter(|period| period.allows_ranking())
            .collect();
        assert_eq!(ranked, vec![Period::Week, Period::Month]);
    }
}
