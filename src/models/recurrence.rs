use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Smallest repeat count the editing forms offer.
pub const MIN_COUNT: u32 = 1;
/// Largest repeat count the editing forms offer.
pub const MAX_COUNT: u32 = 30;

/// How often a task repeats.
///
/// The wire and storage form is the human-readable string the editing forms
/// round-trip through: `"None"` for one-shot tasks, or `"Every {count} {unit}"`
/// with a count drawn from the fixed 1–30 choice set.
///
/// Parsing malformed input (wrong token count, non-numeric or out-of-range
/// count, unknown unit) is a typed failure, never a silent mis-slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
    /// One-shot task, never repeats.
    #[default]
    None,
    /// Repeats every `count` `unit`s, e.g. every 3 weeks.
    Every { count: u8, unit: RecurrenceUnit },
}

impl Recurrence {
    /// Build a repeating cadence, validating the count against the 1–30 range.
    pub fn every(count: u32, unit: RecurrenceUnit) -> Result<Self, RecurrenceParseError> {
        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return Err(RecurrenceParseError::CountOutOfRange(count));
        }
        Ok(Self::Every {
            count: count as u8,
            unit,
        })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Every { count, unit } => write!(f, "Every {} {}", count, unit),
        }
    }
}

impl FromStr for Recurrence {
    type Err = RecurrenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "None" {
            return Ok(Self::None);
        }

        let mut tokens = s.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some("Every"), Some(count), Some(unit), None) => {
                let count: u32 = count
                    .parse()
                    .map_err(|_| RecurrenceParseError::BadCount(count.to_string()))?;
                let unit = RecurrenceUnit::from_str(unit)
                    .ok_or_else(|| RecurrenceParseError::UnknownUnit(unit.to_string()))?;
                Self::every(count, unit)
            }
            _ => Err(RecurrenceParseError::Malformed(s.to_string())),
        }
    }
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Failure to parse a recurrence string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceParseError {
    #[error("expected \"None\" or \"Every <count> <unit>\", got {0:?}")]
    Malformed(String),

    #[error("recurrence count must be a whole number, got {0:?}")]
    BadCount(String),

    #[error("recurrence count must be between {min} and {max}, got {0}", min = MIN_COUNT, max = MAX_COUNT)]
    CountOutOfRange(u32),

    #[error("unknown recurrence unit {0:?}")]
    UnknownUnit(String),
}

/// Time unit of a repeating cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl RecurrenceUnit {
    /// Every unit the daily-task form offers.
    pub const ALL: [Self; 5] = [
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Units the seasonal-board form offers; sub-day cadences make no sense there.
    pub const SEASONAL: [Self; 4] = [Self::Days, Self::Weeks, Self::Months, Self::Years];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hours => "Hours",
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
            Self::Years => "Years",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Hours" => Some(Self::Hours),
            "Days" => Some(Self::Days),
            "Weeks" => Some(Self::Weeks),
            "Months" => Some(Self::Months),
            "Years" => Some(Self::Years),
            _ => None,
        }
    }
}

impl fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_none_and_cadences() {
        assert_eq!(Recurrence::None.to_string(), "None");
        let every = Recurrence::every(3, RecurrenceUnit::Weeks).unwrap();
        assert_eq!(every.to_string(), "Every 3 Weeks");
    }

    #[test]
    fn round_trips_boundary_counts_for_every_unit() {
        for unit in RecurrenceUnit::ALL {
            for count in [MIN_COUNT, MAX_COUNT] {
                let encoded = Recurrence::every(count, unit).unwrap().to_string();
                let decoded: Recurrence = encoded.parse().unwrap();
                assert_eq!(
                    decoded,
                    Recurrence::Every {
                        count: count as u8,
                        unit
                    }
                );
            }
        }
        assert_eq!("None".parse::<Recurrence>().unwrap(), Recurrence::None);
    }

    #[test]
    fn rejects_missing_count() {
        // A missing count must not be mistaken for a unit.
        let err = "Every Weeks".parse::<Recurrence>().unwrap_err();
        assert_eq!(err, RecurrenceParseError::Malformed("Every Weeks".into()));
    }

    #[test]
    fn rejects_non_numeric_count() {
        let err = "Every two Weeks".parse::<Recurrence>().unwrap_err();
        assert_eq!(err, RecurrenceParseError::BadCount("two".into()));
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert_eq!(
            "Every 0 Days".parse::<Recurrence>().unwrap_err(),
            RecurrenceParseError::CountOutOfRange(0)
        );
        assert_eq!(
            "Every 31 Days".parse::<Recurrence>().unwrap_err(),
            RecurrenceParseError::CountOutOfRange(31)
        );
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = "Every 2 Fortnights".parse::<Recurrence>().unwrap_err();
        assert_eq!(err, RecurrenceParseError::UnknownUnit("Fortnights".into()));
    }

    #[test]
    fn serializes_as_the_wire_string() {
        let every = Recurrence::every(6, RecurrenceUnit::Months).unwrap();
        assert_eq!(serde_json::to_string(&every).unwrap(), "\"Every 6 Months\"");
        let parsed: Recurrence = serde_json::from_str("\"None\"").unwrap();
        assert_eq!(parsed, Recurrence::None);
    }
}
