use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digits at or above this value are BIG.
pub const BIG_THRESHOLD: u8 = 5;
/// Largest digit a draw can produce.
pub const MAX_DIGIT: u8 = 9;

/// Binary classification of a drawn digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Big,
    Small,
}

impl Outcome {
    /// Classify a digit (0-9).
    pub fn from_number(number: u8) -> Self {
        if number >= BIG_THRESHOLD {
            Outcome::Big
        } else {
            Outcome::Small
        }
    }

    /// The other outcome.
    pub fn opposite(self) -> Self {
        match self {
            Outcome::Big => Outcome::Small,
            Outcome::Small => Outcome::Big,
        }
    }

    /// Display label, matching the wire format.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Big => "BIG",
            Outcome::Small => "SMALL",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Draw issue number.
///
/// Upstream issue numbers are long digit strings (e.g. `20240101100010123`) that
/// exceed the safe integer range of JSON numbers, so they travel as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueId(pub u64);

impl IssueId {
    /// The issue drawn after this one.
    pub fn next(self) -> Self {
        IssueId(self.0.saturating_add(1))
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(IssueId)
    }
}

impl Serialize for IssueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IssueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDraw {
    #[error("draw {issue} has number {number}, expected 0-9")]
    OutOfRange { issue: IssueId, number: u8 },

    #[error("draw {issue} has number {number} but result {result}")]
    ResultMismatch {
        issue: IssueId,
        number: u8,
        result: Outcome,
    },
}

/// A single published draw.
///
/// `number` is always 0-9 and `result` always agrees with it; deserializing a
/// record that breaks either rule fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDrawRecord")]
pub struct DrawRecord {
    pub issue: IssueId,
    pub number: u8,
    pub result: Outcome,
    /// Unix timestamp (milliseconds) of the draw.
    pub timestamp: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrawRecord {
    issue: IssueId,
    number: u8,
    result: Outcome,
    timestamp: i64,
}

impl DrawRecord {
    /// Build a record, deriving the result from the number.
    ///
    /// `number` must be a digit; use [`DrawRecord::try_new`] for unchecked input.
    pub fn new(issue: IssueId, number: u8, timestamp: i64) -> Self {
        debug_assert!(number <= MAX_DIGIT, "draw number {} out of range", number);
        Self {
            issue,
            number,
            result: Outcome::from_number(number),
            timestamp,
        }
    }

    pub fn try_new(issue: IssueId, number: u8, timestamp: i64) -> Result<Self, InvalidDraw> {
        if number > MAX_DIGIT {
            return Err(InvalidDraw::OutOfRange { issue, number });
        }
        Ok(Self::new(issue, number, timestamp))
    }
}

impl TryFrom<RawDrawRecord> for DrawRecord {
    type Error = InvalidDraw;

    fn try_from(raw: RawDrawRecord) -> Result<Self, Self::Error> {
        let record = Self::try_new(raw.issue, raw.number, raw.timestamp)?;
        if record.result != raw.result {
            return Err(InvalidDraw::ResultMismatch {
                issue: raw.issue,
                number: raw.number,
                result: raw.result,
            });
        }
        Ok(record)
    }
}

/// Draw history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    records: Vec<DrawRecord>,
}

impl HistorySeries {
    /// Wrap records that are already ordered oldest-first.
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent draw.
    pub fn latest(&self) -> Option<&DrawRecord> {
        self.records.last()
    }

    /// Drawn digits, oldest first.
    pub fn numbers(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.number).collect()
    }

    /// BIG/SMALL results, oldest first.
    pub fn results(&self) -> Vec<Outcome> {
        self.records.iter().map(|r| r.result).collect()
    }
}

impl From<Vec<DrawRecord>> for HistorySeries {
    fn from(records: Vec<DrawRecord>) -> Self {
        Self::new(records)
    }
}
