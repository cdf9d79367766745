use super::draw::{DrawRecord, IssueId, Outcome};
use serde::{Deserialize, Serialize};

/// A single model's output. `None` means the model abstained.
pub type Vote = Option<Outcome>;

/// BIG/SMALL tallies, used for vote breakdowns and draw distributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    #[serde(rename = "BIG")]
    pub big: usize,
    #[serde(rename = "SMALL")]
    pub small: usize,
}

/// Majority decision over one run of the model bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleResult {
    pub prediction: Outcome,
    /// Share of the winning side, 0-100.
    pub confidence: u8,
    /// Non-abstaining votes.
    pub total_votes: usize,
    pub breakdown: OutcomeCounts,
}

/// Walk-forward hit rate of the ensemble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Percentage of correct predictions, 0-100.
    pub rate: u8,
    pub tested: usize,
    pub correct: usize,
}

/// Prediction for the next issue. This is also the value remembered between
/// sessions for win/loss tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPrediction {
    pub prediction: Outcome,
    pub confidence: u8,
    pub total_votes: usize,
    pub breakdown: OutcomeCounts,
    pub for_issue: IssueId,
    /// Unix timestamp (milliseconds) when the prediction was made.
    pub timestamp: i64,
}

pub type CachedPrediction = NextPrediction;

impl NextPrediction {
    pub fn from_ensemble(result: EnsembleResult, for_issue: IssueId, timestamp: i64) -> Self {
        Self {
            prediction: result.prediction,
            confidence: result.confidence,
            total_votes: result.total_votes,
            breakdown: result.breakdown,
            for_issue,
            timestamp,
        }
    }
}

/// Whether the previous prediction matched the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Win,
    Loss,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Win => "WIN",
            Verdict::Loss => "LOSS",
        }
    }
}

/// Comparison of the cached prediction against the latest draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLoss {
    pub status: Verdict,
    pub predicted: Outcome,
    pub actual: Outcome,
    /// Issue the actual result belongs to.
    pub issue: IssueId,
    /// Confidence the prediction was made with.
    pub confidence: u8,
}

impl WinLoss {
    pub fn evaluate(previous: &NextPrediction, latest: &DrawRecord) -> Self {
        let status = if previous.prediction == latest.result {
            Verdict::Win
        } else {
            Verdict::Loss
        };

        Self {
            status,
            predicted: previous.prediction,
            actual: latest.result,
            issue: latest.issue,
            confidence: previous.confidence,
        }
    }
}

/// The most recent draw, as surfaced to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestDraw {
    pub issue: IssueId,
    pub number: u8,
    pub result: Outcome,
}

impl From<&DrawRecord> for LatestDraw {
    fn from(record: &DrawRecord) -> Self {
        Self {
            issue: record.issue,
            number: record.number,
            result: record.result,
        }
    }
}

/// Everything one prediction session produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub win_loss: Option<WinLoss>,
    pub next: NextPrediction,
    pub accuracy: AccuracyReport,
    pub latest: LatestDraw,
    pub data_points: usize,
    pub timestamp: i64,
}

/// Summary of recent draws, computed without running any model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawStats {
    pub total_records: usize,
    pub latest_issue: IssueId,
    pub last10_results: Vec<Outcome>,
    pub distribution: OutcomeCounts,
    pub recent_numbers: Vec<u8>,
    pub timestamp: i64,
}
