//! Walk-forward backtest of the ensemble.
//!
//! Replays the model bank over the trailing part of the history. At each
//! tested index the ensemble only sees the draws strictly before it, exactly
//! as it would have when predicting live, and its prediction is compared with
//! the draw that followed.

use crate::services::signals::{aggregate, ModelBank};
use crate::types::{AccuracyReport, Outcome};
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Backtest window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktestConfig {
    /// Maximum number of trailing points to replay.
    pub cap: usize,
    /// Leading draws never tested, so every replay has some history.
    pub reserve: usize,
    /// Below this many draws no backtest is run.
    pub min_history: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            cap: 50,
            reserve: 10,
            min_history: 20,
        }
    }
}

/// Evaluates a model bank against its own history.
#[derive(Debug, Clone, Default)]
pub struct Backtester {
    config: BacktestConfig,
}

impl Backtester {
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Indices that will be tested for a history of `len` draws.
    ///
    /// The window holds `min(cap, len - reserve)` points and ends one short
    /// of the last draw.
    pub fn test_range(&self, len: usize) -> std::ops::Range<usize> {
        if len < self.config.min_history {
            return 0..0;
        }

        let test_size = self.config.cap.min(len.saturating_sub(self.config.reserve));
        let start = len - test_size;
        let end = len.saturating_sub(1).max(start);
        start..end
    }

    /// Hit rate of `bank` over the trailing window.
    ///
    /// Iterations are independent and run on the rayon pool; the report is
    /// the same as a sequential replay.
    pub fn run(&self, bank: &ModelBank, numbers: &[u8], results: &[Outcome]) -> AccuracyReport {
        debug_assert_eq!(numbers.len(), results.len());

        let started = Instant::now();
        let range = self.test_range(numbers.len().min(results.len()));
        let tested = range.len();

        if tested == 0 {
            return AccuracyReport::default();
        }

        let correct = range
            .into_par_iter()
            .filter(|&i| {
                let votes = bank.votes(&numbers[..i], &results[..i]);
                aggregate(&votes).prediction == results[i]
            })
            .count();

        let rate = (correct as f64 / tested as f64 * 100.0).round() as u8;

        debug!(
            "Backtest: {}/{} correct ({}%) over {} models in {:?}",
            correct,
            tested,
            rate,
            bank.len(),
            started.elapsed()
        );

        AccuracyReport {
            rate,
            tested,
            correct,
        }
    }
}
