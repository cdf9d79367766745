//! One prediction round: fetch, score the previous call, predict, backtest.

use crate::error::SessionError;
use crate::services::backtester::{BacktestConfig, Backtester};
use crate::services::cache::Cache;
use crate::services::signals::{aggregate, ModelBank};
use crate::sources::DrawSource;
use crate::types::{
    CachedPrediction, DrawStats, HistorySeries, LatestDraw, NextPrediction, Outcome,
    OutcomeCounts, SessionResult, WinLoss,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cache key of the prediction awaiting its draw.
pub const LAST_PREDICTION_KEY: &str = "lastPrediction";

/// Draws included in the stats summary.
const STATS_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fewest draws a session will predict from.
    pub min_records: usize,
    /// How long a prediction stays available for win/loss scoring.
    pub prediction_ttl: Duration,
    pub backtest: BacktestConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_records: 10,
            prediction_ttl: Duration::from_millis(120_000),
            backtest: BacktestConfig::default(),
        }
    }
}

/// Orchestrates prediction rounds over a draw source.
///
/// The cached prediction is read once and written once per round with no
/// lock in between. Two overlapping rounds may both score the same cached
/// prediction, and whichever finishes last decides what the next round
/// scores.
#[derive(Clone)]
pub struct PredictionSession {
    source: Arc<dyn DrawSource>,
    cache: Arc<Cache<CachedPrediction>>,
    bank: Arc<ModelBank>,
    backtester: Backtester,
    config: SessionConfig,
}

impl PredictionSession {
    pub fn new(
        source: Arc<dyn DrawSource>,
        cache: Arc<Cache<CachedPrediction>>,
        config: SessionConfig,
    ) -> Self {
        Self {
            source,
            cache,
            bank: Arc::new(ModelBank::standard()),
            backtester: Backtester::new(config.backtest),
            config,
        }
    }

    /// Replace the model bank used for both prediction and backtest.
    pub fn with_bank(mut self, bank: ModelBank) -> Self {
        self.bank = Arc::new(bank);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &ModelBank {
        &self.bank
    }

    pub fn cache(&self) -> &Arc<Cache<CachedPrediction>> {
        &self.cache
    }

    /// Run one full prediction round.
    ///
    /// The model work runs on the blocking pool. The new prediction is cached
    /// before the backtest, which cannot fail, so a returned error never
    /// leaves a fresh prediction behind.
    pub async fn run(&self) -> Result<SessionResult, SessionError> {
        let started = Instant::now();
        let history = self.source.fetch().await?;
        let fetched_in = started.elapsed();

        let session = self.clone();
        let result = tokio::task::spawn_blocking(move || session.evaluate(&history))
            .await
            .map_err(|e| SessionError::Internal(format!("prediction task failed: {}", e)))??;

        info!(
            "Predicted {} ({}%) for issue {}{}",
            result.next.prediction,
            result.next.confidence,
            result.next.for_issue,
            result
                .win_loss
                .as_ref()
                .map(|wl| format!(", previous call {}", wl.status.label()))
                .unwrap_or_default()
        );
        debug!(
            "Session over {} draws from {}: fetch {:?}, total {:?}",
            result.data_points,
            self.source.name(),
            fetched_in,
            started.elapsed()
        );

        Ok(result)
    }

    /// Prediction round over an already fetched history.
    ///
    /// CPU bound. The backtest fans out over the rayon pool.
    pub fn evaluate(&self, history: &HistorySeries) -> Result<SessionResult, SessionError> {
        let available = history.len();
        let latest = match history.latest() {
            Some(latest) if available >= self.config.min_records => latest,
            _ => {
                return Err(SessionError::InsufficientData {
                    required: self.config.min_records,
                    available,
                })
            }
        };

        let numbers = history.numbers();
        let results = history.results();

        let win_loss = self
            .cache
            .get(LAST_PREDICTION_KEY)
            .map(|previous| WinLoss::evaluate(&previous, latest));

        let now = chrono::Utc::now().timestamp_millis();
        let ensemble = aggregate(&self.bank.votes(&numbers, &results));
        let next = NextPrediction::from_ensemble(ensemble, latest.issue.next(), now);

        self.cache.set_with_ttl(
            LAST_PREDICTION_KEY,
            next.clone(),
            self.config.prediction_ttl,
        );

        let accuracy = self.backtester.run(&self.bank, &numbers, &results);

        Ok(SessionResult {
            win_loss,
            next,
            accuracy,
            latest: LatestDraw::from(latest),
            data_points: available,
            timestamp: now,
        })
    }

    /// Summary of the recent draws. Runs no models.
    pub async fn stats(&self) -> Result<DrawStats, SessionError> {
        let history = self.source.fetch().await?;
        Self::summarize(&history)
    }

    pub fn summarize(history: &HistorySeries) -> Result<DrawStats, SessionError> {
        let latest = history.latest().ok_or(SessionError::InsufficientData {
            required: 1,
            available: 0,
        })?;

        let results = history.results();
        let last10_results = results[results.len().saturating_sub(STATS_WINDOW)..].to_vec();
        let distribution =
            last10_results
                .iter()
                .fold(OutcomeCounts::default(), |mut counts, outcome| {
                    match outcome {
                        Outcome::Big => counts.big += 1,
                        Outcome::Small => counts.small += 1,
                    }
                    counts
                });

        let numbers = history.numbers();
        let recent_numbers = numbers[numbers.len().saturating_sub(STATS_WINDOW)..].to_vec();

        Ok(DrawStats {
            total_records: history.len(),
            latest_issue: latest.issue,
            last10_results,
            distribution,
            recent_numbers,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceError;
    use crate::types::{DrawRecord, IssueId, Verdict};
    use async_trait::async_trait;

    struct FixedSource(HistorySeries);

    #[async_trait]
    impl DrawSource for FixedSource {
        async fn fetch(&self) -> Result<HistorySeries, DataSourceError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DrawSource for FailingSource {
        async fn fetch(&self) -> Result<HistorySeries, DataSourceError> {
            Err(DataSourceError::Timeout)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn history(numbers: &[u8]) -> HistorySeries {
        numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| DrawRecord::new(IssueId(1000 + i as u64), n, i as i64 * 60_000))
            .collect::<Vec<_>>()
            .into()
    }

    fn session(numbers: &[u8]) -> PredictionSession {
        PredictionSession::new(
            Arc::new(FixedSource(history(numbers))),
            Arc::new(Cache::new(Duration::from_secs(120))),
            SessionConfig::default(),
        )
    }

    fn cached(prediction: Outcome, confidence: u8) -> CachedPrediction {
        NextPrediction {
            prediction,
            confidence,
            total_votes: 100,
            breakdown: OutcomeCounts {
                big: confidence as usize,
                small: 100 - confidence as usize,
            },
            for_issue: IssueId(1029),
            timestamp: 0,
        }
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 7 + i / 3) % 10) as u8).collect()
    }

    #[tokio::test]
    async fn test_first_run_has_no_verdict() {
        let session = session(&sample(30));
        let result = session.run().await.unwrap();

        assert!(result.win_loss.is_none());
        assert_eq!(result.data_points, 30);
        assert_eq!(result.latest.issue, IssueId(1029));
        assert_eq!(result.next.for_issue, IssueId(1030));
        assert_eq!(result.accuracy.tested, 19);
    }

    #[tokio::test]
    async fn test_loss_against_cached_prediction() {
        let mut numbers = sample(30);
        *numbers.last_mut().unwrap() = 2;
        let session = session(&numbers);
        session.cache().set(LAST_PREDICTION_KEY, cached(Outcome::Big, 70));

        let result = session.run().await.unwrap();
        let verdict = result.win_loss.unwrap();
        assert_eq!(verdict.status, Verdict::Loss);
        assert_eq!(verdict.predicted, Outcome::Big);
        assert_eq!(verdict.actual, Outcome::Small);
        assert_eq!(verdict.confidence, 70);
        assert_eq!(verdict.issue, IssueId(1029));
    }

    #[tokio::test]
    async fn test_win_against_cached_prediction() {
        let mut numbers = sample(30);
        *numbers.last_mut().unwrap() = 8;
        let session = session(&numbers);
        session.cache().set(LAST_PREDICTION_KEY, cached(Outcome::Big, 64));

        let verdict = session.run().await.unwrap().win_loss.unwrap();
        assert_eq!(verdict.status, Verdict::Win);
        assert_eq!(verdict.confidence, 64);
    }

    #[tokio::test]
    async fn test_prediction_is_cached_for_next_round() {
        let session = session(&sample(40));
        let first = session.run().await.unwrap();

        let stored = session.cache().get(LAST_PREDICTION_KEY).unwrap();
        assert_eq!(stored, first.next);

        let second = session.run().await.unwrap();
        let verdict = second.win_loss.unwrap();
        assert_eq!(verdict.predicted, first.next.prediction);
        assert_eq!(verdict.confidence, first.next.confidence);
    }

    #[tokio::test]
    async fn test_cached_prediction_expires() {
        let session = PredictionSession::new(
            Arc::new(FixedSource(history(&sample(20)))),
            Arc::new(Cache::new(Duration::from_secs(120))),
            SessionConfig {
                prediction_ttl: Duration::from_millis(10),
                ..SessionConfig::default()
            },
        );
        session.run().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(session.run().await.unwrap().win_loss.is_none());
    }

    #[tokio::test]
    async fn test_insufficient_data() {
        let session = session(&sample(9));
        let err = session.run().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::InsufficientData {
                required: 10,
                available: 9
            }
        ));
        assert!(session.cache().get(LAST_PREDICTION_KEY).is_none());
    }

    #[tokio::test]
    async fn test_short_history_skips_backtest() {
        let result = session(&sample(12)).run().await.unwrap();
        assert_eq!(result.accuracy.tested, 0);
        assert_eq!(result.accuracy.rate, 0);
    }

    #[tokio::test]
    async fn test_source_failure() {
        let session = PredictionSession::new(
            Arc::new(FailingSource),
            Arc::new(Cache::new(Duration::from_secs(120))),
            SessionConfig::default(),
        );
        session.cache().set(LAST_PREDICTION_KEY, cached(Outcome::Small, 55));

        let err = session.run().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::DataSource(DataSourceError::Timeout)
        ));
        // Untouched
        assert_eq!(
            session.cache().get(LAST_PREDICTION_KEY).map(|p| p.confidence),
            Some(55)
        );
    }

    #[tokio::test]
    async fn test_stats() {
        let numbers = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 5, 5];
        let stats = session(&numbers).stats().await.unwrap();

        assert_eq!(stats.total_records, 12);
        assert_eq!(stats.latest_issue, IssueId(1011));
        assert_eq!(stats.recent_numbers, vec![3, 4, 5, 6, 7, 8, 9, 0, 5, 5]);
        assert_eq!(stats.last10_results.len(), 10);
        assert_eq!(stats.distribution, OutcomeCounts { big: 7, small: 3 });
    }

    #[test]
    fn test_stats_on_empty_history() {
        let err = PredictionSession::summarize(&HistorySeries::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InsufficientData {
                required: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn test_stats_on_short_history() {
        let stats = PredictionSession::summarize(&history(&[9, 1, 6])).unwrap();
        assert_eq!(stats.recent_numbers, vec![9, 1, 6]);
        assert_eq!(stats.distribution, OutcomeCounts { big: 2, small: 1 });
    }
}
