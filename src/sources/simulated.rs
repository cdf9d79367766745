use super::DrawSource;
use crate::error::DataSourceError;
use crate::types::{DrawRecord, HistorySeries, IssueId};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const MINUTE_MS: i64 = 60_000;

/// Offline draw feed producing one uniformly random digit per minute.
///
/// The issue id is the minute index since the Unix epoch and each digit is
/// derived from the seed and that index alone, so repeated fetches agree on
/// every draw they share.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    history_len: usize,
    seed: u64,
}

impl SimulatedSource {
    pub fn new(history_len: usize, seed: u64) -> Self {
        Self { history_len, seed }
    }

    /// Seeded from the OS RNG.
    pub fn random(history_len: usize) -> Self {
        Self::new(history_len, rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The draw published for `minute`.
    pub fn draw(&self, minute: u64) -> DrawRecord {
        let mut rng = StdRng::seed_from_u64(self.seed ^ minute.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let number = rng.gen_range(0..10u8);
        DrawRecord::new(IssueId(minute), number, minute as i64 * MINUTE_MS)
    }

    /// The most recent `history_len` completed draws as of `now` (ms).
    pub fn history_at(&self, now: i64) -> HistorySeries {
        let current = (now.max(0) / MINUTE_MS) as u64;
        let first = current.saturating_sub(self.history_len as u64);
        (first..current)
            .map(|minute| self.draw(minute))
            .collect::<Vec<_>>()
            .into()
    }
}

#[async_trait]
impl DrawSource for SimulatedSource {
    async fn fetch(&self) -> Result<HistorySeries, DataSourceError> {
        let history = self.history_at(chrono::Utc::now().timestamp_millis());
        debug!("Simulated {} draws", history.len());
        Ok(history)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
