//! Draw history providers.

pub mod simulated;
pub mod wingo;

pub use simulated::SimulatedSource;
pub use wingo::WinGoClient;

use crate::error::DataSourceError;
use crate::types::HistorySeries;
use async_trait::async_trait;

/// Anything that can produce the recent draw history, oldest first.
#[async_trait]
pub trait DrawSource: Send + Sync {
    async fn fetch(&self) -> Result<HistorySeries, DataSourceError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
