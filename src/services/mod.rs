pub mod backtester;
pub mod cache;
pub mod session;
pub mod signals;

pub use backtester::{BacktestConfig, Backtester};
pub use cache::Cache;
pub use session::{PredictionSession, SessionConfig, LAST_PREDICTION_KEY};
pub use signals::{aggregate, Heuristic, ModelBank, ModelSpec, Window};
