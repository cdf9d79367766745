//! Heuristic predictor implementations.
//!
//! Each function returns `None` (abstain) when the history is shorter than
//! the window it needs.

pub mod fibonacci;
pub mod frequency;
pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod pattern;
pub mod rsi;
pub mod trend;
pub mod volatility;
