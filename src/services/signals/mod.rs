//! Ensemble voting engine.
//!
//! Every heuristic in [`indicators`] is a pure function from the digit and/or
//! BIG/SMALL history to a [`Vote`]. [`Heuristic`] is the closed set of those
//! functions with their parameters, the [`ModelBank`] is a declarative grid of
//! them, and [`ensemble`] turns the grid's votes into one prediction.

pub mod ensemble;
pub mod indicators;
pub mod model_bank;

pub use ensemble::aggregate;
pub use model_bank::{ModelBank, ModelSpec, Window};

use crate::types::{Outcome, Vote};
use indicators::{
    fibonacci, frequency, levels, momentum, moving_average, pattern, rsi, trend, volatility,
};
use std::fmt;

/// Midpoint of the 0-9 digit range.
pub const MIDPOINT: f64 = 4.5;

/// Last `n` elements, or the whole slice when it is shorter.
pub fn tail<T>(data: &[T], n: usize) -> &[T] {
    &data[data.len().saturating_sub(n)..]
}

/// BIG when `value` is at or above the midpoint.
pub fn by_midpoint(value: f64) -> Outcome {
    if value >= MIDPOINT {
        Outcome::Big
    } else {
        Outcome::Small
    }
}

/// Arithmetic mean of a digit window.
pub fn mean(values: &[u8]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Population standard deviation around `mean`.
pub fn population_std_dev(values: &[u8], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// A heuristic predictor and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heuristic {
    SimpleMovingAverage { period: usize },
    ExponentialMovingAverage { period: usize },
    WeightedMovingAverage { period: usize },
    RelativeStrengthIndex { period: usize },
    StochasticRsi { period: usize },
    Momentum { period: usize },
    RateOfChange { period: usize },
    FibonacciRetracement,
    FibonacciSequence,
    ConsecutivePattern,
    ZigzagPattern,
    StreakBreaker,
    CyclicPattern { cycle: usize },
    FrequencyDistribution { lookback: usize },
    HotColdNumbers { lookback: usize },
    StandardDeviation { period: usize },
    BollingerBands { period: usize, multiplier: f64 },
    LinearRegression { period: usize },
    TrendStrength { period: usize },
    SupportResistance { lookback: usize },
    GapAnalysis,
}

impl Heuristic {
    /// Run the heuristic. Digit-based heuristics ignore `results` and
    /// result-based ones ignore `numbers`.
    pub fn vote(&self, numbers: &[u8], results: &[Outcome]) -> Vote {
        match *self {
            Self::SimpleMovingAverage { period } => {
                moving_average::simple_moving_average(numbers, period)
            }
            Self::ExponentialMovingAverage { period } => {
                moving_average::exponential_moving_average(numbers, period)
            }
            Self::WeightedMovingAverage { period } => {
                moving_average::weighted_moving_average(numbers, period)
            }
            Self::RelativeStrengthIndex { period } => rsi::relative_strength_index(numbers, period),
            Self::StochasticRsi { period } => rsi::stochastic_rsi(numbers, period),
            Self::Momentum { period } => momentum::momentum(numbers, period),
            Self::RateOfChange { period } => momentum::rate_of_change(numbers, period),
            Self::FibonacciRetracement => fibonacci::fibonacci_retracement(numbers),
            Self::FibonacciSequence => fibonacci::fibonacci_sequence(numbers),
            Self::ConsecutivePattern => pattern::consecutive_pattern(results),
            Self::ZigzagPattern => pattern::zigzag_pattern(results),
            Self::StreakBreaker => pattern::streak_breaker(results),
            Self::CyclicPattern { cycle } => pattern::cyclic_pattern(results, cycle),
            Self::FrequencyDistribution { lookback } => {
                frequency::frequency_distribution(numbers, lookback)
            }
            Self::HotColdNumbers { lookback } => frequency::hot_cold_numbers(numbers, lookback),
            Self::StandardDeviation { period } => volatility::standard_deviation(numbers, period),
            Self::BollingerBands { period, multiplier } => {
                volatility::bollinger_bands(numbers, period, multiplier)
            }
            Self::LinearRegression { period } => trend::linear_regression(numbers, period),
            Self::TrendStrength { period } => trend::trend_strength(numbers, period),
            Self::SupportResistance { lookback } => levels::support_resistance(numbers, lookback),
            Self::GapAnalysis => levels::gap_analysis(numbers),
        }
    }

    /// Shortest history the heuristic votes on; below this it abstains.
    pub fn min_periods(&self) -> usize {
        match *self {
            Self::SimpleMovingAverage { period }
            | Self::ExponentialMovingAverage { period }
            | Self::WeightedMovingAverage { period }
            | Self::Momentum { period }
            | Self::RateOfChange { period }
            | Self::StandardDeviation { period }
            | Self::BollingerBands { period, .. }
            | Self::LinearRegression { period }
            | Self::TrendStrength { period } => period,
            Self::RelativeStrengthIndex { period } => period + 1,
            Self::StochasticRsi { period } => period * 2,
            Self::CyclicPattern { cycle } => cycle * 2,
            Self::FrequencyDistribution { lookback }
            | Self::HotColdNumbers { lookback }
            | Self::SupportResistance { lookback } => lookback,
            Self::FibonacciRetracement => fibonacci::RETRACEMENT_WINDOW,
            Self::FibonacciSequence => fibonacci::SEQUENCE_WINDOW,
            Self::ConsecutivePattern => 3,
            Self::ZigzagPattern => 4,
            Self::StreakBreaker => 5,
            Self::GapAnalysis => levels::GAP_WINDOW,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimpleMovingAverage { period } => write!(f, "SMA ({})", period),
            Self::ExponentialMovingAverage { period } => write!(f, "EMA ({})", period),
            Self::WeightedMovingAverage { period } => write!(f, "WMA ({})", period),
            Self::RelativeStrengthIndex { period } => write!(f, "RSI ({})", period),
            Self::StochasticRsi { period } => write!(f, "Stochastic RSI ({})", period),
            Self::Momentum { period } => write!(f, "Momentum ({})", period),
            Self::RateOfChange { period } => write!(f, "ROC ({})", period),
            Self::FibonacciRetracement => f.write_str("Fibonacci Retracement"),
            Self::FibonacciSequence => f.write_str("Fibonacci Sequence"),
            Self::ConsecutivePattern => f.write_str("Consecutive Pattern"),
            Self::ZigzagPattern => f.write_str("Zigzag Pattern"),
            Self::StreakBreaker => f.write_str("Streak Breaker"),
            Self::CyclicPattern { cycle } => write!(f, "Cyclic Pattern ({})", cycle),
            Self::FrequencyDistribution { lookback } => write!(f, "Frequency ({})", lookback),
            Self::HotColdNumbers { lookback } => write!(f, "Hot/Cold ({})", lookback),
            Self::StandardDeviation { period } => write!(f, "Std Dev ({})", period),
            Self::BollingerBands { period, multiplier } => {
                write!(f, "Bollinger ({}, {})", period, multiplier)
            }
            Self::LinearRegression { period } => write!(f, "Linear Regression ({})", period),
            Self::TrendStrength { period } => write!(f, "Trend Strength ({})", period),
            Self::SupportResistance { lookback } => write!(f, "Support/Resistance ({})", lookback),
            Self::GapAnalysis => f.write_str("Gap Analysis"),
        }
    }
}
