//! The fixed grid of model invocations that make up the ensemble.

use super::indicators::{trend::DEFAULT_TREND_PERIOD, volatility::DEFAULT_BAND_MULTIPLIER};
use super::{tail, Heuristic};
use crate::types::{Outcome, Vote};

/// Which part of the history a model sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// The whole history.
    Full,
    /// The trailing `n` draws, or the whole history when it is shorter.
    Tail(usize),
}

impl Window {
    pub fn apply<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        match *self {
            Window::Full => data,
            Window::Tail(n) => tail(data, n),
        }
    }
}

/// One entry in the model bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub heuristic: Heuristic,
    pub window: Window,
}

impl ModelSpec {
    pub fn full(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            window: Window::Full,
        }
    }

    pub fn tail(heuristic: Heuristic, n: usize) -> Self {
        Self {
            heuristic,
            window: Window::Tail(n),
        }
    }

    pub fn vote(&self, numbers: &[u8], results: &[Outcome]) -> Vote {
        self.heuristic
            .vote(self.window.apply(numbers), self.window.apply(results))
    }
}

/// Ordered collection of models evaluated together.
///
/// The same bank must be used for the live prediction and the backtest so
/// the reported accuracy describes the model set that produced the
/// prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBank {
    models: Vec<ModelSpec>,
}

impl ModelBank {
    pub fn new(models: Vec<ModelSpec>) -> Self {
        Self { models }
    }

    /// The standard 125-model grid.
    pub fn standard() -> Self {
        use Heuristic::*;

        let mut models = Vec::with_capacity(125);

        // Moving averages
        for period in [3, 5, 7, 10, 14, 20, 30] {
            models.push(ModelSpec::full(SimpleMovingAverage { period }));
            models.push(ModelSpec::full(ExponentialMovingAverage { period }));
            if period <= 20 {
                models.push(ModelSpec::full(WeightedMovingAverage { period }));
            }
        }

        // Oscillators
        for period in [7, 9, 14, 21, 28] {
            models.push(ModelSpec::full(RelativeStrengthIndex { period }));
            models.push(ModelSpec::full(StochasticRsi { period }));
        }

        // Momentum
        for period in [5, 7, 10, 12, 15] {
            models.push(ModelSpec::full(Momentum { period }));
            models.push(ModelSpec::full(RateOfChange { period }));
        }

        // Fibonacci
        models.push(ModelSpec::full(FibonacciRetracement));
        models.push(ModelSpec::full(FibonacciSequence));
        for n in [30, 25, 20] {
            models.push(ModelSpec::tail(FibonacciRetracement, n));
        }

        // Result patterns
        models.push(ModelSpec::full(ConsecutivePattern));
        models.push(ModelSpec::full(ZigzagPattern));
        models.push(ModelSpec::full(StreakBreaker));
        for cycle in 5..=10 {
            models.push(ModelSpec::full(CyclicPattern { cycle }));
        }
        for n in 10..23 {
            models.push(ModelSpec::tail(ConsecutivePattern, n));
        }

        // Frequency
        for lookback in [20, 30, 40, 50, 60] {
            models.push(ModelSpec::full(FrequencyDistribution { lookback }));
            models.push(ModelSpec::full(HotColdNumbers { lookback }));
        }
        for lookback in [25, 28, 31, 34, 37] {
            models.push(ModelSpec::full(FrequencyDistribution { lookback }));
        }

        // Volatility
        for period in [10, 15, 20, 25, 30] {
            models.push(ModelSpec::full(StandardDeviation { period }));
            models.push(ModelSpec::full(BollingerBands {
                period,
                multiplier: DEFAULT_BAND_MULTIPLIER,
            }));
        }
        for multiplier in [1.5, 2.0, 2.5] {
            models.push(ModelSpec::full(BollingerBands {
                period: 20,
                multiplier,
            }));
        }

        // Trend
        for period in [5, 10, 15, 20, 25] {
            models.push(ModelSpec::full(LinearRegression { period }));
            models.push(ModelSpec::full(TrendStrength { period }));
        }
        for n in [20, 22, 24, 26, 28] {
            models.push(ModelSpec::tail(
                TrendStrength {
                    period: DEFAULT_TREND_PERIOD,
                },
                n,
            ));
        }

        // Support/resistance and gaps
        for lookback in [20, 25, 30, 35, 40] {
            models.push(ModelSpec::full(SupportResistance { lookback }));
        }
        for n in 15..25 {
            models.push(ModelSpec::tail(GapAnalysis, n));
        }

        Self { models }
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Run every model over the history. The result keeps the bank's order
    /// and includes abstentions.
    pub fn votes(&self, numbers: &[u8], results: &[Outcome]) -> Vec<Vote> {
        self.models
            .iter()
            .map(|model| model.vote(numbers, results))
            .collect()
    }
}

impl Default for ModelBank {
    fn default() -> Self {
        Self::standard()
    }
}
