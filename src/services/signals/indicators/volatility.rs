//! Volatility models.

use crate::services::signals::{mean, population_std_dev, tail};
use crate::types::{Outcome, Vote};

/// Standard deviation above this votes BIG.
pub const HIGH_VOLATILITY: f64 = 2.0;

/// Default Bollinger band width in standard deviations.
pub const DEFAULT_BAND_MULTIPLIER: f64 = 2.0;

/// High volatility over the trailing `period` digits is read as a sign of
/// extreme values ahead and votes BIG.
pub fn standard_deviation(numbers: &[u8], period: usize) -> Vote {
    if period == 0 || numbers.len() < period {
        return None;
    }

    let recent = tail(numbers, period);
    let std_dev = population_std_dev(recent, mean(recent));

    Some(if std_dev > HIGH_VOLATILITY {
        Outcome::Big
    } else {
        Outcome::Small
    })
}

/// Bollinger bands around the SMA of the trailing `period` digits.
///
/// Touching the upper band votes SMALL and touching the lower band votes BIG
/// (reversal). Inside the bands the side of the SMA decides.
pub fn bollinger_bands(numbers: &[u8], period: usize, multiplier: f64) -> Vote {
    if period == 0 || numbers.len() < period {
        return None;
    }

    let recent = tail(numbers, period);
    let sma = mean(recent);
    let std_dev = population_std_dev(recent, sma);

    let upper = sma + std_dev * multiplier;
    let lower = sma - std_dev * multiplier;
    let current = *numbers.last()? as f64;

    if current >= upper {
        return Some(Outcome::Small);
    }
    if current <= lower {
        return Some(Outcome::Big);
    }

    Some(if current >= sma { Outcome::Big } else { Outcome::Small })
}
