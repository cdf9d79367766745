//! Relative Strength Index models.

use crate::services::signals::tail;
use crate::types::{Outcome, Vote};

/// RSI over the trailing `period` transitions.
///
/// Unlike a charting RSI this uses plain (unsmoothed) averages of the last
/// `period` gains and losses. No losses at all votes BIG; otherwise RSI above
/// 50 votes BIG.
pub fn relative_strength_index(numbers: &[u8], period: usize) -> Vote {
    if numbers.len() < period + 1 {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in tail(numbers, period + 1).windows(2) {
        let change = pair[1] as f64 - pair[0] as f64;
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(Outcome::Big);
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(if rsi > 50.0 { Outcome::Big } else { Outcome::Small })
}

/// Stochastic oscillator over the trailing `period` digits.
///
/// Needs twice the window of history before it votes. A flat window votes
/// SMALL.
pub fn stochastic_rsi(numbers: &[u8], period: usize) -> Vote {
    if numbers.len() < period * 2 {
        return None;
    }

    let recent = tail(numbers, period);
    let max = *recent.iter().max()? as f64;
    let min = *recent.iter().min()? as f64;
    let current = *recent.last()? as f64;

    if max == min {
        return Some(Outcome::Small);
    }

    let stoch = (current - min) / (max - min) * 100.0;

    Some(if stoch > 50.0 { Outcome::Big } else { Outcome::Small })
}
