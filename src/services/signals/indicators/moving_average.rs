//! Moving average models.
//!
//! All three compare an average of recent digits against the 4.5 midpoint
//! of the 0-9 range: an average at or above it votes BIG.

use crate::services::signals::{by_midpoint, mean, tail};
use crate::types::Vote;

/// Simple moving average over the trailing `period` digits.
pub fn simple_moving_average(numbers: &[u8], period: usize) -> Vote {
    if numbers.len() < period {
        return None;
    }

    Some(by_midpoint(mean(tail(numbers, period))))
}

/// Exponential moving average.
///
/// Seeded with the first digit and run over the whole sequence, not just
/// the trailing window; `period` only sets the smoothing factor and the
/// minimum length.
pub fn exponential_moving_average(numbers: &[u8], period: usize) -> Vote {
    if numbers.len() < period {
        return None;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut values = numbers.iter().map(|&n| n as f64);
    let mut ema = values.next()?;
    for value in values {
        ema = (value - ema) * multiplier + ema;
    }

    Some(by_midpoint(ema))
}

/// Weighted moving average with linear weights `1..=period`, heaviest on
/// the most recent digit.
pub fn weighted_moving_average(numbers: &[u8], period: usize) -> Vote {
    if numbers.len() < period {
        return None;
    }

    let (weighted, weights) = tail(numbers, period)
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(weighted, weights), (idx, &n)| {
            let weight = (idx + 1) as f64;
            (weighted + n as f64 * weight, weights + weight)
        });

    Some(by_midpoint(weighted / weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    #[test]
    fn test_sma_trailing_window() {
        let numbers = [2, 3, 4, 5, 6, 7, 8, 9, 1, 0];
        // 7 + 8 + 9 + 1 + 0 = 25 -> 5.0
        assert_eq!(simple_moving_average(&numbers, 5), Some(Outcome::Big));
        // 9 + 1 + 0 = 10 -> 3.33
        assert_eq!(simple_moving_average(&numbers, 3), Some(Outcome::Small));
    }

    #[test]
    fn test_sma_minimum_length() {
        assert!(simple_moving_average(&[1, 2, 3, 4, 5], 5).is_some());
        assert_eq!(simple_moving_average(&[1, 2, 3, 4], 5), None);
    }

    #[test]
    fn test_sma_midpoint_is_big() {
        // 4 + 5 = 9 -> 4.5
        assert_eq!(simple_moving_average(&[4, 5], 2), Some(Outcome::Big));
    }

    #[test]
    fn test_ema_uses_whole_sequence() {
        // Trailing three digits average 9, but a long run of zeros keeps the
        // EMA low because it is seeded at the start of the sequence.
        let mut numbers = vec![0u8; 40];
        numbers.extend([9]);
        assert_eq!(simple_moving_average(&numbers, 1), Some(Outcome::Big));
        assert_eq!(exponential_moving_average(&numbers, 20), Some(Outcome::Small));
    }

    #[test]
    fn test_ema_minimum_length() {
        assert_eq!(exponential_moving_average(&[9, 9], 3), None);
        assert_eq!(exponential_moving_average(&[9, 9, 9], 3), Some(Outcome::Big));
    }

    #[test]
    fn test_ema_constant_series() {
        let numbers = [4u8; 10];
        assert_eq!(exponential_moving_average(&numbers, 5), Some(Outcome::Small));
    }

    #[test]
    fn test_wma_weights_recent_values() {
        // Weighted: (0*1 + 0*2 + 9*3) / 6 = 4.5
        assert_eq!(weighted_moving_average(&[0, 0, 9], 3), Some(Outcome::Big));
        // Weighted: (9*1 + 0*2 + 0*3) / 6 = 1.5
        assert_eq!(weighted_moving_average(&[9, 0, 0], 3), Some(Outcome::Small));
    }

    #[test]
    fn test_wma_minimum_length() {
        assert_eq!(weighted_moving_average(&[1, 2], 3), None);
        assert!(weighted_moving_average(&[1, 2, 3], 3).is_some());
    }
}
