//! Frequency analysis models.

use crate::services::signals::{by_midpoint, tail};
use crate::types::{Outcome, Vote, BIG_THRESHOLD};

/// Number of most frequent digits averaged by [`hot_cold_numbers`].
pub const HOT_DIGITS: usize = 3;

/// Mean reversion on the BIG share of the trailing `lookback` digits: the
/// under-represented side is voted.
pub fn frequency_distribution(numbers: &[u8], lookback: usize) -> Vote {
    if lookback == 0 || numbers.len() < lookback {
        return None;
    }

    let big = tail(numbers, lookback)
        .iter()
        .filter(|&&n| n >= BIG_THRESHOLD)
        .count();
    let big_freq = big as f64 / lookback as f64;

    Some(if big_freq < 0.5 { Outcome::Big } else { Outcome::Small })
}

/// Averages the three most frequent digits of the trailing `lookback`.
/// Every value in `numbers` must be 0-9.
///
/// Digits are ranked by descending count with a stable sort over ascending
/// digit order, so equal counts favour the smaller digit.
pub fn hot_cold_numbers(numbers: &[u8], lookback: usize) -> Vote {
    if lookback == 0 || numbers.len() < lookback {
        return None;
    }

    let mut counts = [0usize; 10];
    for &n in tail(numbers, lookback) {
        counts[usize::from(n)] += 1;
    }

    let mut ranked: Vec<(u8, usize)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(digit, &count)| (digit as u8, count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let hot: Vec<f64> = ranked
        .iter()
        .take(HOT_DIGITS)
        .map(|&(digit, _)| digit as f64)
        .collect();
    let hot_avg = hot.iter().sum::<f64>() / hot.len() as f64;

    Some(by_midpoint(hot_avg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_mean_reversion() {
        assert_eq!(frequency_distribution(&[1, 2, 3, 7], 4), Some(Outcome::Big));
        assert_eq!(frequency_distribution(&[1, 2, 8, 7], 4), Some(Outcome::Small));
        assert_eq!(frequency_distribution(&[9, 8, 6, 7], 4), Some(Outcome::Small));
    }

    #[test]
    fn test_frequency_uses_trailing_window() {
        assert_eq!(
            frequency_distribution(&[9, 9, 9, 9, 1, 2], 2),
            Some(Outcome::Big)
        );
    }

    #[test]
    fn test_frequency_minimum_length() {
        assert_eq!(frequency_distribution(&[1, 2, 3], 4), None);
    }

    #[test]
    fn test_hot_numbers_average() {
        // Hot digits: 9 (x3), 8 (x2), 1 (x1 tie with 2, smaller first) -> 6.0
        let numbers = [9, 9, 9, 8, 8, 1, 2];
        assert_eq!(hot_cold_numbers(&numbers, 7), Some(Outcome::Big));

        // Hot digits: 0 (x3), 1 (x2), 9 (x1) -> 3.33
        let numbers = [0, 0, 0, 1, 1, 9];
        assert_eq!(hot_cold_numbers(&numbers, 6), Some(Outcome::Small));
    }

    #[test]
    fn test_hot_numbers_tie_break_prefers_smaller_digits() {
        // Every digit appears once: ranking keeps ascending order -> 0, 1, 2
        let numbers = [9, 8, 7, 6, 5, 2, 1, 0];
        assert_eq!(hot_cold_numbers(&numbers, 8), Some(Outcome::Small));
    }

    #[test]
    fn test_hot_numbers_fewer_than_three_distinct() {
        assert_eq!(hot_cold_numbers(&[7, 7, 7, 7], 4), Some(Outcome::Big));
        assert_eq!(hot_cold_numbers(&[4, 5, 4, 5], 4), Some(Outcome::Big));
    }

    #[test]
    fn test_hot_numbers_minimum_length() {
        assert_eq!(hot_cold_numbers(&[1, 2, 3], 4), None);
        assert!(hot_cold_numbers(&[1, 2, 3, 4], 4).is_some());
    }
}
