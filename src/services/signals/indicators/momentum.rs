//! Momentum and rate-of-change models.
//!
//! Both compare the latest digit against `numbers[len - period]`.

use crate::types::{Outcome, Vote};

fn endpoints(numbers: &[u8], period: usize) -> Option<(f64, f64)> {
    if period == 0 || numbers.len() < period {
        return None;
    }

    let current = *numbers.last()? as f64;
    let previous = numbers[numbers.len() - period] as f64;
    Some((current, previous))
}

/// Votes BIG when the latest digit is at least the reference digit.
pub fn momentum(numbers: &[u8], period: usize) -> Vote {
    let (current, previous) = endpoints(numbers, period)?;

    Some(if current - previous >= 0.0 {
        Outcome::Big
    } else {
        Outcome::Small
    })
}

/// Percentage change from the reference digit. A zero reference votes SMALL.
pub fn rate_of_change(numbers: &[u8], period: usize) -> Vote {
    let (current, previous) = endpoints(numbers, period)?;

    if previous == 0.0 {
        return Some(Outcome::Small);
    }

    let roc = (current - previous) / previous * 100.0;
    Some(if roc >= 0.0 { Outcome::Big } else { Outcome::Small })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_reference_index() {
        // len 5, period 3 -> compares numbers[2] = 9 with the last = 4
        assert_eq!(momentum(&[0, 0, 9, 0, 4], 3), Some(Outcome::Small));
        assert_eq!(momentum(&[0, 0, 1, 0, 4], 3), Some(Outcome::Big));
    }

    #[test]
    fn test_momentum_flat_is_big() {
        assert_eq!(momentum(&[3, 3, 3], 3), Some(Outcome::Big));
    }

    #[test]
    fn test_momentum_minimum_length() {
        assert_eq!(momentum(&[1, 2], 3), None);
        assert!(momentum(&[1, 2, 3], 3).is_some());
    }

    #[test]
    fn test_roc_zero_reference_is_small() {
        assert_eq!(rate_of_change(&[0, 5, 9], 3), Some(Outcome::Small));
    }

    #[test]
    fn test_roc_direction() {
        assert_eq!(rate_of_change(&[2, 5, 4], 3), Some(Outcome::Big));
        assert_eq!(rate_of_change(&[6, 5, 4], 3), Some(Outcome::Small));
    }

    #[test]
    fn test_roc_minimum_length() {
        assert_eq!(rate_of_change(&[1, 2, 3, 4], 5), None);
        assert!(rate_of_change(&[1, 2, 3, 4, 5], 5).is_some());
    }
}
