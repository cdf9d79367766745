//! Fibonacci-based models.

use crate::services::signals::{by_midpoint, tail};
use crate::types::{Outcome, Vote};

/// Window the retracement levels are measured over.
pub const RETRACEMENT_WINDOW: usize = 20;

/// Window scanned for Fibonacci digits.
pub const SEQUENCE_WINDOW: usize = 5;

const FIBONACCI_DIGITS: [u8; 7] = [0, 1, 1, 2, 3, 5, 8];

/// Retracement levels over the trailing 20 digits.
///
/// Above the 38.2% level votes BIG, below the 61.8% level votes SMALL, and
/// anything in between falls back to the midpoint rule.
pub fn fibonacci_retracement(numbers: &[u8]) -> Vote {
    if numbers.len() < RETRACEMENT_WINDOW {
        return None;
    }

    let recent = tail(numbers, RETRACEMENT_WINDOW);
    let high = *recent.iter().max()? as f64;
    let low = *recent.iter().min()? as f64;
    let current = *numbers.last()? as f64;

    let range = high - low;
    let fib618 = high - range * 0.618;
    let fib382 = high - range * 0.382;

    if current > fib382 {
        return Some(Outcome::Big);
    }
    if current < fib618 {
        return Some(Outcome::Small);
    }

    Some(by_midpoint(current))
}

/// Votes BIG when at least three of the last five digits are Fibonacci
/// numbers.
pub fn fibonacci_sequence(numbers: &[u8]) -> Vote {
    if numbers.len() < SEQUENCE_WINDOW {
        return None;
    }

    let matches = tail(numbers, SEQUENCE_WINDOW)
        .iter()
        .filter(|n| FIBONACCI_DIGITS.contains(n))
        .count();

    Some(if matches >= 3 { Outcome::Big } else { Outcome::Small })
}
