//! Support/resistance and gap models.

use crate::services::signals::{by_midpoint, tail};
use crate::types::{Outcome, Vote};

/// Window scanned by [`gap_analysis`].
pub const GAP_WINDOW: usize = 10;

/// Smallest jump between consecutive digits that counts as a gap.
pub const GAP_SIZE: u8 = 3;

/// Position of the latest digit between the trailing low (support) and high
/// (resistance).
///
/// Near resistance (above 70%) votes SMALL, near support (below 30%) votes
/// BIG, otherwise the midpoint rule decides. A flat window has no defined
/// position and also falls through to the midpoint rule.
pub fn support_resistance(numbers: &[u8], lookback: usize) -> Vote {
    if lookback == 0 || numbers.len() < lookback {
        return None;
    }

    let recent = tail(numbers, lookback);
    let resistance = *recent.iter().max()? as f64;
    let support = *recent.iter().min()? as f64;
    let current = *numbers.last()? as f64;

    let range = resistance - support;
    if range > 0.0 {
        let position = (current - support) / range;
        if position > 0.7 {
            return Some(Outcome::Small);
        }
        if position < 0.3 {
            return Some(Outcome::Big);
        }
    }

    Some(by_midpoint(current))
}

/// Counts large jumps between consecutive digits in the trailing 10. Three or
/// more suggest volatility and vote BIG.
pub fn gap_analysis(numbers: &[u8]) -> Vote {
    if numbers.len() < GAP_WINDOW {
        return None;
    }

    let gaps = tail(numbers, GAP_WINDOW)
        .windows(2)
        .filter(|pair| pair[0].abs_diff(pair[1]) >= GAP_SIZE)
        .count();

    Some(if gaps >= 3 { Outcome::Big } else { Outcome::Small })
}
