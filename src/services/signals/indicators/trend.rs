//! Trend following models.

use crate::services::signals::tail;
use crate::types::{Outcome, Vote};

/// Default window for [`trend_strength`].
pub const DEFAULT_TREND_PERIOD: usize = 10;

/// Least-squares slope over the trailing `period` digits (x = 0..n-1).
/// A rising line votes BIG.
pub fn linear_regression(numbers: &[u8], period: usize) -> Vote {
    if period == 0 || numbers.len() < period {
        return None;
    }

    let recent = tail(numbers, period);
    let n = recent.len() as f64;

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (x, &y) in recent.iter().enumerate() {
        let x = x as f64;
        let y = y as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // A single point has no slope; NaN compares false and votes SMALL.
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);

    Some(if slope > 0.0 { Outcome::Big } else { Outcome::Small })
}

/// Share of up-moves between consecutive digits in the trailing `period`.
/// More than half votes BIG.
pub fn trend_strength(numbers: &[u8], period: usize) -> Vote {
    if period == 0 || numbers.len() < period {
        return None;
    }

    let recent = tail(numbers, period);
    let up_moves = recent.windows(2).filter(|pair| pair[1] > pair[0]).count();
    let score = up_moves as f64 / (recent.len() - 1) as f64;

    Some(if score > 0.5 { Outcome::Big } else { Outcome::Small })
}
