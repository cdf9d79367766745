//! Pattern recognition over the BIG/SMALL result sequence.

use crate::services::signals::tail;
use crate::types::{Outcome, Vote};

/// Three identical results in a row vote for the opposite; otherwise the
/// last result repeats.
pub fn consecutive_pattern(results: &[Outcome]) -> Vote {
    if results.len() < 3 {
        return None;
    }

    let last3 = tail(results, 3);
    let last = last3[2];
    if last3.iter().all(|&r| r == last) {
        return Some(last.opposite());
    }

    Some(last)
}

/// Four strictly alternating results vote to continue the alternation;
/// otherwise the last result repeats.
pub fn zigzag_pattern(results: &[Outcome]) -> Vote {
    if results.len() < 4 {
        return None;
    }

    let last4 = tail(results, 4);
    let last = last4[3];
    if last4.windows(2).all(|pair| pair[0] != pair[1]) {
        return Some(last.opposite());
    }

    Some(last)
}

/// Mean reversion over the last five results: four or more BIG votes SMALL,
/// one or fewer votes BIG, otherwise the last result repeats.
pub fn streak_breaker(results: &[Outcome]) -> Vote {
    if results.len() < 5 {
        return None;
    }

    let last5 = tail(results, 5);
    let big = last5.iter().filter(|&&r| r == Outcome::Big).count();

    if big >= 4 {
        return Some(Outcome::Small);
    }
    if big <= 1 {
        return Some(Outcome::Big);
    }

    Some(last5[4])
}

/// Compares the latest `cycle` results against the `cycle` before them.
///
/// When at least 60% of positions agree, the cycle is assumed to repeat and
/// the model votes the result from exactly `cycle` draws ago. Otherwise the
/// last result repeats.
pub fn cyclic_pattern(results: &[Outcome], cycle: usize) -> Vote {
    if cycle == 0 || results.len() < cycle * 2 {
        return None;
    }

    let window = tail(results, cycle * 2);
    let (previous, recent) = window.split_at(cycle);
    let similarity = previous
        .iter()
        .zip(recent)
        .filter(|(a, b)| a == b)
        .count();

    if similarity as f64 >= cycle as f64 * 0.6 {
        return Some(results[results.len() - cycle]);
    }

    results.last().copied()
}
