//! Majority-vote aggregation.

use crate::types::{EnsembleResult, Outcome, OutcomeCounts, Vote};

/// Combine model votes into one prediction.
///
/// Abstentions are dropped. BIG wins only with a strict majority, so ties go
/// to SMALL, and an empty or all-abstain list yields SMALL with zero
/// confidence. Both SMALL defaults are inherited behaviour rather than a
/// property of the draw.
pub fn aggregate(votes: &[Vote]) -> EnsembleResult {
    let breakdown = votes
        .iter()
        .flatten()
        .fold(OutcomeCounts::default(), |mut counts, outcome| {
            match outcome {
                Outcome::Big => counts.big += 1,
                Outcome::Small => counts.small += 1,
            }
            counts
        });

    let total_votes = breakdown.big + breakdown.small;
    if total_votes == 0 {
        return EnsembleResult {
            prediction: Outcome::Small,
            confidence: 0,
            total_votes: 0,
            breakdown,
        };
    }

    let prediction = if breakdown.big > breakdown.small {
        Outcome::Big
    } else {
        Outcome::Small
    };
    let winning = breakdown.big.max(breakdown.small);
    let confidence = (winning as f64 / total_votes as f64 * 100.0).round() as u8;

    EnsembleResult {
        prediction,
        confidence,
        total_votes,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome::{Big as B, Small as S};

    #[test]
    fn test_majority_big() {
        let result = aggregate(&[Some(B), Some(B), Some(S), None]);
        assert_eq!(result.prediction, B);
        assert_eq!(result.confidence, 67);
        assert_eq!(result.total_votes, 3);
        assert_eq!(result.breakdown, OutcomeCounts { big: 2, small: 1 });
    }

    #[test]
    fn test_majority_small() {
        let result = aggregate(&[Some(S), Some(S), Some(S), Some(B)]);
        assert_eq!(result.prediction, S);
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn test_tie_favours_small() {
        let result = aggregate(&[Some(B), Some(S), None, Some(B), Some(S)]);
        assert_eq!(result.prediction, S);
        assert_eq!(result.confidence, 50);
        assert_eq!(result.total_votes, 4);
    }

    #[test]
    fn test_empty_votes() {
        let result = aggregate(&[]);
        assert_eq!(result.prediction, S);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.total_votes, 0);
        assert_eq!(result.breakdown, OutcomeCounts::default());
    }

    #[test]
    fn test_all_abstain() {
        let result = aggregate(&[None, None, None]);
        assert_eq!(result.prediction, S);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.total_votes, 0);
    }

    #[test]
    fn test_unanimous() {
        let result = aggregate(&[Some(B); 7]);
        assert_eq!(result.prediction, B);
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn test_confidence_rounds_half_up() {
        // 5 of 8 = 62.5%
        let mut votes = vec![Some(B); 5];
        votes.extend([Some(S); 3]);
        assert_eq!(aggregate(&votes).confidence, 63);
    }

    #[test]
    fn test_counts_match_non_abstaining_votes() {
        let patterns: [&[Vote]; 4] = [
            &[Some(B), None, Some(S), None, Some(S)],
            &[None; 6],
            &[Some(B); 9],
            &[Some(S), Some(B), Some(B), None],
        ];
        for votes in patterns {
            let result = aggregate(votes);
            let non_abstaining = votes.iter().filter(|v| v.is_some()).count();
            assert_eq!(result.total_votes, non_abstaining);
            assert_eq!(result.breakdown.big + result.breakdown.small, result.total_votes);
        }
    }

    #[test]
    fn test_deterministic() {
        let votes = [Some(B), None, Some(S), Some(B), Some(S), Some(S)];
        assert_eq!(aggregate(&votes), aggregate(&votes));
    }
}
