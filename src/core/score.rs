//! Weighted quality scoring for operational edge audit records.
//!
//! Four rating groups, each averaged over its eligible fields and combined
//! by weight. Weights are renormalized over the groups that actually
//! produced an average, so a record missing a whole group is not dragged
//! down by a phantom zero.

use crate::config::ScoringWeights;
use crate::core::types::{AuditRatings, Rating, ScoreBreakdown};

/// Fields of the v1 audit schema, scored as a plain unweighted average.
const LEGACY_FIELDS: usize = 7;

/// Compute the weighted score breakdown for an audit block.
///
/// Group averages use only eligible ratings (finite, greater than zero, not
/// a sentinel). A group with no eligible field yields no average; the
/// overall score is the weighted mean over contributing groups only, and is
/// `None` when no group contributes.
pub fn compute_scores(audit: &AuditRatings, weights: &ScoringWeights) -> ScoreBreakdown {
    let operational = mean(&[
        value(&audit.pos_sector),
        value(&audit.mission_briefing),
        value(&audit.sector_history),
        value(&audit.threat_understanding),
        value(&audit.appearance),
        value(&audit.effort),
        value(&audit.drills),
        value(&audit.roe),
    ]);
    let technical = mean(&[value(&audit.systems), value(&audit.communication)]);
    let intelligence = mean(&[value(&audit.intel_tools)]);
    let medical = mean(&[value(&audit.medical)]);

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (group_avg, weight) in [
        (operational, weights.operational),
        (technical, weights.technical),
        (intelligence, weights.intelligence),
        (medical, weights.medical),
    ] {
        if let Some(avg) = group_avg {
            weighted_sum += avg * weight;
            weight_total += weight;
        }
    }
    let overall_avg5 = if weight_total > 0.0 {
        Some(weighted_sum / weight_total)
    } else {
        None
    };

    ScoreBreakdown {
        overall_100: overall_avg5.map(to_100),
        overall_avg5: overall_avg5.map(round_1),
        operational_100: operational.map(to_100),
        tech_100: technical.map(to_100),
        intel_100: intelligence.map(to_100),
        medical_100: medical.map(to_100),
    }
}

/// Plain average over the seven v1 rating fields, rounded to one decimal.
/// Used as the score display for records predating the weighted schema.
pub fn legacy_average(audit: &AuditRatings) -> Option<f64> {
    let fields: [Option<f64>; LEGACY_FIELDS] = [
        value(&audit.appearance),
        value(&audit.discipline),
        value(&audit.knowledge),
        value(&audit.readiness),
        value(&audit.cleanliness),
        value(&audit.mission_delivery_quality),
        value(&audit.mission_mastery),
    ];
    mean(&fields).map(round_1)
}

/// Map a 1-5 average onto the 0-100 scale.
pub fn to_100(avg5: f64) -> u32 {
    (avg5 / 5.0 * 100.0).round() as u32
}

fn round_1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn value(rating: &Option<Rating>) -> Option<f64> {
    rating.as_ref().and_then(Rating::eligible)
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let eligible: Vec<f64> = values.iter().flatten().copied().collect();
    if eligible.is_empty() {
        None
    } else {
        Some(eligible.iter().sum::<f64>() / eligible.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_audit(rating: f64) -> AuditRatings {
        AuditRatings {
            pos_sector: Some(rating.into()),
            mission_briefing: Some(rating.into()),
            sector_history: Some(rating.into()),
            threat_understanding: Some(rating.into()),
            appearance: Some(rating.into()),
            effort: Some(rating.into()),
            drills: Some(rating.into()),
            roe: Some(rating.into()),
            systems: Some(rating.into()),
            communication: Some(rating.into()),
            intel_tools: Some(rating.into()),
            medical: Some(rating.into()),
            ..Default::default()
        }
    }

    #[test]
    fn all_fives_score_a_hundred() {
        let score = compute_scores(&full_audit(5.0), &ScoringWeights::default());
        assert_eq!(score.overall_100, Some(100));
        assert_eq!(score.overall_avg5, Some(5.0));
        assert_eq!(score.operational_100, Some(100));
        assert_eq!(score.tech_100, Some(100));
        assert_eq!(score.intel_100, Some(100));
        assert_eq!(score.medical_100, Some(100));
    }

    #[test]
    fn all_fours_score_eighty() {
        let score = compute_scores(&full_audit(4.0), &ScoringWeights::default());
        assert_eq!(score.overall_100, Some(80));
        assert_eq!(score.overall_avg5, Some(4.0));
    }

    #[test]
    fn all_not_applicable_yields_no_score() {
        let na = || Some(Rating::Sentinel("na".to_string()));
        let audit = AuditRatings {
            pos_sector: na(),
            mission_briefing: na(),
            sector_history: na(),
            threat_understanding: na(),
            appearance: na(),
            effort: na(),
            drills: na(),
            roe: na(),
            systems: na(),
            communication: na(),
            intel_tools: na(),
            medical: na(),
            ..Default::default()
        };
        let score = compute_scores(&audit, &ScoringWeights::default());
        assert_eq!(score, ScoreBreakdown::default());
    }

    #[test]
    fn operational_only_gets_full_weight() {
        // Missing groups renormalize the weights, so the overall score must
        // equal the operational score exactly.
        let audit = AuditRatings {
            pos_sector: Some(3.0.into()),
            mission_briefing: Some(4.0.into()),
            sector_history: Some(5.0.into()),
            threat_understanding: Some(3.0.into()),
            appearance: Some(4.0.into()),
            effort: Some(5.0.into()),
            drills: Some(3.0.into()),
            roe: Some(4.0.into()),
            ..Default::default()
        };
        let score = compute_scores(&audit, &ScoringWeights::default());
        assert_eq!(score.overall_100, score.operational_100);
        assert_eq!(score.tech_100, None);
        assert_eq!(score.intel_100, None);
        assert_eq!(score.medical_100, None);
    }

    #[test]
    fn zero_ratings_are_excluded_like_sentinels() {
        let audit = AuditRatings {
            pos_sector: Some(0.0.into()),
            mission_briefing: Some(4.0.into()),
            ..Default::default()
        };
        let score = compute_scores(&audit, &ScoringWeights::default());
        // Only the single 4 counts; the zero is not averaged in.
        assert_eq!(score.operational_100, Some(80));
        assert_eq!(score.overall_100, Some(80));
    }

    #[test]
    fn partial_groups_renormalize() {
        // operational avg 4 (w 0.8), medical 2 (w 0.05):
        // (4*0.8 + 2*0.05) / 0.85 = 3.882..
        let audit = AuditRatings {
            pos_sector: Some(4.0.into()),
            medical: Some(2.0.into()),
            ..Default::default()
        };
        let score = compute_scores(&audit, &ScoringWeights::default());
        assert_eq!(score.overall_avg5, Some(3.9));
        assert_eq!(score.overall_100, Some(78));
        assert_eq!(score.medical_100, Some(40));
    }

    #[test]
    fn legacy_average_over_v1_fields() {
        let audit = AuditRatings {
            appearance: Some(4.0.into()),
            discipline: Some(5.0.into()),
            knowledge: Some(3.0.into()),
            readiness: Some(0.0.into()),
            ..Default::default()
        };
        assert_eq!(legacy_average(&audit), Some(4.0));
        assert_eq!(legacy_average(&AuditRatings::default()), None);
    }
}
