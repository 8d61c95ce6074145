mod rules;

use super::domain::{
    round_score, Applicability, Criteria, Opportunity, ScoreBreakdown, ScoredOpportunity,
};
use chrono::NaiveDate;

/// Stateless scorer that applies one criteria profile to opportunities.
///
/// Focus priorities and eligibility keywords are lower-cased once here rather
/// than for every opportunity.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    criteria: Criteria,
    focus_keys: Vec<String>,
    eligibility_keys: Vec<String>,
}

impl ScoringEngine {
    pub fn new(criteria: Criteria) -> Self {
        let focus_keys = lowercase_all(&criteria.focus_priorities);
        let eligibility_keys = lowercase_all(&criteria.eligibility_keywords);

        Self {
            criteria,
            focus_keys,
            eligibility_keys,
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Scores one opportunity, or reports it as expired when its deadline is
    /// before `today`.
    pub fn score<'a>(&self, opportunity: &'a Opportunity, today: NaiveDate) -> Applicability<'a> {
        if opportunity.is_expired(today) {
            return Applicability::Expired;
        }

        let days_until = opportunity.days_until_deadline(today);
        let breakdown = ScoreBreakdown {
            award: rules::award_score(opportunity.amount_usd, self.criteria.min_award_usd),
            deadline: rules::deadline_score(days_until, self.criteria.deadline_window_days),
            focus: rules::focus_score(&opportunity.focus_areas, &self.focus_keys),
            eligibility: rules::eligibility_score(
                &opportunity.eligibility,
                &self.eligibility_keys,
            ),
        };

        // Aggregate before rounding the breakdown.
        let total = breakdown.weighted_total(&self.criteria.weights);

        Applicability::Applicable(ScoredOpportunity {
            opportunity,
            score: round_score(total),
            score_breakdown: breakdown.rounded(),
            days_until_deadline: days_until,
        })
    }
}

/// Convenience wrapper for scoring a single opportunity without keeping an engine.
pub fn score<'a>(
    opportunity: &'a Opportunity,
    criteria: &Criteria,
    today: NaiveDate,
) -> Applicability<'a> {
    ScoringEngine::new(criteria.clone()).score(opportunity, today)
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|value| value.to_lowercase()).collect()
}
