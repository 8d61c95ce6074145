use super::domain::{Criteria, Opportunity, ScoredOpportunity};
use super::scoring::ScoringEngine;
use chrono::NaiveDate;
use std::cmp::Ordering;

impl ScoringEngine {
    /// Scores every opportunity, drops expired ones and orders the rest by
    /// score then award amount, both descending. Full ties keep input order.
    pub fn rank<'a>(
        &self,
        opportunities: &'a [Opportunity],
        today: NaiveDate,
    ) -> Vec<ScoredOpportunity<'a>> {
        let mut ranked: Vec<ScoredOpportunity<'a>> = opportunities
            .iter()
            .filter_map(|opportunity| self.score(opportunity, today).into_scored())
            .collect();

        // `sort_by` is stable, which keeps equal entries in input order.
        ranked.sort_by(rank_order);
        ranked
    }
}

/// Ranks a collection with a one-off engine built from `criteria`.
pub fn rank<'a>(
    opportunities: &'a [Opportunity],
    criteria: &Criteria,
    today: NaiveDate,
) -> Vec<ScoredOpportunity<'a>> {
    ScoringEngine::new(criteria.clone()).rank(opportunities, today)
}

fn rank_order(left: &ScoredOpportunity<'_>, right: &ScoredOpportunity<'_>) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| {
            right
                .opportunity
                .amount_usd
                .cmp(&left.opportunity.amount_usd)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::radar::domain::{FactorWeights, OpportunityId};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
    }

    fn award_only_criteria() -> Criteria {
        Criteria {
            weights: FactorWeights {
                award: 1.0,
                deadline: 0.0,
                focus: 0.0,
                eligibility: 0.0,
            },
            min_award_usd: 10_000.0,
            deadline_window_days: 30,
            focus_priorities: vec!["STEM".to_string()],
            eligibility_keywords: vec!["undergraduate".to_string()],
        }
    }

    fn opportunity(id: &str, amount_usd: u64, days_out: i64) -> Opportunity {
        Opportunity {
            id: OpportunityId(id.to_string()),
            title: format!("{id} award"),
            sponsor: "Sponsor".to_string(),
            amount_usd,
            deadline: today() + Duration::days(days_out),
            locations: Vec::new(),
            focus_areas: Vec::new(),
            eligibility: String::new(),
            url: format!("https://example.org/{id}"),
        }
    }

    fn ids(ranked: &[ScoredOpportunity<'_>]) -> Vec<String> {
        ranked
            .iter()
            .map(|scored| scored.opportunity.id.0.clone())
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank(&[], &award_only_criteria(), today()).is_empty());
    }

    #[test]
    fn expired_entries_are_excluded() {
        let opportunities = vec![
            opportunity("past", 90_000, -3),
            opportunity("open", 1_000, 3),
        ];

        let ranked = rank(&opportunities, &award_only_criteria(), today());
        assert_eq!(ids(&ranked), ["open"]);
    }

    #[test]
    fn orders_by_score_descending() {
        let opportunities = vec![
            opportunity("small", 2_000, 5),
            opportunity("large", 15_000, 5),
            opportunity("medium", 8_000, 5),
        ];

        let ranked = rank(&opportunities, &award_only_criteria(), today());
        assert_eq!(ids(&ranked), ["large", "medium", "small"]);
    }

    #[test]
    fn equal_scores_prefer_larger_awards() {
        // Both cap the award factor at 1.0.
        let opportunities = vec![
            opportunity("capped-low", 20_000, 5),
            opportunity("capped-high", 60_000, 5),
        ];

        let ranked = rank(&opportunities, &award_only_criteria(), today());
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ids(&ranked), ["capped-high", "capped-low"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let opportunities = vec![
            opportunity("first", 5_000, 5),
            opportunity("second", 5_000, 9),
            opportunity("third", 5_000, 2),
        ];

        let ranked = rank(&opportunities, &award_only_criteria(), today());
        assert_eq!(ids(&ranked), ["first", "second", "third"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let opportunities = vec![
            opportunity("a", 7_500, 4),
            opportunity("b", 12_000, 40),
            opportunity("c", 7_500, 1),
        ];
        let engine = ScoringEngine::new(award_only_criteria());

        assert_eq!(
            engine.rank(&opportunities, today()),
            engine.rank(&opportunities, today())
        );
    }
}
