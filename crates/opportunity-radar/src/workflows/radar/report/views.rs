use super::super::domain::{OpportunityId, ScoreBreakdown, ScoredOpportunity};
use chrono::NaiveDate;
use serde::Serialize;

/// Machine-readable record: every opportunity field plus the derived score fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOpportunityView {
    pub id: OpportunityId,
    pub title: String,
    pub sponsor: String,
    pub amount_usd: u64,
    pub deadline: NaiveDate,
    pub locations: Vec<String>,
    pub focus_areas: Vec<String>,
    pub eligibility: String,
    pub url: String,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub days_until_deadline: i64,
}

impl ScoredOpportunity<'_> {
    pub fn to_view(&self) -> ScoredOpportunityView {
        let opportunity = self.opportunity;
        ScoredOpportunityView {
            id: opportunity.id.clone(),
            title: opportunity.title.clone(),
            sponsor: opportunity.sponsor.clone(),
            amount_usd: opportunity.amount_usd,
            deadline: opportunity.deadline,
            locations: opportunity.locations.clone(),
            focus_areas: opportunity.focus_areas.clone(),
            eligibility: opportunity.eligibility.clone(),
            url: opportunity.url.clone(),
            score: self.score,
            score_breakdown: self.score_breakdown,
            days_until_deadline: self.days_until_deadline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineSignal {
    pub id: OpportunityId,
    pub title: String,
    pub deadline: NaiveDate,
    pub days_until_deadline: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardSignal {
    pub id: OpportunityId,
    pub title: String,
    pub amount_usd: u64,
}

/// Snapshot counters and headline signals for one ranked run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSummary {
    pub report_date: NaiveDate,
    pub scanned: usize,
    pub top_picks: usize,
    pub urgent: usize,
    pub urgency_window_days: i64,
    pub total_award_usd: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soonest_deadline: Option<DeadlineSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_award: Option<AwardSignal>,
}
