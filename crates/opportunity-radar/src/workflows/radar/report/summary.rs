use super::super::domain::{Opportunity, ScoredOpportunity};
use super::super::scoring::ScoringEngine;
use super::encoding::to_ascii_pretty;
use super::views::{AwardSignal, DeadlineSignal, RadarSummary, ScoredOpportunityView};
use crate::config::RadarConfig;
use chrono::NaiveDate;

/// Presentation policy for rendered outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Number of ranked entries highlighted as top picks.
    pub top_n: usize,
    /// Entries due within this many days get an immediate action line.
    pub urgency_window_days: i64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        RadarConfig::default().into()
    }
}

impl From<RadarConfig> for ReportOptions {
    fn from(config: RadarConfig) -> Self {
        Self {
            top_n: config.top_n,
            urgency_window_days: config.urgency_window_days,
        }
    }
}

/// A ranked run together with the policy used to present it.
#[derive(Debug, Clone)]
pub struct RadarReport<'a> {
    today: NaiveDate,
    ranked: Vec<ScoredOpportunity<'a>>,
    options: ReportOptions,
}

impl<'a> RadarReport<'a> {
    /// Wraps an already ranked list.
    pub fn new(today: NaiveDate, ranked: Vec<ScoredOpportunity<'a>>, options: ReportOptions) -> Self {
        Self {
            today,
            ranked,
            options,
        }
    }

    pub fn build(
        engine: &ScoringEngine,
        opportunities: &'a [Opportunity],
        today: NaiveDate,
        options: ReportOptions,
    ) -> Self {
        Self::new(today, engine.rank(opportunities, today), options)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    pub fn ranked(&self) -> &[ScoredOpportunity<'a>] {
        &self.ranked
    }

    pub fn top_picks(&self) -> &[ScoredOpportunity<'a>] {
        let count = self.options.top_n.min(self.ranked.len());
        &self.ranked[..count]
    }

    pub fn urgent(&self) -> impl Iterator<Item = &ScoredOpportunity<'a>> + '_ {
        let window = self.options.urgency_window_days;
        self.ranked
            .iter()
            .filter(move |scored| scored.days_until_deadline <= window)
    }

    pub fn summary(&self) -> RadarSummary {
        // Ties resolve to the earlier entry in ranking order.
        let soonest_deadline = self
            .ranked
            .iter()
            .min_by_key(|scored| scored.days_until_deadline)
            .map(|scored| DeadlineSignal {
                id: scored.opportunity.id.clone(),
                title: scored.opportunity.title.clone(),
                deadline: scored.opportunity.deadline,
                days_until_deadline: scored.days_until_deadline,
            });

        let largest_award = self
            .ranked
            .iter()
            .reduce(|best, scored| {
                if scored.opportunity.amount_usd > best.opportunity.amount_usd {
                    scored
                } else {
                    best
                }
            })
            .map(|scored| AwardSignal {
                id: scored.opportunity.id.clone(),
                title: scored.opportunity.title.clone(),
                amount_usd: scored.opportunity.amount_usd,
            });

        let total_award_usd = self
            .ranked
            .iter()
            .fold(0u64, |total, scored| {
                total.saturating_add(scored.opportunity.amount_usd)
            });

        RadarSummary {
            report_date: self.today,
            scanned: self.ranked.len(),
            top_picks: self.top_picks().len(),
            urgent: self.urgent().count(),
            urgency_window_days: self.options.urgency_window_days,
            total_award_usd,
            soonest_deadline,
            largest_award,
        }
    }

    pub fn payload(&self) -> Vec<ScoredOpportunityView> {
        self.ranked.iter().map(ScoredOpportunity::to_view).collect()
    }

    /// Pretty-printed JSON array with a two-space indent. Non-ASCII text is
    /// written as `\uXXXX` escapes.
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        to_ascii_pretty(&self.payload())
    }
}
