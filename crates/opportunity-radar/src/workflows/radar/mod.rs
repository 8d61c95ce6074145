//! Scholarship and grant ranking against a strategic-fit criteria profile.

pub mod dates;
pub mod domain;
mod loader;
mod ranking;
pub mod report;
mod scoring;

pub use domain::{
    Applicability, Criteria, FactorWeights, Opportunity, OpportunityId, ScoreBreakdown,
    ScoreFactor, ScoredOpportunity,
};
pub use loader::{CriteriaLoader, OpportunityLoader, RadarLoadError};
pub use ranking::rank;
pub use report::{RadarReport, RadarSummary, ReportOptions, ScoredOpportunityView};
pub use scoring::{score, ScoringEngine};
