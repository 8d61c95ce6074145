mod encoding;
mod export;
mod markdown;
mod summary;
pub mod views;

pub use summary::{RadarReport, ReportOptions};
pub use views::{AwardSignal, DeadlineSignal, RadarSummary, ScoredOpportunityView};
