use super::dates::deserialize_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for opportunity records. Not deduplicated on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpportunityId(pub String);

/// A single scholarship or grant offer as supplied by the opportunity source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    pub sponsor: String,
    pub amount_usd: u64,
    #[serde(deserialize_with = "deserialize_date")]
    pub deadline: NaiveDate,
    pub locations: Vec<String>,
    pub focus_areas: Vec<String>,
    pub eligibility: String,
    pub url: String,
}

impl Opportunity {
    /// Signed day count from `today` to the deadline.
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.deadline < today
    }
}

/// Weighted-scoring configuration applied uniformly to every opportunity in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub weights: FactorWeights,
    pub min_award_usd: f64,
    pub deadline_window_days: u32,
    pub focus_priorities: Vec<String>,
    pub eligibility_keywords: Vec<String>,
}

/// Per-factor multipliers. They are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub award: f64,
    pub deadline: f64,
    pub focus: f64,
    pub eligibility: f64,
}

impl FactorWeights {
    pub const fn weight(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::Award => self.award,
            ScoreFactor::Deadline => self.deadline,
            ScoreFactor::Focus => self.focus,
            ScoreFactor::Eligibility => self.eligibility,
        }
    }
}

/// The four independent fitness factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Award,
    Deadline,
    Focus,
    Eligibility,
}

impl ScoreFactor {
    pub const fn ordered() -> [Self; 4] {
        [Self::Award, Self::Deadline, Self::Focus, Self::Eligibility]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Award => "award",
            Self::Deadline => "deadline",
            Self::Focus => "focus",
            Self::Eligibility => "eligibility",
        }
    }
}

/// Normalized sub-scores, each within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub award: f64,
    pub deadline: f64,
    pub focus: f64,
    pub eligibility: f64,
}

impl ScoreBreakdown {
    pub const fn get(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::Award => self.award,
            ScoreFactor::Deadline => self.deadline,
            ScoreFactor::Focus => self.focus,
            ScoreFactor::Eligibility => self.eligibility,
        }
    }

    pub fn weighted_total(&self, weights: &FactorWeights) -> f64 {
        ScoreFactor::ordered()
            .into_iter()
            .map(|factor| self.get(factor) * weights.weight(factor))
            .sum()
    }

    pub fn rounded(&self) -> Self {
        Self {
            award: round_score(self.award),
            deadline: round_score(self.deadline),
            focus: round_score(self.focus),
            eligibility: round_score(self.eligibility),
        }
    }
}

/// An applicable opportunity with its explainable score for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOpportunity<'a> {
    pub opportunity: &'a Opportunity,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub days_until_deadline: i64,
}

/// Result of scoring a single opportunity against a reference date.
#[derive(Debug, Clone, PartialEq)]
pub enum Applicability<'a> {
    Applicable(ScoredOpportunity<'a>),
    Expired,
}

impl<'a> Applicability<'a> {
    pub fn into_scored(self) -> Option<ScoredOpportunity<'a>> {
        match self {
            Applicability::Applicable(scored) => Some(scored),
            Applicability::Expired => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Applicability::Expired)
    }
}

/// Rounds to three decimal places for presentation.
///
/// Rounds the exact binary value, with ties going to the even digit
/// (`0.0625` becomes `0.062`).
pub fn round_score(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}
