use super::domain::{Criteria, Opportunity};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RadarLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {kind} data in {origin}: {source}")]
    Parse {
        kind: &'static str,
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the opportunity list from a JSON array.
pub struct OpportunityLoader;

impl OpportunityLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Opportunity>, RadarLoadError> {
        let path = path.as_ref();
        let opportunities: Vec<Opportunity> = read_json(path, "opportunity")?;
        info!(path = %path.display(), count = opportunities.len(), "loaded opportunities");
        Ok(opportunities)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Opportunity>, RadarLoadError> {
        parse_json(reader, "opportunity", "input")
    }

    /// Decodes records already parsed as JSON, such as a request body field.
    pub fn from_value(value: Value) -> Result<Vec<Opportunity>, RadarLoadError> {
        parse_value(value, "opportunity")
    }
}

/// Reads the single criteria profile for a run.
pub struct CriteriaLoader;

impl CriteriaLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Criteria, RadarLoadError> {
        let path = path.as_ref();
        let criteria: Criteria = read_json(path, "criteria")?;
        info!(
            path = %path.display(),
            focus_priorities = criteria.focus_priorities.len(),
            eligibility_keywords = criteria.eligibility_keywords.len(),
            "loaded criteria"
        );
        Ok(criteria)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Criteria, RadarLoadError> {
        parse_json(reader, "criteria", "input")
    }

    pub fn from_value(value: Value) -> Result<Criteria, RadarLoadError> {
        parse_value(value, "criteria")
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: &'static str) -> Result<T, RadarLoadError> {
    let file = std::fs::File::open(path).map_err(|source| RadarLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(
        std::io::BufReader::new(file),
        kind,
        &path.display().to_string(),
    )
}

fn parse_json<T: DeserializeOwned, R: Read>(
    reader: R,
    kind: &'static str,
    origin: &str,
) -> Result<T, RadarLoadError> {
    serde_json::from_reader(reader).map_err(|source| RadarLoadError::Parse {
        kind,
        origin: origin.to_string(),
        source,
    })
}

fn parse_value<T: DeserializeOwned>(
    value: Value,
    kind: &'static str,
) -> Result<T, RadarLoadError> {
    serde_json::from_value(value).map_err(|source| RadarLoadError::Parse {
        kind,
        origin: "request body".to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const RECORD: &str = r#"[{
        "id": "stem-futures",
        "title": "STEM Futures Scholarship",
        "sponsor": "Midwest STEM Alliance",
        "amount_usd": 5000,
        "deadline": "2025-10-11",
        "locations": ["Iowa", "Remote"],
        "focus_areas": ["STEM"],
        "eligibility": "Undergraduate students",
        "url": "https://example.org/stem"
    }]"#;

    #[test]
    fn parses_opportunity_records() {
        let opportunities = OpportunityLoader::from_reader(RECORD.as_bytes()).expect("parses");

        assert_eq!(opportunities.len(), 1);
        let record = &opportunities[0];
        assert_eq!(record.id.0, "stem-futures");
        assert_eq!(record.amount_usd, 5_000);
        assert_eq!(
            record.deadline,
            NaiveDate::from_ymd_opt(2025, 10, 11).expect("valid")
        );
        assert_eq!(record.locations, ["Iowa", "Remote"]);
    }

    #[test]
    fn missing_fields_are_named() {
        let raw = RECORD.replace(r#""sponsor": "Midwest STEM Alliance","#, "");
        let err = OpportunityLoader::from_reader(raw.as_bytes()).expect_err("sponsor required");

        let message = err.to_string();
        assert!(message.contains("missing field `sponsor`"), "{message}");
        assert!(message.starts_with("invalid opportunity data in input"));
    }

    #[test]
    fn malformed_deadlines_are_rejected() {
        let raw = RECORD.replace("2025-10-11", "10/11/2025");
        let err = OpportunityLoader::from_reader(raw.as_bytes()).expect_err("bad date");

        assert!(err.to_string().contains("as YYYY-MM-DD"));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let raw = RECORD.replace("5000", "-5000");
        assert!(OpportunityLoader::from_reader(raw.as_bytes()).is_err());
    }

    #[test]
    fn parses_criteria_profile() {
        let raw = r#"{
            "weights": {"award": 0.35, "deadline": 0.25, "focus": 0.25, "eligibility": 0.15},
            "min_award_usd": 2500,
            "deadline_window_days": 45,
            "focus_priorities": ["STEM", "Community Service"],
            "eligibility_keywords": ["undergraduate"]
        }"#;

        let criteria = CriteriaLoader::from_reader(raw.as_bytes()).expect("parses");
        assert_eq!(criteria.weights.award, 0.35);
        assert_eq!(criteria.min_award_usd, 2_500.0);
        assert_eq!(criteria.deadline_window_days, 45);
        assert_eq!(criteria.focus_priorities.len(), 2);
    }

    #[test]
    fn criteria_require_every_weight() {
        let raw = r#"{
            "weights": {"award": 0.5, "deadline": 0.5, "focus": 0.0},
            "min_award_usd": 2500,
            "deadline_window_days": 45,
            "focus_priorities": [],
            "eligibility_keywords": []
        }"#;

        let err = CriteriaLoader::from_reader(raw.as_bytes()).expect_err("weight missing");
        assert!(err.to_string().contains("missing field `eligibility`"));
    }

    #[test]
    fn decodes_records_from_parsed_values() {
        let value: Value = serde_json::from_str(RECORD).expect("valid json");
        let opportunities = OpportunityLoader::from_value(value).expect("decodes");
        assert_eq!(opportunities[0].sponsor, "Midwest STEM Alliance");

        let err = OpportunityLoader::from_value(serde_json::json!({"id": "x"}))
            .expect_err("object is not a list");
        assert!(err
            .to_string()
            .starts_with("invalid opportunity data in request body"));
    }

    #[test]
    fn unreadable_paths_report_the_path() {
        let err = OpportunityLoader::from_path("does/not/exist.json").expect_err("missing file");

        match &err {
            RadarLoadError::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.json")),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
