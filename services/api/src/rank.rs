use chrono::{Local, NaiveDate};
use clap::Args;
use opportunity_radar::config::{AppConfig, RadarConfig};
use opportunity_radar::error::AppError;
use opportunity_radar::telemetry;
use opportunity_radar::workflows::radar::dates::parse_date;
use opportunity_radar::workflows::radar::{
    CriteriaLoader, OpportunityLoader, RadarReport, ReportOptions, ScoringEngine,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Path to the opportunities JSON file
    #[arg(long, default_value = "data/sample_opportunities.json")]
    pub(crate) opportunities: PathBuf,
    /// Path to the criteria JSON file
    #[arg(long, default_value = "data/criteria.json")]
    pub(crate) criteria: PathBuf,
    /// Number of top opportunities to highlight (defaults to RADAR_TOP_N or 3)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Urgency window for immediate actions in days (defaults to RADAR_URGENCY_DAYS or 14)
    #[arg(long)]
    pub(crate) urgency_days: Option<i64>,
    /// Output markdown report path
    #[arg(long, default_value = "outputs/radar_report.md")]
    pub(crate) output: PathBuf,
    /// Output JSON path
    #[arg(long, default_value = "outputs/radar_scored.json")]
    pub(crate) json_output: PathBuf,
    /// Optional CSV export of the ranked pipeline
    #[arg(long)]
    pub(crate) csv_output: Option<PathBuf>,
    /// Optional ICS calendar of ranked deadlines
    #[arg(long)]
    pub(crate) calendar_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    Report,
    Scored,
    Pipeline,
    Calendar,
}

impl OutputKind {
    const fn label(self) -> &'static str {
        match self {
            OutputKind::Report => "report",
            OutputKind::Scored => "scored opportunities",
            OutputKind::Pipeline => "pipeline CSV",
            OutputKind::Calendar => "deadline calendar",
        }
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    for (kind, path) in execute(&args, config.radar)? {
        println!("Wrote {} to {}", kind.label(), path.display());
    }

    Ok(())
}

pub(crate) fn execute(
    args: &RankArgs,
    defaults: RadarConfig,
) -> Result<Vec<(OutputKind, PathBuf)>, AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let opportunities = OpportunityLoader::from_path(&args.opportunities)?;
    let criteria = CriteriaLoader::from_path(&args.criteria)?;

    let options = ReportOptions {
        top_n: args.top.unwrap_or(defaults.top_n),
        urgency_window_days: args.urgency_days.unwrap_or(defaults.urgency_window_days),
    };
    let engine = ScoringEngine::new(criteria);
    let report = RadarReport::build(&engine, &opportunities, today, options);

    info!(
        %today,
        scanned = opportunities.len(),
        ranked = report.ranked().len(),
        top_n = options.top_n,
        "ranked opportunities"
    );

    let mut written = Vec::new();
    write_output(&args.output, &report.markdown())?;
    written.push((OutputKind::Report, args.output.clone()));

    write_output(&args.json_output, &report.payload_json()?)?;
    written.push((OutputKind::Scored, args.json_output.clone()));

    if let Some(path) = &args.csv_output {
        write_output(path, &report.csv()?)?;
        written.push((OutputKind::Pipeline, path.clone()));
    }

    if let Some(path) = &args.calendar_output {
        write_output(path, &report.calendar())?;
        written.push((OutputKind::Calendar, path.clone()));
    }

    Ok(written)
}

fn write_output(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::write(parent, source))?;
    }
    fs::write(path, contents).map_err(|source| AppError::write(path, source))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_radar::workflows::radar::RadarLoadError;
    use serde_json::Value;

    const OPPORTUNITIES: &str = include_str!("../../../data/sample_opportunities.json");
    const CRITERIA: &str = include_str!("../../../data/criteria.json");

    fn args_in(dir: &Path) -> RankArgs {
        let opportunities = dir.join("opportunities.json");
        let criteria = dir.join("criteria.json");
        fs::write(&opportunities, OPPORTUNITIES).expect("write opportunities");
        fs::write(&criteria, CRITERIA).expect("write criteria");

        RankArgs {
            opportunities,
            criteria,
            top: None,
            today: NaiveDate::from_ymd_opt(2025, 10, 1),
            urgency_days: None,
            output: dir.join("nested/outputs/radar_report.md"),
            json_output: dir.join("nested/outputs/radar_scored.json"),
            csv_output: None,
            calendar_output: None,
        }
    }

    #[test]
    fn writes_report_and_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = args_in(dir.path());

        let written = execute(&args, RadarConfig::default()).expect("rank succeeds");

        assert_eq!(
            written.iter().map(|(kind, _)| *kind).collect::<Vec<_>>(),
            [OutputKind::Report, OutputKind::Scored]
        );
        let markdown = fs::read_to_string(&args.output).expect("report written");
        assert!(markdown.starts_with("# Group Scholar Opportunity Radar\n\nReport date: 2025-10-01"));
        assert!(markdown.contains("- High-priority picks: 3"));

        let payload: Value =
            serde_json::from_str(&fs::read_to_string(&args.json_output).expect("json written"))
                .expect("valid json");
        assert_eq!(payload.as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn flags_override_configured_policy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = args_in(dir.path());
        args.top = Some(1);
        args.urgency_days = Some(7);

        execute(&args, RadarConfig::default()).expect("rank succeeds");

        let markdown = fs::read_to_string(&args.output).expect("report written");
        assert!(markdown.contains("- High-priority picks: 1"));
        assert!(markdown.contains("- Deadlines within 7 days: 2"));
    }

    #[test]
    fn optional_exports_are_written_when_requested() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = args_in(dir.path());
        args.csv_output = Some(dir.path().join("exports/pipeline.csv"));
        args.calendar_output = Some(dir.path().join("exports/deadlines.ics"));

        let written = execute(&args, RadarConfig::default()).expect("rank succeeds");

        assert_eq!(written.len(), 4);
        let csv = fs::read_to_string(dir.path().join("exports/pipeline.csv")).expect("csv");
        assert!(csv.starts_with("rank,id,title,sponsor,amount_usd"));
        let calendar =
            fs::read_to_string(dir.path().join("exports/deadlines.ics")).expect("calendar");
        assert!(calendar.starts_with("BEGIN:VCALENDAR\r\n"));
    }

    #[test]
    fn missing_input_fails_with_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = args_in(dir.path());
        args.opportunities = dir.path().join("absent.json");

        let err = execute(&args, RadarConfig::default()).expect_err("missing file fails");

        assert!(matches!(err, AppError::Load(RadarLoadError::Io { .. })));
        assert!(err.to_string().contains("absent.json"));
        assert!(!args.output.exists());
    }
}
