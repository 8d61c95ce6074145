use super::markdown::{format_currency, format_score};
use super::summary::RadarReport;
use serde::Serialize;

const CALENDAR_PRODID: &str = "-//Group Scholar//Opportunity Radar//EN";
const CALENDAR_UID_DOMAIN: &str = "opportunity-radar";

#[derive(Debug, Serialize)]
struct PipelineRow<'r> {
    rank: usize,
    id: &'r str,
    title: &'r str,
    sponsor: &'r str,
    amount_usd: u64,
    deadline: String,
    days_until_deadline: i64,
    score: f64,
    award_score: f64,
    deadline_score: f64,
    focus_score: f64,
    eligibility_score: f64,
    locations: String,
    focus_areas: String,
    url: &'r str,
}

impl RadarReport<'_> {
    /// Ranked pipeline as CSV with a header row; list columns are joined with `; `.
    pub fn csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        for (index, item) in self.ranked().iter().enumerate() {
            let opportunity = item.opportunity;
            writer.serialize(PipelineRow {
                rank: index + 1,
                id: &opportunity.id.0,
                title: &opportunity.title,
                sponsor: &opportunity.sponsor,
                amount_usd: opportunity.amount_usd,
                deadline: opportunity.deadline.to_string(),
                days_until_deadline: item.days_until_deadline,
                score: item.score,
                award_score: item.score_breakdown.award,
                deadline_score: item.score_breakdown.deadline,
                focus_score: item.score_breakdown.focus,
                eligibility_score: item.score_breakdown.eligibility,
                locations: opportunity.locations.join("; "),
                focus_areas: opportunity.focus_areas.join("; "),
                url: &opportunity.url,
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        String::from_utf8(bytes).map_err(|err| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })
    }

    /// Deadline calendar (RFC 5545) with one all-day event per ranked entry.
    pub fn calendar(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{CALENDAR_PRODID}"),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
        ];

        for item in self.ranked() {
            let opportunity = item.opportunity;
            let start = opportunity.deadline;
            let end = start.succ_opt().unwrap_or(start);

            let mut description = vec![
                format!("Sponsor: {}", opportunity.sponsor),
                format!("Amount: {}", format_currency(opportunity.amount_usd)),
                format!("Score: {}", format_score(item.score)),
            ];
            if !opportunity.focus_areas.is_empty() {
                description.push(format!("Focus: {}", opportunity.focus_areas.join(", ")));
            }
            if !opportunity.url.is_empty() {
                description.push(format!("Link: {}", opportunity.url));
            }

            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!(
                "UID:{}@{CALENDAR_UID_DOMAIN}",
                escape_text(&opportunity.id.0)
            ));
            lines.push(format!(
                "SUMMARY:{}",
                escape_text(&format!("{} ({})", opportunity.title, opportunity.sponsor))
            ));
            lines.push(format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")));
            lines.push(format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
            lines.push(format!(
                "DESCRIPTION:{}",
                escape_text(&description.join("\n"))
            ));
            lines.push("END:VEVENT".to_string());
        }

        lines.push("END:VCALENDAR".to_string());
        lines.join("\r\n")
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
