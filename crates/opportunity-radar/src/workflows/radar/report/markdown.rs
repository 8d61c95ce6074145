use super::summary::RadarReport;

impl RadarReport<'_> {
    /// Human-readable report. Lines are joined with `\n` without a trailing newline.
    pub fn markdown(&self) -> String {
        let summary = self.summary();
        let mut lines = vec![
            "# Group Scholar Opportunity Radar".to_string(),
            String::new(),
            format!("Report date: {}", self.today()),
            String::new(),
            "## Snapshot".to_string(),
            format!("- Opportunities scanned: {}", summary.scanned),
            format!("- High-priority picks: {}", summary.top_picks),
            format!(
                "- Deadlines within {} days: {}",
                summary.urgency_window_days, summary.urgent
            ),
            String::new(),
            "## Top Picks".to_string(),
        ];

        for item in self.top_picks() {
            let opportunity = item.opportunity;
            let breakdown = &item.score_breakdown;
            lines.push(format!("### {}", opportunity.title));
            lines.push(format!("- Sponsor: {}", opportunity.sponsor));
            lines.push(format!(
                "- Amount: {}",
                format_currency(opportunity.amount_usd)
            ));
            lines.push(format!(
                "- Deadline: {} ({} days)",
                opportunity.deadline, item.days_until_deadline
            ));
            lines.push(format!("- Focus: {}", opportunity.focus_areas.join(", ")));
            lines.push(format!(
                "- Score: {} (award {}, deadline {}, focus {}, eligibility {})",
                format_score(item.score),
                format_score(breakdown.award),
                format_score(breakdown.deadline),
                format_score(breakdown.focus),
                format_score(breakdown.eligibility)
            ));
            lines.push(format!("- Link: {}", opportunity.url));
            lines.push(String::new());
        }

        lines.push("## Pipeline".to_string());
        lines.push("| Opportunity | Amount | Deadline | Score |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for item in self.ranked() {
            let opportunity = item.opportunity;
            lines.push(format!(
                "| {} | {} | {} | {} |",
                opportunity.title,
                format_currency(opportunity.amount_usd),
                opportunity.deadline,
                format_score(item.score)
            ));
        }

        let mut urgent = self.urgent().peekable();
        if urgent.peek().is_some() {
            lines.push(String::new());
            lines.push("## Immediate Actions".to_string());
            lines.push(String::new());
            for item in urgent {
                lines.push(format!(
                    "- Prep submission materials for {} (deadline {}, {} days).",
                    item.opportunity.title, item.opportunity.deadline, item.days_until_deadline
                ));
            }
        }

        lines.join("\n")
    }
}

/// Whole dollars with thousands separators, e.g. `$12,500`.
pub(crate) fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

/// Scores always carry a decimal point so whole values read `1.0` rather than `1`.
pub(crate) fn format_score(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
