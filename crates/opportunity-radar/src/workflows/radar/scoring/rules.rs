//! Individual factor rules. Every rule returns a value within `[0, 1]`.

/// Award amounts are compared against the floor and capped at twice the floor.
pub(crate) fn award_score(amount_usd: u64, min_award_usd: f64) -> f64 {
    let ratio = amount_usd as f64 / min_award_usd.max(1.0);
    ratio.min(2.0) / 2.0
}

/// Linear ramp: due today scores 1.0, due at or past the window edge scores 0.0.
pub(crate) fn deadline_score(days_until: i64, window_days: u32) -> f64 {
    let window = i64::from(window_days);
    if days_until <= 0 {
        1.0
    } else if days_until > window {
        0.0
    } else {
        (window - days_until) as f64 / window as f64
    }
}

/// Counts every opportunity-side label that equals a priority, repeats included.
/// `priorities` must already be lower-cased.
pub(crate) fn focus_score(focus_areas: &[String], priorities: &[String]) -> f64 {
    let hits = focus_areas
        .iter()
        .filter(|focus| {
            let focus = focus.to_lowercase();
            priorities.iter().any(|priority| *priority == focus)
        })
        .count();
    coverage(hits, priorities.len())
}

/// Counts keywords contained in the eligibility text. `keywords` must already be lower-cased.
pub(crate) fn eligibility_score(eligibility: &str, keywords: &[String]) -> f64 {
    let text = eligibility.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count();
    coverage(hits, keywords.len())
}

fn coverage(hits: usize, total: usize) -> f64 {
    (hits as f64 / total.max(1) as f64).min(1.0)
}
