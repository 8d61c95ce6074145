use chrono::NaiveDate;
use serde::Deserialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_with_whitespace() {
        let date = parse_date(" 2025-10-01 ").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid"));
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        let err = parse_date("2025-02-30").expect_err("february 30th rejected");
        assert!(err.contains("2025-02-30"));
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_date("10/01/2025").is_err());
    }
}
