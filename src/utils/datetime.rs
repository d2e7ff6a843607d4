use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Format des dates exposées par l'API (ex: 2025-10-21 13:51:08)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Heure locale courante, sans fuseau (colonnes TIMESTAMP WITHOUT TIME ZONE)
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Horodatage des réponses d'erreur/confirmation
pub fn timestamp() -> String {
    format_datetime(&now())
}

/// Parse une date d'échéance envoyée par le client
/// Formats acceptés: "2025-10-21 13:51:08", "2025-10-21T13:51:08", RFC 3339, "2025-10-21"
pub fn parse_due_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    for format in [DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_api_format() {
        let parsed = parse_due_date("2025-10-28 09:30:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2025-10-28 09:30:00");
    }

    #[test]
    fn parses_iso_and_date_only() {
        let iso = parse_due_date("2025-10-28T09:30:00").unwrap();
        assert_eq!((iso.hour(), iso.minute()), (9, 30));

        let date_only = parse_due_date("2025-12-01").unwrap();
        assert_eq!((date_only.month(), date_only.day(), date_only.hour()), (12, 1, 0));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert!(parse_due_date("2025-10-28T09:30:00+02:00").is_some());
        assert!(parse_due_date("2025-10-28T09:30:00Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_due_date("demain").is_none());
        assert!(parse_due_date("").is_none());
        assert!(parse_due_date("2025-13-45").is_none());
    }
}
