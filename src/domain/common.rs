use chrono::NaiveDate;

/// Entities carrying a calendar date that may or may not parse.
pub trait Dated {
    /// Raw date text as received from the source.
    fn raw_date(&self) -> &str;

    /// Parsed calendar date, or `None` when the raw text is not a valid date.
    fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(self.raw_date())
    }
}

/// Exposes the string fields a free-text search looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match over every search field.
    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses the date forms the record sources emit: `YYYY-MM-DD`, an RFC 3339
/// timestamp, or a timestamp without offset. Only the calendar day is kept.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| chrono::NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
}
