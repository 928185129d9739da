//! Date line formatting.

/// Text shown in the preview while no date has been picked.
///
/// Preview only: exported frames omit the date line instead.
pub const DATE_PLACEHOLDER: &str = "Select a date";

/// Reformat an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// This is a pure string reformat: the input is split on `-` and the first
/// three parts are re-joined as `day/month/year`. Calendar validity is not
/// checked. Returns `None` for an empty string or one with fewer than three
/// parts, which the renderer treats as "no date".
pub fn format_date(iso: &str) -> Option<String> {
    if iso.is_empty() {
        return None;
    }

    let mut parts = iso.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => Some(format!("{day}/{month}/{year}")),
        _ => {
            log::warn!("ignoring date without year-month-day parts: {iso:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_date("2024-03-07").as_deref(), Some("07/03/2024"));
        assert_eq!(format_date("2024-01-01").as_deref(), Some("01/01/2024"));
    }

    #[test]
    fn test_empty_date_is_none() {
        assert_eq!(format_date(""), None);
    }

    #[test]
    fn test_parts_are_not_validated() {
        assert_eq!(format_date("99-13-40").as_deref(), Some("40/13/99"));
    }

    #[test]
    fn test_extra_parts_are_dropped() {
        assert_eq!(format_date("2024-05-06-extra").as_deref(), Some("06/05/2024"));
    }

    #[test]
    fn test_too_few_parts_is_none() {
        assert_eq!(format_date("2024-05"), None);
        assert_eq!(format_date("yesterday"), None);
    }
}
