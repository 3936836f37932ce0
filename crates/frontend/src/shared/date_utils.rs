//! Форматирование дат для отображения (дд.мм.гггг)

/// "2026-03-15T14:02:26.123Z" -> "15.03.2026 14:02"
pub fn format_datetime(iso: &str) -> String {
    let mut parts = iso.splitn(2, 'T');
    let date_part = parts.next().unwrap_or(iso);
    let time_part = parts.next().unwrap_or("");

    let date = format_date(date_part);
    if date == date_part && time_part.is_empty() {
        return iso.to_string();
    }

    let hhmm: String = time_part.chars().take(5).collect();
    if hhmm.len() == 5 {
        format!("{} {}", date, hhmm)
    } else {
        date
    }
}

/// "2026-03-15" (или ISO с временем) -> "15.03.2026"
pub fn format_date(iso: &str) -> String {
    let date_part = iso.split('T').next().unwrap_or(iso);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            if !day.is_empty() && !month.is_empty() && !year.is_empty() {
                return format!("{}.{}.{}", day, month, year);
            }
        }
    }
    iso.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2026-03-15T14:02:26.123Z"),
            "15.03.2026 14:02"
        );
        assert_eq!(format_datetime("2026-12-31T23:59:59Z"), "31.12.2026 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-15"), "15.03.2026");
        assert_eq!(format_date("2026-03-15T14:02:26.123Z"), "15.03.2026");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
