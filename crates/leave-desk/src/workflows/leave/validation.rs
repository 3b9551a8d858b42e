use chrono::NaiveDate;

/// Input validation failures. Always correctable by the caller; never
/// retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("user email must be a valid email address")]
    InvalidEmail,
    #[error("{label} must be in YYYY-MM-DD format")]
    MalformedDate { label: &'static str },
    #[error("end date must be on or after start date")]
    EndBeforeStart,
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain, no
/// whitespace. Deliverability is not our problem.
pub fn validate_email(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
        && !trimmed.contains(char::is_whitespace);

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Strict `YYYY-MM-DD` parse. Shape-valid strings that are not real calendar
/// dates (2025-02-30) are rejected here rather than allowed to propagate.
pub fn parse_date(label: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if !matches_date_shape(trimmed) {
        return Err(ValidationError::MalformedDate { label });
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate { label })
}

/// Parse a date that may carry a time component on the wire. Everything from
/// the first `T` onward is dropped before the strict parse, so stored and
/// incoming values compare on the calendar date alone.
pub fn normalize_date(label: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let date_part = raw.trim().split('T').next().unwrap_or_default();
    parse_date(label, date_part)
}

/// Cross-field rule shared by create and transition: the range must not end
/// before it starts. Same-day requests are allowed.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok(())
}

fn matches_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| matches!(index, 4 | 7) || byte.is_ascii_digit())
}
