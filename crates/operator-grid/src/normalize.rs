// File: operator-grid/src/normalize.rs
// Purpose: Kind-agnostic value helpers (phones, blanks, numbers, timestamps)

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Canonicalize a phone number to bare digits with country code `7`.
///
/// All non-digit characters are dropped, then a leading trunk prefix `8`
/// (or a stray `07`) becomes `7`. Applying it twice changes nothing.
///
/// ```
/// use operator_grid::normalize::normalize_phone;
///
/// assert_eq!(normalize_phone("+7 (916) 123-45-67"), "79161234567");
/// assert_eq!(normalize_phone("89161234567"), "79161234567");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("07") {
        return format!("7{}", rest);
    }
    if let Some(rest) = digits.strip_prefix('8') {
        return format!("7{}", rest);
    }
    digits
}

/// Display form of a stored phone: the `+` stripped by normalization comes back.
pub fn display_phone(stored: &str) -> String {
    let stored = stored.trim();
    if stored.is_empty() || stored.starts_with('+') {
        stored.to_string()
    } else {
        format!("+{}", stored)
    }
}

/// True iff the trimmed string is empty
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse a server-assigned numeric identifier out of a form value
pub fn coerce_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Flatten a JSON scalar into the string the grid keeps in its cells.
pub fn json_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        // Nested values have no cell representation; keep them readable in logs
        other => other.to_string(),
    }
}

/// Interpret a cell value as a flag (`true`, `1`, `yes`)
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Render server timestamps (RFC 3339, RFC 2822 or naive ISO) uniformly.
/// Unrecognized input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format(DISPLAY_TIMESTAMP).to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return ts.format(DISPLAY_TIMESTAMP).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DISPLAY_TIMESTAMP).to_string();
    }
    raw.to_string()
}
