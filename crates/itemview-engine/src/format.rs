use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use itemview_types::{DisplayType, FieldType, ItemValue};
use serde::Serialize;
use serde_json::Value;

/// Cell text for one item value, plus the relative-age annotation shown
/// under date-like values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCell {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_since: Option<String>,
}

impl FormattedCell {
    fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            time_since: None,
        }
    }
}

pub fn format_cell(
    value: &ItemValue,
    display: DisplayType,
    field_type: &FieldType,
    now: DateTime<Utc>,
) -> FormattedCell {
    if value.is_null() {
        return FormattedCell::plain("null");
    }

    match display {
        DisplayType::Date | DisplayType::DateTime => format_date(value, display, field_type, now),
        DisplayType::Number => FormattedCell::plain(locale_number(to_number(value))),
        DisplayType::Boolean => FormattedCell::plain(if is_truthy(value) { "✅" } else { "❌" }),
        DisplayType::Json => FormattedCell::plain(
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        ),
        DisplayType::Text => FormattedCell::plain(text_of(value)),
    }
}

fn format_date(
    value: &ItemValue,
    display: DisplayType,
    field_type: &FieldType,
    now: DateTime<Utc>,
) -> FormattedCell {
    let dttm = if field_type.is_numeric() {
        from_epoch_seconds(to_number(value))
    } else {
        parse_datetime(&text_of(value))
    };

    let content = match (display, dttm) {
        (DisplayType::Date, Some(dttm)) => dttm.format("%Y-%m-%d").to_string(),
        (DisplayType::Date, None) => format!("{}{}", field_type, text_of(value)),
        (_, Some(dttm)) if *field_type == FieldType::Float => {
            dttm.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        }
        _ => text_of(value),
    };

    FormattedCell {
        content,
        time_since: dttm.map(|dttm| time_since(dttm, now, display)),
    }
}

/// "N units ago" for the interval between `dttm` and `now`.
///
/// Sub-day units are only used when the field is displayed as a datetime;
/// plain dates start counting in days.
pub fn time_since(dttm: DateTime<Utc>, now: DateTime<Utc>, display: DisplayType) -> String {
    const UNITS: [(&str, f64, bool); 6] = [
        ("second", 60.0, false),
        ("minute", 60.0, false),
        ("hour", 24.0, false),
        ("day", 30.44, true),
        ("month", 12.0, true),
        ("year", f64::INFINITY, true),
    ];

    let mut elapsed = (now - dttm).num_milliseconds() as f64 / 1000.0;
    let mut value = elapsed;
    let mut unit = "";

    for (name, factor, show_for_date) in UNITS {
        if (elapsed < factor || factor.is_infinite())
            && (show_for_date || display == DisplayType::DateTime)
        {
            unit = name;
            value = elapsed;
            break;
        }
        elapsed /= factor;
    }

    let rounded = value.round() as i64;
    format!(
        "{} {}{} ago",
        rounded,
        unit,
        if rounded != 1 { "s" } else { "" }
    )
}

fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dttm) = DateTime::parse_from_rfc3339(raw) {
        return Some(dttm.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// en-US grouping with at most three fraction digits.
fn locale_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut out = String::new();
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
