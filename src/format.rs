//! Turns raw request values into the exact strings drawn on the page.

use crate::document::DocumentRequest;
use crate::error::{FieldIssue, FieldIssueReason};
use crate::schema::{FieldRole, FieldSpec, TinKind, ValueSource};
use serde_json::Value;

/// Glyph drawn for a ticked checkbox.
pub const CHECK_MARK: &str = "X";

/// Request key naming the TIN kind (`ssn` or `ein`).
pub const TIN_TYPE_KEY: &str = "tinType";

/// How a schema field's value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    Text,
    Currency,
    Checkbox,
    CityStateZip,
    TinGroup { kind: TinKind, group: usize },
}

impl TinKind {
    pub fn value_key(&self) -> &'static str {
        match self {
            TinKind::Ssn => "ssn",
            TinKind::Ein => "ein",
        }
    }

    /// Digit counts of the printed groups: SSN 3-2-4, EIN 2-7.
    pub fn groups(&self) -> &'static [usize] {
        match self {
            TinKind::Ssn => &[3, 2, 4],
            TinKind::Ein => &[2, 7],
        }
    }
}

/// The formatter rule for a field, or `None` when the role/source pairing is
/// something the formatter cannot produce.
pub fn rule_for(spec: &FieldSpec) -> Option<FormatRule> {
    match (spec.role, &spec.source) {
        (FieldRole::Text, ValueSource::Field(_)) => Some(FormatRule::Text),
        (FieldRole::Currency, ValueSource::Field(_)) => Some(FormatRule::Currency),
        (FieldRole::Checkbox, ValueSource::Field(_)) => Some(FormatRule::Checkbox),
        (FieldRole::Text, ValueSource::CityStateZip { .. }) => Some(FormatRule::CityStateZip),
        (FieldRole::Text, ValueSource::Tin { kind, group }) => {
            let group = *group as usize;
            (group < kind.groups().len()).then_some(FormatRule::TinGroup { kind: *kind, group })
        }
        _ => None,
    }
}

/// Produce the drawable text for one field. `Ok("")` means draw nothing;
/// `Err` means the value could not be coerced and the field is skipped.
pub fn format_field(
    spec: &FieldSpec,
    request: &DocumentRequest,
    currency_decimals: u8,
) -> Result<String, FieldIssue> {
    let issue = |reason| FieldIssue {
        field: spec.name.to_string(),
        reason,
    };
    let Some(rule) = rule_for(spec) else {
        // Schemas are validated by tests; an unrecognised pairing draws nothing.
        return Ok(String::new());
    };
    match (rule, &spec.source) {
        (FormatRule::Text, ValueSource::Field(key)) => {
            coerce_text(request.field(key)).ok_or_else(|| issue(FieldIssueReason::NotScalar))
        }
        (FormatRule::Currency, ValueSource::Field(key)) => {
            let amount = parse_amount(request.field(key)).map_err(issue)?;
            Ok(format_currency(amount, currency_decimals))
        }
        (FormatRule::Checkbox, ValueSource::Field(key)) => {
            Ok(if is_truthy(request.field(key)).map_err(issue)? {
                CHECK_MARK.to_string()
            } else {
                String::new()
            })
        }
        (FormatRule::CityStateZip, ValueSource::CityStateZip { city, state, zip }) => {
            let mut parts = Vec::with_capacity(3);
            for key in [city, state, zip] {
                let part =
                    coerce_text(request.field(key)).ok_or_else(|| issue(FieldIssueReason::NotScalar))?;
                parts.push(part);
            }
            Ok(join_address(&parts))
        }
        (FormatRule::TinGroup { kind, group }, _) => tin_group(request, kind, group).map_err(issue),
        _ => Ok(String::new()),
    }
}

/// Scalar to text. `None` for arrays and objects.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Checkbox state. Arrays and objects are not a yes/no answer.
pub fn is_truthy(value: Option<&Value>) -> Result<bool, FieldIssueReason> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(false)),
        Some(Value::String(s)) => {
            let v = s.trim().to_ascii_lowercase();
            Ok(!matches!(v.as_str(), "" | "0" | "false" | "no" | "off"))
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(FieldIssueReason::NotScalar),
    }
}

/// Parse a currency input. Absent, null and blank input is zero.
pub fn parse_amount(value: Option<&Value>) -> Result<f64, FieldIssueReason> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(raw)) => {
            let cleaned: String = raw
                .chars()
                .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return Ok(0.0);
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| FieldIssueReason::NotNumeric(raw.clone()))
        }
        Some(Value::Bool(_)) => Err(FieldIssueReason::NotNumeric(
            value.map(|v| v.to_string()).unwrap_or_default(),
        )),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(FieldIssueReason::NotScalar),
    }
}

/// Exactly zero (and NaN) renders as an empty string; everything else gets
/// thousands separators and `decimals` fractional digits.
pub fn format_currency(amount: f64, decimals: u8) -> String {
    if amount == 0.0 || !amount.is_finite() {
        return String::new();
    }
    let decimals = decimals.min(6) as i32;
    let factor = 10f64.powi(decimals);
    let rounded = (amount.abs() * factor).round() / factor;
    let fixed = format!("{:.*}", decimals as usize, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if amount < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "City, ST, 12345" with blank components dropped.
pub fn join_address<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn tin_group(
    request: &DocumentRequest,
    kind: TinKind,
    group: usize,
) -> Result<String, FieldIssueReason> {
    let selected = coerce_text(request.field(TIN_TYPE_KEY)).unwrap_or_default();
    let selected = selected.to_ascii_lowercase();
    if selected != kind.value_key() {
        return Ok(String::new());
    }
    let raw = coerce_text(request.field(kind.value_key())).ok_or(FieldIssueReason::NotScalar)?;
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Ok(String::new());
    }
    if digits.len() != 9 {
        return Err(FieldIssueReason::MalformedTin {
            digits: digits.len(),
        });
    }
    let groups = kind.groups();
    let start: usize = groups[..group].iter().sum();
    Ok(digits[start..start + groups[group]].to_string())
}
