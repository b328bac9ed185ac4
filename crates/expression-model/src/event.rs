//! Inbound parameter update events.
//!
//! Replay files and the line-oriented stream use JSONL, one event per
//! line: `{"t":1200,"name":"EyeLidLeft","value":0.75}`. The timestamp is
//! optional. Lines starting with `#` are comments.

use serde::{Deserialize, Serialize};

/// Milliseconds since the pipeline (or recording) started.
pub type TimestampMs = u64;

/// Accepted range for tracking values.
pub const VALUE_MIN: f64 = -1.0;
pub const VALUE_MAX: f64 = 1.0;

/// A single `(name, value)` update from the tracking source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEvent {
    /// Optional source timestamp in milliseconds.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<TimestampMs>,

    /// Raw parameter name or address as sent by the tracker.
    pub name: String,

    /// Parameter value. Non-numeric wire values are carried as NaN so the
    /// pipeline can account for them.
    pub value: f64,
}

/// Wire form of an event, before value checking.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParameterEvent {
    #[serde(rename = "t", default)]
    pub timestamp_ms: Option<TimestampMs>,
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MalformedValue {
    #[error("value is not a finite number")]
    NonFinite,

    #[error("value {0} is outside [-1, 1]")]
    OutOfRange(f64),
}

impl ParameterEvent {
    /// Create an event without a timestamp.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp_ms: None,
            name: name.into(),
            value,
        }
    }

    /// Create an event stamped with a source timestamp.
    pub fn at(timestamp_ms: TimestampMs, name: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            name: name.into(),
            value,
        }
    }

    /// The parameter name with any address path stripped:
    /// `/avatar/parameters/v2/EyeLidLeft` becomes `EyeLidLeft`.
    pub fn parameter_name(&self) -> &str {
        parameter_name(&self.name)
    }

    /// The value if it lies in the accepted domain.
    pub fn checked_value(&self) -> Result<f64, MalformedValue> {
        check_value(self.value)
    }
}

impl From<RawParameterEvent> for ParameterEvent {
    fn from(raw: RawParameterEvent) -> Self {
        let value = match &raw.value {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            // Binary-encoded parameter bits arrive as booleans
            serde_json::Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => f64::NAN,
        };
        Self {
            timestamp_ms: raw.timestamp_ms,
            name: raw.name,
            value,
        }
    }
}

/// Strip everything up to the last `/` of an address.
pub fn parameter_name(address: &str) -> &str {
    address.rsplit('/').next().unwrap_or(address)
}

/// Validate a tracking value against the `[-1, 1]` domain.
pub fn check_value(value: f64) -> Result<f64, MalformedValue> {
    if !value.is_finite() {
        return Err(MalformedValue::NonFinite);
    }
    if !(VALUE_MIN..=VALUE_MAX).contains(&value) {
        return Err(MalformedValue::OutOfRange(value));
    }
    Ok(value)
}

/// Parse one JSONL line. Blank and `#` lines yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<ParameterEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let raw: RawParameterEvent = serde_json::from_str(line)?;
    Ok(Some(raw.into()))
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<ParameterEvent>, serde_json::Error> {
    jsonl
        .lines()
        .filter_map(|line| parse_event_line(line).transpose())
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[ParameterEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
