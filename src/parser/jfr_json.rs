//! Reader for the JSON form of a flight recording.
//!
//! Parses the output of `jfr print --json <file.jfr>` into `RecordedEvent`s.
//! The binary chunk format is not read here; convert it with the `jfr` tool
//! first.
//!
//! Expected layout:
//! ```text
//! {"recording": {"events": [
//!   {"type": "jdk.CPULoad", "values": {"startTime": "...", "machineTotal": 0.4, ...}},
//!   ...
//! ]}}
//! ```

use super::event::{EventKind, FieldValue, Frame, FrameType, Method, RecordedEvent, StackTrace};
use crate::utils::config::{
    DURATION_FIELD, EVENTS_FIELD, RECORDING_FIELD, STACK_TRACE_FIELD, START_TIME_FIELD,
};
use crate::utils::error::RecordingError;
use chrono::DateTime;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Raw event as printed by `jfr print --json`
#[derive(Debug, Clone, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,

    #[serde(default)]
    values: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawStackTrace {
    #[serde(default)]
    truncated: bool,

    #[serde(default)]
    frames: Vec<RawFrame>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFrame {
    #[serde(default)]
    method: Option<RawMethod>,

    /// "Interpreted", "JIT compiled", "Inlined" or "Native"
    #[serde(default, rename = "type")]
    frame_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMethod {
    #[serde(rename = "type")]
    owner: RawClass,

    name: String,

    #[serde(default)]
    descriptor: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawClass {
    name: String,
}

/// Read a recording from a `jfr print --json` file
///
/// **Public** - main entry point for loading recordings
///
/// # Errors
/// * `RecordingError::Io` - File cannot be opened or read
/// * `RecordingError::JsonError` - File is not valid JSON
/// * `RecordingError::InvalidFormat` - No event list, or no event could be parsed
pub fn read_recording(path: impl AsRef<Path>) -> Result<Vec<RecordedEvent>, RecordingError> {
    let path = path.as_ref();

    info!("Reading recording from: {}", path.display());

    let file = File::open(path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;

    parse_recording(&document)
}

/// Parse recording events from an already loaded JSON document
///
/// **Public** - accepts the `jfr print --json` layout or a bare event array
pub fn parse_recording(document: &Value) -> Result<Vec<RecordedEvent>, RecordingError> {
    let raw_events = extract_events_array(document)?;

    let events = parse_events_array(raw_events)?;
    debug!("Parsed {} of {} events", events.len(), raw_events.len());

    let truncated = count_truncated_stacks(&events);
    if truncated > 0 {
        debug!("{} events carry truncated stack traces", truncated);
    }

    Ok(events)
}

/// Locate the event list in the document
///
/// **Private** - internal helper for parse_recording
fn extract_events_array(document: &Value) -> Result<&[Value], RecordingError> {
    let events = match document {
        Value::Array(events) => Some(events),
        Value::Object(obj) => obj
            .get(RECORDING_FIELD)
            .and_then(|recording| recording.get(EVENTS_FIELD))
            .or_else(|| obj.get(EVENTS_FIELD))
            .and_then(Value::as_array),
        _ => None,
    };

    events.map(Vec::as_slice).ok_or_else(|| {
        RecordingError::InvalidFormat(
            "Recording must be an event array or contain recording.events".to_string(),
        )
    })
}

/// Stacks cut off by the recorder still have their innermost frame
fn count_truncated_stacks(events: &[RecordedEvent]) -> usize {
    events
        .iter()
        .filter(|event| event.stack_trace.as_ref().is_some_and(|stack| stack.truncated))
        .count()
}

/// Parse array of raw events
///
/// **Private** - malformed events are logged and skipped
fn parse_events_array(raw_events: &[Value]) -> Result<Vec<RecordedEvent>, RecordingError> {
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, raw_value) in raw_events.iter().enumerate() {
        match parse_event(raw_value) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - some events may be malformed
                warn!("Failed to parse event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !raw_events.is_empty() {
        return Err(RecordingError::InvalidFormat(
            "All events failed to parse".to_string(),
        ));
    }

    Ok(events)
}

/// Convert one raw JSON event into a `RecordedEvent`
///
/// **Public** - useful for feeding events one at a time
pub fn parse_event(raw_value: &Value) -> Result<RecordedEvent, RecordingError> {
    let raw = RawEvent::deserialize(raw_value)?;

    let mut event = RecordedEvent::new(EventKind::from_type_name(&raw.event_type));

    if let Some(value) = raw.values.get(DURATION_FIELD).filter(|v| !v.is_null()) {
        event.duration = Some(parse_duration_value(value)?);
    }

    if let Some(value) = raw.values.get(START_TIME_FIELD).filter(|v| !v.is_null()) {
        let start = parse_instant_millis(value)?;
        let elapsed = event
            .duration
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        event.end_time_millis = Some(start.saturating_add(elapsed));
    }

    if let Some(value) = raw.values.get(STACK_TRACE_FIELD).filter(|v| !v.is_null()) {
        let stack: RawStackTrace = RawStackTrace::deserialize(value)?;
        event.stack_trace = Some(convert_stack_trace(stack));
    }

    for (name, value) in &raw.values {
        if name == START_TIME_FIELD || name == DURATION_FIELD || name == STACK_TRACE_FIELD {
            continue;
        }
        if let Some(field) = to_field_value(value) {
            event.fields.insert(name.clone(), field);
        }
    }

    Ok(event)
}

/// Scalar JSON values become fields; objects, arrays, booleans and nulls are dropped
fn to_field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Integer)
            .or_else(|| n.as_f64().map(FieldValue::Float)),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        _ => None,
    }
}

fn convert_stack_trace(raw: RawStackTrace) -> StackTrace {
    let frames = raw
        .frames
        .into_iter()
        .map(|frame| {
            let frame_type = frame
                .frame_type
                .as_deref()
                .map_or(FrameType::Other, FrameType::from_label);
            let method = frame
                .method
                .map(|m| Method::new(m.owner.name, m.name, m.descriptor));
            Frame::new(frame_type, method)
        })
        .collect();

    StackTrace {
        frames,
        truncated: raw.truncated,
    }
}

/// Parse an instant: RFC 3339 string or epoch milliseconds
fn parse_instant_millis(value: &Value) -> Result<i64, RecordingError> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.timestamp_millis())
            .map_err(|e| {
                RecordingError::InvalidFormat(format!("Invalid timestamp '{}': {}", s, e))
            }),
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            RecordingError::InvalidFormat(format!("Invalid epoch millis: {}", n))
        }),
        other => Err(RecordingError::InvalidFormat(format!(
            "Expected timestamp string or number, found {}",
            other
        ))),
    }
}

/// Parse a duration: ISO-8601 string or nanoseconds
fn parse_duration_value(value: &Value) -> Result<Duration, RecordingError> {
    match value {
        Value::String(s) => parse_iso_duration(s),
        Value::Number(n) => n.as_u64().map(Duration::from_nanos).ok_or_else(|| {
            RecordingError::InvalidFormat(format!("Invalid duration nanos: {}", n))
        }),
        other => Err(RecordingError::InvalidFormat(format!(
            "Expected duration string or number, found {}",
            other
        ))),
    }
}

/// Parse an ISO-8601 time-based duration such as `PT0.001157958S` or `PT1M30S`
///
/// **Public** - only the hour, minute and second components are supported
pub fn parse_iso_duration(text: &str) -> Result<Duration, RecordingError> {
    let invalid = || RecordingError::InvalidFormat(format!("Invalid duration: {}", text));

    let mut rest = text.strip_prefix("PT").ok_or_else(invalid)?;
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let unit_at = rest
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(unit_at);
        rest = &tail[1..];

        let component = match tail.as_bytes()[0] {
            b'H' => whole_units(number, 3600),
            b'M' => whole_units(number, 60),
            b'S' => parse_seconds(number),
            _ => None,
        };
        total = component
            .and_then(|c| total.checked_add(c))
            .ok_or_else(invalid)?;
    }

    Ok(total)
}

/// `number` hours or minutes, `None` on overflow
fn whole_units(number: &str, seconds_per_unit: u64) -> Option<Duration> {
    let units: u64 = number.parse().ok()?;
    units.checked_mul(seconds_per_unit).map(Duration::from_secs)
}

/// Seconds with an optional fraction, kept at nanosecond precision
fn parse_seconds(number: &str) -> Option<Duration> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let seconds: u64 = whole.parse().ok()?;
    let fraction = &fraction[..fraction.len().min(9)];
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{:0<9}", fraction).parse::<u32>().ok()?
    };

    Some(Duration::new(seconds, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_iso_duration() {
        assert_eq!(
            parse_iso_duration("PT0.001157958S").unwrap(),
            Duration::from_nanos(1_157_958)
        );
        assert_eq!(parse_iso_duration("PT1M30S").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_iso_duration("PT2H").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_iso_duration("PT0S").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_iso_duration_invalid() {
        assert!(parse_iso_duration("").is_err());
        assert!(parse_iso_duration("PT").is_err());
        assert!(parse_iso_duration("P1D").is_err());
        assert!(parse_iso_duration("PT5X").is_err());
        assert!(parse_iso_duration("PT-1S").is_err());
        assert!(parse_iso_duration("PT12").is_err());
    }

    #[test]
    fn test_parse_iso_duration_overflow_is_rejected() {
        assert!(parse_iso_duration("PT9999999999999999H").is_err());
        assert!(parse_iso_duration("PT9999999999999999999M").is_err());
        assert!(parse_iso_duration("PT18446744073709551615S1S").is_err());
    }

    #[test]
    fn test_count_truncated_stacks() {
        let frame = json!({ "type": "Interpreted", "method": {
            "type": { "name": "app.Main" }, "name": "main", "descriptor": "()V"
        }});
        let events = parse_recording(&json!([
            { "type": "jdk.ExecutionSample",
              "values": { "stackTrace": { "truncated": true, "frames": [frame] } } },
            { "type": "jdk.ExecutionSample",
              "values": { "stackTrace": { "truncated": false, "frames": [frame] } } },
            { "type": "jdk.CPULoad", "values": {} }
        ]))
        .unwrap();

        assert_eq!(count_truncated_stacks(&events), 1);
        let first = events[0].stack_trace.as_ref().unwrap();
        assert!(first.truncated);
        assert!(first.top_frame().is_some());
    }

    #[test]
    fn test_end_time_includes_duration() {
        let raw = json!({
            "type": "jdk.Compilation",
            "values": {
                "startTime": "2024-01-01T00:00:00.250Z",
                "duration": "PT1.5S"
            }
        });

        let event = parse_event(&raw).unwrap();
        assert_eq!(event.kind, EventKind::Compilation);
        assert_eq!(event.duration, Some(Duration::from_millis(1500)));
        assert_eq!(event.end_time_millis, Some(1_704_067_201_750));
    }

    #[test]
    fn test_numeric_time_values() {
        let raw = json!({
            "type": "jdk.YoungGarbageCollection",
            "values": { "startTime": 1000, "duration": 2_000_000 }
        });

        let event = parse_event(&raw).unwrap();
        assert_eq!(event.duration_nanos(), 2_000_000);
        assert_eq!(event.end_time_millis, Some(1002));
    }

    #[test]
    fn test_scalar_fields() {
        let raw = json!({
            "type": "jdk.CPULoad",
            "values": {
                "jvmUser": 0.25,
                "machineTotal": 1,
                "eventThread": { "javaName": "main" },
                "gcName": "G1",
                "flag": true
            }
        });

        let event = parse_event(&raw).unwrap();
        assert_eq!(event.get_f64("jvmUser"), Some(0.25));
        assert_eq!(event.get_i64("machineTotal"), Some(1));
        assert_eq!(event.get_str("gcName"), Some("G1"));
        assert!(!event.fields.contains_key("eventThread"));
        assert!(!event.fields.contains_key("flag"));
    }

    #[test]
    fn test_missing_type_is_an_error() {
        assert!(parse_event(&json!({ "values": {} })).is_err());
    }

    #[test]
    fn test_extract_events_array_layouts() {
        let nested = json!({ "recording": { "events": [] } });
        assert!(extract_events_array(&nested).unwrap().is_empty());

        let bare = json!([{ "type": "jdk.CPULoad" }]);
        assert_eq!(extract_events_array(&bare).unwrap().len(), 1);

        assert!(extract_events_array(&json!({ "foo": 1 })).is_err());
        assert!(extract_events_array(&json!("text")).is_err());
    }
}
