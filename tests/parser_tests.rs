use jfr_overview::parser::descriptor::{decode_descriptors, format_method};
use jfr_overview::parser::jfr_json::{
    parse_event, parse_iso_duration, parse_recording, read_recording,
};
use jfr_overview::parser::{EventKind, FrameType, Method};
use jfr_overview::utils::config::UNKNOWN_DESCRIPTOR_TYPE;
use jfr_overview::utils::error::RecordingError;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn sample_recording() -> serde_json::Value {
    json!({
        "recording": {
            "events": [
                {
                    "type": "jdk.GCConfiguration",
                    "values": {
                        "startTime": "2024-03-01T10:00:00.000+01:00",
                        "youngCollector": "G1New",
                        "oldCollector": "G1Old",
                        "parallelGCThreads": 8
                    }
                },
                {
                    "type": "jdk.ObjectAllocationInNewTLAB",
                    "values": {
                        "startTime": "2024-03-01T10:00:01.000+01:00",
                        "objectClass": { "name": "byte[]" },
                        "allocationSize": 24,
                        "tlabSize": 65536,
                        "stackTrace": {
                            "truncated": true,
                            "frames": [
                                {
                                    "method": {
                                        "type": { "name": "java.lang.StringLatin1" },
                                        "name": "newString",
                                        "descriptor": "([BII)Ljava/lang/String;",
                                        "modifiers": 9,
                                        "hidden": false
                                    },
                                    "lineNumber": 769,
                                    "bytecodeIndex": 9,
                                    "type": "Inlined"
                                }
                            ]
                        }
                    }
                },
                {
                    "type": "jdk.YoungGarbageCollection",
                    "values": {
                        "startTime": "2024-03-01T10:00:02.000+01:00",
                        "duration": "PT0.004512S",
                        "gcId": 3
                    }
                }
            ]
        }
    })
}

#[test]
fn test_parse_recording_layout() {
    let events = parse_recording(&sample_recording()).unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].kind, EventKind::GcConfiguration);
    assert_eq!(events[0].get_str("oldCollector"), Some("G1Old"));
    assert_eq!(events[0].get_i64("parallelGCThreads"), Some(8));

    let allocation = &events[1];
    assert_eq!(allocation.kind, EventKind::ObjectAllocationInNewTlab);
    assert_eq!(allocation.get_i64("tlabSize"), Some(65536));
    assert_eq!(allocation.end_time_millis, Some(1_709_283_601_000));

    let stack = allocation.stack_trace.as_ref().unwrap();
    assert!(stack.truncated);
    let top = stack.top_frame().unwrap();
    assert_eq!(top.frame_type, FrameType::Inlined);
    assert_eq!(
        top.java_method().map(format_method).as_deref(),
        Some("StringLatin1.newString(byte[], int, int)")
    );

    assert_eq!(events[2].duration, Some(Duration::from_micros(4512)));
}

#[test]
fn test_parse_bare_event_array() {
    let events = parse_recording(&json!([{
        "type": "jdk.CPULoad",
        "values": { "machineTotal": 0.5, "jvmUser": 0.1, "jvmSystem": 0.0 }
    }]))
    .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].get_f64("machineTotal"), Some(0.5));
    assert!(events[0].end_time_millis.is_none());
}

#[test]
fn test_malformed_events_are_skipped() {
    let events = parse_recording(&json!([
        { "type": "jdk.CPULoad", "values": { "startTime": "yesterday" } },
        { "values": {} },
        { "type": "jdk.ThreadPark", "values": {} }
    ]))
    .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Other("jdk.ThreadPark".to_string()));
}

#[test]
fn test_overflowing_duration_skips_only_that_event() {
    let events = parse_recording(&json!([
        { "type": "jdk.OldGarbageCollection", "values": { "duration": "PT9999999999999999H" } },
        { "type": "jdk.CPULoad", "values": { "machineTotal": 0.25 } }
    ]))
    .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::CpuLoad);
}

#[test]
fn test_all_events_malformed_is_an_error() {
    let result = parse_recording(&json!([{ "values": {} }]));
    assert!(matches!(result, Err(RecordingError::InvalidFormat(_))));
}

#[test]
fn test_empty_recording_is_valid() {
    let events = parse_recording(&json!({ "recording": { "events": [] } })).unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_read_recording_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", sample_recording()).unwrap();

    let events = read_recording(file.path()).unwrap();
    assert_eq!(events.len(), 3);
}

#[test]
fn test_read_recording_missing_file() {
    let result = read_recording("/definitely/not/a/recording.json");
    assert!(matches!(result, Err(RecordingError::Io(_))));
}

#[test]
fn test_read_recording_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let result = read_recording(file.path());
    assert!(matches!(result, Err(RecordingError::JsonError(_))));
}

#[test]
fn test_null_stack_trace() {
    let event = parse_event(&json!({
        "type": "jdk.ExecutionSample",
        "values": { "stackTrace": null }
    }))
    .unwrap();

    assert!(event.stack_trace.is_none());
}

#[test]
fn test_iso_duration_components() {
    assert_eq!(
        parse_iso_duration("PT1H2M3.5S").unwrap(),
        Duration::from_millis(3_723_500)
    );
}

#[test]
fn test_decode_descriptors() {
    assert_eq!(decode_descriptors("I").collect::<Vec<_>>(), vec!["int"]);
    assert_eq!(decode_descriptors("[[I").collect::<Vec<_>>(), vec!["int[][]"]);
    assert_eq!(
        decode_descriptors("Ljava/lang/String;").collect::<Vec<_>>(),
        vec!["java.lang.String"]
    );
    assert_eq!(
        decode_descriptors("Ljava.lang.String;").collect::<Vec<_>>(),
        vec!["java.lang.String"]
    );
    assert_eq!(
        decode_descriptors("%").collect::<Vec<_>>(),
        vec![UNKNOWN_DESCRIPTOR_TYPE]
    );
}

#[test]
fn test_format_method_parameter_lists() {
    let three = Method::new(
        "com.example.Codec",
        "encode",
        "(Ljava/nio/ByteBuffer;[JLjava/util/Map$Entry;)V",
    );
    assert_eq!(format_method(&three), "Codec.encode(ByteBuffer, long[], Map$Entry)");

    let eleven = Method::new("com.example.Codec", "wide", "(IJZDFSCBIJZ)V");
    assert_eq!(format_method(&eleven), "Codec.wide(...)");
}
