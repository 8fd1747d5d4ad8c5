//! Structured recording events.
//!
//! A `RecordedEvent` is what the reader hands to the aggregator: the event
//! kind, a bag of scalar fields, and the optional duration, end timestamp and
//! captured call stack.

use std::collections::HashMap;
use std::time::Duration;

/// Kind of a recorded event
///
/// Only the kinds the overview summarises get their own variant; everything
/// else lands in `Other` and is ignored by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    CpuLoad,
    YoungGarbageCollection,
    OldGarbageCollection,
    GcHeapSummary,
    PhysicalMemory,
    GcConfiguration,
    ObjectAllocationOutsideTlab,
    ObjectAllocationInNewTlab,
    ExecutionSample,
    JavaThreadStatistics,
    ClassLoadingStatistics,
    Compilation,
    GcHeapConfiguration,
    Other(String),
}

impl std::str::FromStr for EventKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_type_name(s))
    }
}

impl EventKind {
    /// Map a recording type name (e.g. "jdk.CPULoad") to its kind
    pub fn from_type_name(s: &str) -> Self {
        match s {
            "jdk.CPULoad" => Self::CpuLoad,
            "jdk.YoungGarbageCollection" => Self::YoungGarbageCollection,
            "jdk.OldGarbageCollection" => Self::OldGarbageCollection,
            "jdk.GCHeapSummary" => Self::GcHeapSummary,
            "jdk.PhysicalMemory" => Self::PhysicalMemory,
            "jdk.GCConfiguration" => Self::GcConfiguration,
            "jdk.ObjectAllocationOutsideTLAB" => Self::ObjectAllocationOutsideTlab,
            "jdk.ObjectAllocationInNewTLAB" => Self::ObjectAllocationInNewTlab,
            "jdk.ExecutionSample" => Self::ExecutionSample,
            "jdk.JavaThreadStatistics" => Self::JavaThreadStatistics,
            "jdk.ClassLoadingStatistics" => Self::ClassLoadingStatistics,
            "jdk.Compilation" => Self::Compilation,
            "jdk.GCHeapConfiguration" => Self::GcHeapConfiguration,
            other => Self::Other(other.to_string()),
        }
    }

    /// Event type name as it appears in the recording
    pub fn type_name(&self) -> &str {
        match self {
            Self::CpuLoad => "jdk.CPULoad",
            Self::YoungGarbageCollection => "jdk.YoungGarbageCollection",
            Self::OldGarbageCollection => "jdk.OldGarbageCollection",
            Self::GcHeapSummary => "jdk.GCHeapSummary",
            Self::PhysicalMemory => "jdk.PhysicalMemory",
            Self::GcConfiguration => "jdk.GCConfiguration",
            Self::ObjectAllocationOutsideTlab => "jdk.ObjectAllocationOutsideTLAB",
            Self::ObjectAllocationInNewTlab => "jdk.ObjectAllocationInNewTLAB",
            Self::ExecutionSample => "jdk.ExecutionSample",
            Self::JavaThreadStatistics => "jdk.JavaThreadStatistics",
            Self::ClassLoadingStatistics => "jdk.ClassLoadingStatistics",
            Self::Compilation => "jdk.Compilation",
            Self::GcHeapConfiguration => "jdk.GCHeapConfiguration",
            Self::Other(name) => name,
        }
    }
}

/// A single scalar event value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

/// Where a stack frame was executing when the sample was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Interpreted,
    JitCompiled,
    Inlined,
    Native,
    Other,
}

impl FrameType {
    /// Map the frame type label used by `jfr print` to a frame type
    pub fn from_label(label: &str) -> Self {
        match label {
            "Interpreted" => Self::Interpreted,
            "JIT compiled" => Self::JitCompiled,
            "Inlined" => Self::Inlined,
            "Native" => Self::Native,
            _ => Self::Other,
        }
    }
}

/// A method referenced from a stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Qualified name of the owning type (e.g. "java.util.HashMap")
    pub type_name: String,

    /// Method name
    pub name: String,

    /// Raw descriptor (e.g. "(Ljava/lang/Object;)I")
    pub descriptor: String,
}

impl Method {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// One entry of a captured call stack
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub frame_type: FrameType,
    pub method: Option<Method>,
}

impl Frame {
    pub fn new(frame_type: FrameType, method: Option<Method>) -> Self {
        Self { frame_type, method }
    }

    /// Returns the method if this frame belongs to managed (Java) code
    pub fn java_method(&self) -> Option<&Method> {
        match self.frame_type {
            FrameType::Other => None,
            _ => self.method.as_ref(),
        }
    }
}

/// Captured call stack, innermost frame first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackTrace {
    pub frames: Vec<Frame>,
    pub truncated: bool,
}

impl StackTrace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            truncated: false,
        }
    }

    /// Innermost frame, if any was captured
    pub fn top_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }
}

/// An event read from a recording
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub kind: EventKind,
    pub fields: HashMap<String, FieldValue>,
    pub duration: Option<Duration>,

    /// End of the event in epoch milliseconds
    pub end_time_millis: Option<i64>,

    pub stack_trace: Option<StackTrace>,
}

impl RecordedEvent {
    /// Create an event without fields, duration, timestamp or stack
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            fields: HashMap::new(),
            duration: None,
            end_time_millis: None,
            stack_trace: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_end_time(mut self, end_time_millis: i64) -> Self {
        self.end_time_millis = Some(end_time_millis);
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: StackTrace) -> Self {
        self.stack_trace = Some(stack_trace);
        self
    }

    /// Numeric field as a float; integers are widened
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Text(_) => None,
        }
    }

    /// Integer field; floats are not narrowed
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.fields.get(name)? {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Duration in nanoseconds, zero for instant events
    pub fn duration_nanos(&self) -> i64 {
        self.duration
            .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
