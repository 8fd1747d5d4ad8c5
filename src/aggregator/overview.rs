//! Event aggregation into a recording overview.
//!
//! `EventAggregator` owns every measure, histogram and rate estimator of one
//! run. Events are processed one at a time in recording order; `snapshot`
//! turns the accumulated state into an `Overview`.
//!
//! One aggregator per recording. State is never shared or merged.

use super::histogram::{Histogram, HistogramRecord};
use super::measure::{DoubleMeasure, LongMeasure};
use super::rate::RateEstimator;
use crate::parser::descriptor::format_method;
use crate::parser::event::{EventKind, RecordedEvent, StackTrace};
use crate::parser::schema::{
    AllocationSummary, CpuSummary, DurationSummary, FrameSummary, GcSummary, HeapSummary,
    Overview,
};
use crate::utils::config::UNKNOWN_GC_NAME;
use log::{debug, trace, warn};
use std::borrow::Borrow;

/// Aggregation state for one recording
#[derive(Debug, Clone, Default)]
pub struct EventAggregator {
    machine_cpu: DoubleMeasure,
    jvm_user: DoubleMeasure,
    jvm_system: DoubleMeasure,
    young_gc: LongMeasure,
    old_gc: LongMeasure,
    used_heap: LongMeasure,
    physical_memory: LongMeasure,
    initial_heap: LongMeasure,
    threads: DoubleMeasure,
    classes: LongMeasure,
    compilation: LongMeasure,
    gc_name: Option<String>,

    allocation_total: LongMeasure,
    allocation_rate: RateEstimator,
    allocation_top_frames: Histogram,
    execution_top_frames: Histogram,

    events_processed: u64,
    events_ignored: u64,
    events_skipped: u64,
}

impl EventAggregator {
    /// Create an aggregator with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process every event of a stream, in order
    pub fn process_all<I>(&mut self, events: I)
    where
        I: IntoIterator,
        I::Item: Borrow<RecordedEvent>,
    {
        for event in events {
            self.process(event.borrow());
        }
    }

    /// Fold a single event into the aggregation state
    ///
    /// **Public** - main entry point for aggregation
    ///
    /// Kinds without a dedicated variant are ignored. Events missing a
    /// required field are skipped with a warning.
    pub fn process(&mut self, event: &RecordedEvent) {
        self.events_processed += 1;

        let handled = match &event.kind {
            EventKind::CpuLoad => self.on_cpu_load(event),
            EventKind::YoungGarbageCollection => {
                self.young_gc.add(event.duration_nanos());
                true
            }
            EventKind::OldGarbageCollection => {
                self.old_gc.add(event.duration_nanos());
                true
            }
            EventKind::GcHeapSummary => add_required(&mut self.used_heap, event, "heapUsed"),
            EventKind::PhysicalMemory => {
                add_required(&mut self.physical_memory, event, "totalSize")
            }
            EventKind::GcConfiguration => self.on_gc_configuration(event),
            EventKind::ObjectAllocationOutsideTlab => {
                self.on_allocation_sample(event, "allocationSize")
            }
            EventKind::ObjectAllocationInNewTlab => self.on_allocation_sample(event, "tlabSize"),
            EventKind::ExecutionSample => {
                if let Some(frame) = top_frame(event.stack_trace.as_ref()) {
                    self.execution_top_frames.add(&frame, 1);
                }
                true
            }
            EventKind::JavaThreadStatistics => match required_f64(event, "activeCount") {
                Some(active) => {
                    self.threads.add(active);
                    true
                }
                None => false,
            },
            EventKind::ClassLoadingStatistics => self.on_class_loading(event),
            EventKind::Compilation => {
                self.compilation.add(event.duration_nanos());
                true
            }
            EventKind::GcHeapConfiguration => {
                add_required(&mut self.initial_heap, event, "initialSize")
            }
            EventKind::Other(name) => {
                trace!("Ignoring event of type {}", name);
                self.events_ignored += 1;
                true
            }
        };

        if !handled {
            self.events_skipped += 1;
        }
    }

    fn on_cpu_load(&mut self, event: &RecordedEvent) -> bool {
        let (Some(machine), Some(user), Some(system)) = (
            required_f64(event, "machineTotal"),
            required_f64(event, "jvmUser"),
            required_f64(event, "jvmSystem"),
        ) else {
            return false;
        };

        self.machine_cpu.add(machine);
        self.jvm_user.add(user);
        self.jvm_system.add(system);
        true
    }

    fn on_gc_configuration(&mut self, event: &RecordedEvent) -> bool {
        let Some(old) = event.get_str("oldCollector") else {
            warn!("Skipping {}: missing oldCollector", event.kind.type_name());
            return false;
        };

        let name = match event.get_str("youngCollector") {
            Some(young) => format!("{}/{}", old, young),
            None => old.to_string(),
        };
        debug!("GC configuration: {}", name);
        self.gc_name = Some(name);
        true
    }

    fn on_class_loading(&mut self, event: &RecordedEvent) -> bool {
        let (Some(loaded), Some(unloaded)) = (
            required_i64(event, "loadedClassCount"),
            required_i64(event, "unloadedClassCount"),
        ) else {
            return false;
        };

        self.classes.add(loaded - unloaded);
        true
    }

    /// Both TLAB paths feed the same measures; only the size field differs
    fn on_allocation_sample(&mut self, event: &RecordedEvent, size_field: &str) -> bool {
        let Some(size) = required_i64(event, size_field) else {
            return false;
        };

        if let Some(frame) = top_frame(event.stack_trace.as_ref()) {
            self.allocation_top_frames.add(&frame, size);
        }
        self.allocation_total.add(size);

        match event.end_time_millis {
            Some(timestamp) => self.allocation_rate.sample(size, timestamp),
            None => debug!(
                "{} without end time, excluded from allocation rate",
                event.kind.type_name()
            ),
        }
        true
    }

    /// Build the overview from everything processed so far
    ///
    /// **Public** - called once the event stream is exhausted
    pub fn snapshot(&self) -> Overview {
        Overview {
            gc: GcSummary {
                name: self
                    .gc_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_GC_NAME.to_string()),
                young: duration_summary(&self.young_gc),
                old: duration_summary(&self.old_gc),
            },
            cpu: CpuSummary {
                system: self.machine_cpu.average(),
                jvm_user: self.jvm_user.average(),
                jvm_system: self.jvm_system.average(),
                compilation: duration_summary(&self.compilation),
                top_frames: frame_summaries(self.execution_top_frames.top_by_count()),
            },
            heap: HeapSummary {
                initial: self.initial_heap.last(),
                used: self.used_heap.last(),
                physical: self.physical_memory.last(),
            },
            alloc: AllocationSummary {
                rate: self.allocation_rate.current_rate(),
                total: self.allocation_total.total(),
                top_frames_by_count: frame_summaries(self.allocation_top_frames.top_by_count()),
                top_frames_by_alloc: frame_summaries(self.allocation_top_frames.top_by_total()),
            },
            threads: self.threads.last(),
            classes: self.classes.last(),
        }
    }

    pub fn allocation_total(&self) -> &LongMeasure {
        &self.allocation_total
    }

    pub fn allocation_rate(&self) -> &RateEstimator {
        &self.allocation_rate
    }

    pub fn allocation_top_frames(&self) -> &Histogram {
        &self.allocation_top_frames
    }

    pub fn execution_top_frames(&self) -> &Histogram {
        &self.execution_top_frames
    }

    /// Events seen, including ignored and skipped ones
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Events of a kind the overview doesn't summarise
    pub fn events_ignored(&self) -> u64 {
        self.events_ignored
    }

    /// Events dropped because a required field was missing
    pub fn events_skipped(&self) -> u64 {
        self.events_skipped
    }
}

/// Label of the innermost frame, if it is managed code
fn top_frame(stack_trace: Option<&StackTrace>) -> Option<String> {
    stack_trace?.top_frame()?.java_method().map(format_method)
}

fn required_f64(event: &RecordedEvent, field: &str) -> Option<f64> {
    let value = event.get_f64(field);
    if value.is_none() {
        warn!("Skipping {}: missing {}", event.kind.type_name(), field);
    }
    value
}

fn required_i64(event: &RecordedEvent, field: &str) -> Option<i64> {
    let value = event.get_i64(field);
    if value.is_none() {
        warn!("Skipping {}: missing {}", event.kind.type_name(), field);
    }
    value
}

fn add_required(measure: &mut LongMeasure, event: &RecordedEvent, field: &str) -> bool {
    match required_i64(event, field) {
        Some(value) => {
            measure.add(value);
            true
        }
        None => false,
    }
}

fn duration_summary(measure: &LongMeasure) -> DurationSummary {
    DurationSummary {
        count: measure.count(),
        max_duration_ns: measure.max(),
        avg_duration_ns: measure.average(),
    }
}

fn frame_summaries(records: Vec<HistogramRecord>) -> Vec<FrameSummary> {
    records
        .into_iter()
        .map(|record| FrameSummary {
            frame: record.key,
            total: record.total,
            count: record.count,
        })
        .collect()
}
