//! Output JSON schema definitions for the recording overview.
//!
//! This module defines the structure of the JSON document we print or write
//! to disk. Top-level keys are fixed: `gc`, `cpu`, `heap`, `alloc`,
//! `threads`, `classes`.

use serde::{Deserialize, Serialize};

/// Top-level overview of one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Garbage collector name and pause statistics
    pub gc: GcSummary,

    /// CPU load averages and execution hot spots
    pub cpu: CpuSummary,

    /// Last observed heap sizes
    pub heap: HeapSummary,

    /// Allocation rate, volume and hot spots
    pub alloc: AllocationSummary,

    /// Last observed number of active threads
    pub threads: f64,

    /// Last observed number of loaded minus unloaded classes
    pub classes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcSummary {
    /// Old collector name, followed by "/<young collector>" when known
    pub name: String,
    pub young: DurationSummary,
    pub old: DurationSummary,
}

/// Count and timing of events with a duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSummary {
    pub count: u64,
    pub max_duration_ns: i64,
    pub avg_duration_ns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSummary {
    /// Average machine-wide load (0.0 - 1.0)
    pub system: f64,
    pub jvm_user: f64,
    pub jvm_system: f64,

    /// JIT compilation durations
    pub compilation: DurationSummary,

    /// Most sampled top frames
    pub top_frames: Vec<FrameSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapSummary {
    /// Initial heap size in bytes
    pub initial: i64,

    /// Used heap in bytes
    pub used: i64,

    /// Total physical memory in bytes
    pub physical: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Latest allocation rate estimate in bytes per second
    pub rate: f64,

    /// Sum of all sampled allocation sizes in bytes
    pub total: i64,

    pub top_frames_by_count: Vec<FrameSummary>,
    pub top_frames_by_alloc: Vec<FrameSummary>,
}

/// A ranked top frame (e.g. "HashMap.resize()")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub frame: String,
    pub total: i64,
    pub count: u64,
}
