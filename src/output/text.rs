//! Human-readable overview summary.

use crate::parser::schema::{FrameSummary, Overview};

const LABEL_WIDTH: usize = 48;

/// Render an overview as a plain-text report
///
/// **Public** - printed by the CLI with `--summary`
pub fn generate_text_summary(overview: &Overview) -> String {
    let mut lines = Vec::new();

    lines.push(format!("GC: {}", overview.gc.name));
    for (label, pauses) in [("young", &overview.gc.young), ("old", &overview.gc.old)] {
        lines.push(format!(
            "  {:<5} {:>6} pauses | max {:>10.3} ms | avg {:>10.3} ms",
            label,
            pauses.count,
            pauses.max_duration_ns as f64 / 1e6,
            pauses.avg_duration_ns / 1e6
        ));
    }

    lines.push(format!(
        "CPU: machine {:.1}% | jvm user {:.1}% | jvm system {:.1}%",
        overview.cpu.system * 100.0,
        overview.cpu.jvm_user * 100.0,
        overview.cpu.jvm_system * 100.0
    ));
    lines.push(format!(
        "Heap: initial {} | used {} | physical {}",
        format_bytes(overview.heap.initial),
        format_bytes(overview.heap.used),
        format_bytes(overview.heap.physical)
    ));
    lines.push(format!(
        "Allocation: {} total | {}/s",
        format_bytes(overview.alloc.total),
        format_bytes(overview.alloc.rate as i64)
    ));
    lines.push(format!(
        "Threads: {} | Classes: {}",
        overview.threads, overview.classes
    ));

    push_frame_table(
        &mut lines,
        "TOP ALLOCATION FRAMES (by bytes)",
        &overview.alloc.top_frames_by_alloc,
    );
    push_frame_table(
        &mut lines,
        "TOP ALLOCATION FRAMES (by samples)",
        &overview.alloc.top_frames_by_count,
    );
    push_frame_table(&mut lines, "TOP EXECUTION FRAMES", &overview.cpu.top_frames);

    lines.join("\n")
}

fn push_frame_table(lines: &mut Vec<String>, title: &str, frames: &[FrameSummary]) {
    lines.push(String::new());
    lines.push(title.to_string());

    if frames.is_empty() {
        lines.push("  (no samples)".to_string());
        return;
    }

    for frame in frames {
        lines.push(format!(
            "  {:<width$} {:>14} {:>8}",
            truncate_label(&frame.frame),
            frame.total,
            frame.count,
            width = LABEL_WIDTH
        ));
    }
}

/// Keep the end of long labels, where the method name is
fn truncate_label(label: &str) -> String {
    let chars = label.chars().count();
    if chars <= LABEL_WIDTH {
        return label.to_string();
    }
    let tail: String = label.chars().skip(chars - (LABEL_WIDTH - 3)).collect();
    format!("...{}", tail)
}

fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::EventAggregator;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Foo.bar()"), "Foo.bar()");

        let long = "x".repeat(60);
        let truncated = truncate_label(&long);
        assert_eq!(truncated.chars().count(), LABEL_WIDTH);
        assert!(truncated.starts_with("..."));
    }

    #[test]
    fn test_summary_of_empty_overview() {
        let summary = generate_text_summary(&EventAggregator::new().snapshot());
        assert!(summary.starts_with("GC: Unknown"));
        assert!(summary.contains("(no samples)"));
    }
}
