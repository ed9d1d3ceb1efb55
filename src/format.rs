//! Output formatting utilities

use crate::bench::Measurement;
use std::time::Duration;

/// Format byte size in human-readable format
pub fn format_size(bytes: u64) -> String {
    human_bytes::human_bytes(bytes as f64)
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1e-3 {
        format!("{:.1}µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.3}ms", secs * 1e3)
    } else {
        format!("{:.2}s", secs)
    }
}

/// Format throughput in human-readable format
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", human_bytes::human_bytes(bytes_per_sec))
}

/// Results of one benchmark sweep
pub struct BenchReport {
    pub backend: &'static str,
    pub measurements: Vec<Measurement>,
}

impl BenchReport {
    /// Format the report as an aligned table
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("=== Kernel Benchmark ({}) ===", self.backend));
        lines.push(String::new());
        lines.push(format!(
            "{:<16} {:>10} {:>12} {:>14} {:>7}",
            "Kernel", "Size", "Per call", "Throughput", "Result"
        ));

        for m in &self.measurements {
            lines.push(format!(
                "{:<16} {:>10} {:>12} {:>14} {:>7}",
                m.kernel.name(),
                format_size(m.size),
                format_duration(m.per_call()),
                format_rate(m.throughput()),
                m.result
            ));
        }

        lines.join("\n")
    }

    /// Print the report to stdout
    pub fn print(&self) {
        println!("{}", self.format());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::Kernel;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        // human_bytes uses binary prefixes (KiB, MiB)
        assert!(format_size(1024).contains("1"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(12)), "12.0µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.500ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }

    #[test]
    fn test_report_lists_every_measurement() {
        let report = BenchReport {
            backend: "scalar",
            measurements: vec![
                Measurement {
                    kernel: Kernel::NaiveBracket,
                    size: 1024,
                    iterations: 4,
                    elapsed: Duration::from_millis(4),
                    result: false,
                },
                Measurement {
                    kernel: Kernel::SimdBracket,
                    size: 1024,
                    iterations: 4,
                    elapsed: Duration::from_millis(2),
                    result: false,
                },
            ],
        };

        let text = report.format();
        assert!(text.contains("(scalar)"));
        assert!(text.contains("NaiveBracket"));
        assert!(text.contains("SIMDBracket"));
        assert_eq!(text.lines().count(), 5);
    }
}
