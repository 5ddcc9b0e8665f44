use std::fmt::Write;

use super::process::ProcessSample;
use super::reading::{Reading, ReadingScope};

/// Outbound alert message, derived from a reading that exceeded its
/// threshold. Never stored; built immediately before delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
    pub recipient: String,
}

impl Alert {
    /// Build the alert for an over-threshold reading.
    ///
    /// The HTML body carries the measured value, threshold, usage
    /// percentage and timestamp; aggregate readings additionally get a
    /// table of matched processes sorted descending by memory.
    #[must_use]
    pub fn from_reading(reading: &Reading, recipient: &str) -> Self {
        let subject = match reading.scope {
            ReadingScope::Aggregate { process_count } => format!(
                "[memsentry] ALERT: watched group at {:.2} MB across {} process(es) (threshold {:.2} MB)",
                reading.memory_mb, process_count, reading.threshold_mb
            ),
            ReadingScope::SingleProcess { pid } => format!(
                "[memsentry] ALERT: process {} at {:.2} MB (threshold {:.2} MB)",
                pid, reading.memory_mb, reading.threshold_mb
            ),
        };

        Self {
            subject,
            body_text: build_text_body(reading),
            body_html: build_html_body(reading),
            recipient: recipient.to_string(),
        }
    }
}

fn build_text_body(reading: &Reading) -> String {
    let mut body = format!(
        "Memory threshold exceeded\n\n\
         Measured  : {:.2} MB\n\
         Threshold : {:.2} MB\n\
         Usage     : {:.1} %\n\
         Timestamp : {}\n",
        reading.memory_mb,
        reading.threshold_mb,
        reading.usage_percent(),
        reading.timestamp.to_rfc3339(),
    );
    match reading.scope {
        ReadingScope::Aggregate { process_count } => {
            let _ = writeln!(body, "Processes : {process_count}");
            for sample in sorted_by_memory(&reading.processes) {
                let _ = writeln!(body, "  {:>8.2} MB  [{}] {}", sample.rss_mb, sample.pid, sample.cmdline);
            }
        }
        ReadingScope::SingleProcess { pid } => {
            let _ = writeln!(body, "PID       : {pid}");
        }
    }
    body
}

fn build_html_body(reading: &Reading) -> String {
    let mut html = String::from("<html><body><h2>Memory threshold exceeded</h2><table>");
    let _ = write!(
        html,
        "<tr><td>Measured</td><td>{:.2} MB</td></tr>\
         <tr><td>Threshold</td><td>{:.2} MB</td></tr>\
         <tr><td>Usage</td><td>{:.1} %</td></tr>\
         <tr><td>Timestamp</td><td>{}</td></tr>",
        reading.memory_mb,
        reading.threshold_mb,
        reading.usage_percent(),
        reading.timestamp.to_rfc3339(),
    );
    match reading.scope {
        ReadingScope::Aggregate { process_count } => {
            let _ = write!(html, "<tr><td>Processes</td><td>{process_count}</td></tr></table>");
            if !reading.processes.is_empty() {
                html.push_str(
                    "<h3>Matched processes</h3><table>\
                     <tr><th>PID</th><th>Memory (MB)</th><th>Command line</th></tr>",
                );
                for sample in sorted_by_memory(&reading.processes) {
                    let _ = write!(
                        html,
                        "<tr><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
                        sample.pid,
                        sample.rss_mb,
                        escape_html(&sample.cmdline),
                    );
                }
                html.push_str("</table>");
            }
        }
        ReadingScope::SingleProcess { pid } => {
            let _ = write!(html, "<tr><td>PID</td><td>{pid}</td></tr></table>");
        }
    }
    html.push_str("</body></html>");
    html
}

fn sorted_by_memory(samples: &[ProcessSample]) -> Vec<&ProcessSample> {
    let mut sorted: Vec<&ProcessSample> = samples.iter().collect();
    sorted.sort_by(|a, b| b.rss_mb.total_cmp(&a.rss_mb));
    sorted
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
