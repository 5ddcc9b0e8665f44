use crate::application::services::report::ReportSummary;
use crate::domain::entities::reading::ReadingScope;

/// Render the fixed-width labeled block for one run.
///
/// Field order and labels are load-bearing: downstream dashboards parse
/// this text. Change them only together with whatever consumes them.
#[must_use]
pub fn render(summary: &ReportSummary) -> String {
    let scope_line = match summary.scope {
        ReadingScope::Aggregate { process_count } => {
            format!("Processes     : {process_count}")
        }
        ReadingScope::SingleProcess { pid } => format!("PID           : {pid}"),
    };

    format!(
        "Status        : {status}\n\
         Measured      : {measured:.2} MB\n\
         Threshold     : {threshold:.2} MB\n\
         Usage         : {usage:.1} %\n\
         {scope_line}\n\
         Timestamp     : {timestamp}\n\
         SMTP server   : {endpoint}\n\
         Recipient     : {recipient}",
        status = summary.status,
        measured = summary.memory_mb,
        threshold = summary.threshold_mb,
        usage = summary.usage_percent,
        timestamp = summary.timestamp.to_rfc3339(),
        endpoint = summary.smtp_endpoint,
        recipient = summary.recipient,
    )
}
