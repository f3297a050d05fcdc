use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use chrono::{DateTime, Utc};
use tracing::warn;
use crate::pipeline::CompletionReport;

/// Appends one usage line per completed call. Failing to write is only a warning.
pub fn log_usage(log_path: &Path, report: &CompletionReport) {

    let log_entry = format_entry(Utc::now(), report);

    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .and_then(|mut file| file.write_all(log_entry.as_bytes()));

    if let Err(e) = written {
        warn!(path = %log_path.display(), error = %e, "failed to write usage log");
    }

}

pub fn format_entry(timestamp: DateTime<Utc>, report: &CompletionReport) -> String {

    format!(
        "{} | {:30} | {:8} tokens | ${:.6} | ${:.6} output\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        report.model,
        report.usage.total_tokens,
        report.cost.estimated_total_cost,
        report.cost.estimated_output_cost
    )

}

#[cfg(test)]
mod tests {

    use super::*;
    use chrono::TimeZone;
    use crate::cost::{self, PricingRates};
    use crate::models::Usage;

    fn report() -> CompletionReport {
        let usage = Usage { total_tokens: 12, prompt_tokens: 11, completion_tokens: 1 };
        CompletionReport {
            text: "4".to_string(),
            model: "gpt-oss-120b".to_string(),
            usage,
            cost: cost::estimate(&usage, &PricingRates::default())
        }
    }

    #[test]
    fn test_entry_format() {

        let timestamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        assert_eq!(
            format_entry(timestamp, &report()),
            "2026-01-02 03:04:05 | gpt-oss-120b                   |       12 tokens | $0.000002 | $0.000001 output\n"
        );

    }

    #[test]
    fn test_entries_are_appended() {

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.log");

        log_usage(&path, &report());
        log_usage(&path, &report());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().all(|line| line.contains("gpt-oss-120b")));

    }

    #[test]
    fn test_unwritable_path_does_not_panic() {

        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened for appending
        log_usage(dir.path(), &report());

    }

}
