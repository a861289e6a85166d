//! Plain-text run report uploaded at the end of a demo run

use crate::oci::types::Instance;
use chrono::{DateTime, Utc};

pub const REPORT_TITLE: &str = "ACE OCI Demo Report";

/// Format a run time as `YYYY-MM-DD_HHMMSS_UTC`
pub fn report_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d_%H%M%S_UTC").to_string()
}

/// Object name for a report: `<prefix>/run_report_<timestamp>.txt`
pub fn object_name(prefix: &str, timestamp: &str) -> String {
    format!("{}/run_report_{}.txt", prefix, timestamp)
}

/// Ordered report lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Start a report with its fixed header
    pub fn new(
        timestamp: &str,
        region: &str,
        tenancy_name: &str,
        compartment_id: &str,
        instance_count: usize,
    ) -> Self {
        Self {
            lines: vec![
                REPORT_TITLE.to_string(),
                format!("Timestamp: {}", timestamp),
                format!("Region: {}", region),
                format!("Tenancy: {}", tenancy_name),
                format!("Compartment OCID: {}", compartment_id),
                format!("Instances found: {}", instance_count),
            ],
        }
    }

    /// Build a full report for the listed instances, in listing order
    pub fn for_instances(
        timestamp: &str,
        region: &str,
        tenancy_name: &str,
        compartment_id: &str,
        instances: &[Instance],
    ) -> Self {
        let mut report = Self::new(
            timestamp,
            region,
            tenancy_name,
            compartment_id,
            instances.len(),
        );
        for instance in instances {
            report.push_instance(&instance.display_name, &instance.lifecycle_state);
        }
        report
    }

    pub fn push_instance(&mut self, display_name: &str, lifecycle_state: &str) {
        self.lines
            .push(format!(" - {} | {}", display_name, lifecycle_state));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with `\n`, no trailing newline
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
