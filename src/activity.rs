use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Activity Log - Integration attempts, newest first
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Bulk,
    Api,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::Bulk => "BULK",
            LogKind::Api => "API",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub operation: String,
    pub status: LogStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    pub fn new(
        kind: LogKind,
        operation: impl Into<String>,
        status: LogStatus,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            timestamp,
            kind,
            operation: operation.into(),
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Both criteria are optional; `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub status: Option<LogStatus>,
    pub kind: Option<LogKind>,
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.status.map_or(true, |s| s == entry.status) && self.kind.map_or(true, |k| k == entry.kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-filled with three earlier attempts.
    pub fn seeded() -> Self {
        let at = |h, m| Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).single().unwrap_or_default();

        let mut entries = vec![
            LogEntry::new(
                LogKind::Bulk,
                "Product Catalog Upload",
                LogStatus::Success,
                "Successfully uploaded 150 products",
                at(10, 30),
            )
            .with_details("File: products_batch_1.xlsx\nProcessed: 150 items\nTime: 2.3 seconds"),
            LogEntry::new(
                LogKind::Api,
                "Inventory Sync API",
                LogStatus::Error,
                "API authentication failed",
                at(9, 15),
            )
            .with_details("Error: Invalid API key\nEndpoint: /api/v1/inventory\nStatus: 401 Unauthorized"),
            LogEntry::new(
                LogKind::Bulk,
                "Price Update",
                LogStatus::Warning,
                "Partial upload completed with warnings",
                at(8, 45),
            )
            .with_details(
                "File: prices_update.xlsx\nProcessed: 95/100 items\nWarnings: 5 items had invalid price format",
            ),
        ];
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.id = (i + 1).to_string();
        }

        Self { entries }
    }

    /// New entries go on top.
    pub fn record(&mut self, entry: LogEntry) {
        tracing::debug!(
            operation = %entry.operation,
            kind = entry.kind.label(),
            status = ?entry.status,
            "Activity recorded"
        );
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn filter(&self, filter: LogFilter) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
