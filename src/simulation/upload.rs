use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::activity::{LogEntry, LogKind, LogStatus};
use crate::notifications::Notification;

use super::outcome::Outcome;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Please select an Excel file (.xlsx or .xls): {name} is not one")]
    InvalidFileType { name: String },

    #[error("{name} is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Payload could not be rendered: {0}")]
    Payload(String),
}

impl SimulationError {
    /// Toast shown when a file is refused before upload.
    pub fn notification(&self) -> Notification {
        match self {
            SimulationError::InvalidFileType { .. } => {
                Notification::error("Invalid File Type", "Please select an Excel file (.xlsx or .xls)")
            }
            SimulationError::FileTooLarge { .. } => Notification::error("File Too Large", self.to_string()),
            SimulationError::Payload(_) => Notification::error("API Test Failed", self.to_string()),
        }
    }
}

/// A file picked for bulk upload. Only its metadata matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    /// Lower-case, without the dot.
    pub accepted_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_extensions: vec!["xlsx".to_string(), "xls".to_string()],
        }
    }
}

impl UploadPolicy {
    /// Spreadsheet MIME types pass regardless of the file name.
    pub fn validate(&self, file: &UploadFile) -> Result<(), SimulationError> {
        let is_sheet = file.mime_type.as_deref().is_some_and(|m| m.contains("sheet"));
        let extension = file
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let accepted = extension.is_some_and(|ext| self.accepted_extensions.iter().any(|a| *a == ext));

        if !is_sheet && !accepted {
            return Err(SimulationError::InvalidFileType { name: file.name.clone() });
        }
        if file.size_bytes > self.max_bytes {
            return Err(SimulationError::FileTooLarge {
                name: file.name.clone(),
                size: file.size_bytes,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// `12.3`
pub fn size_in_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Log entry and toast for an upload whose outcome is already decided.
pub fn upload_report(
    file: &UploadFile,
    module_title: &str,
    outcome: Outcome,
    now: DateTime<Utc>,
) -> (LogEntry, Notification) {
    let (status, message) = match outcome {
        Outcome::Success => (LogStatus::Success, format!("Successfully processed {}", file.name)),
        Outcome::Failure => (LogStatus::Error, format!("Failed to process {}", file.name)),
    };

    let entry = LogEntry::new(
        LogKind::Bulk,
        format!("{} - Bulk Upload", module_title),
        status,
        message.clone(),
        now,
    )
    .with_details(format!(
        "File: {}\nSize: {} KB\nModule: {}",
        file.name,
        size_in_kb(file.size_bytes),
        module_title
    ));

    let notification = match outcome {
        Outcome::Success => Notification::info("Upload Successful", message),
        Outcome::Failure => Notification::error("Upload Failed", message),
    };
    (entry, notification)
}

pub fn download_sample(module_id: &str) -> Notification {
    tracing::debug!(module_id, "Sample excel requested");
    Notification::info("Downloading Sample Excel", "Sample file download started")
}

pub fn download_template(module_id: &str) -> Notification {
    tracing::debug!(module_id, "Upload template requested");
    Notification::info("Downloading Template", "Template file download started")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Severity;

    #[test]
    fn test_accepts_excel_files() {
        let policy = UploadPolicy::default();
        assert!(policy.validate(&UploadFile::new("orders.xlsx", 2048)).is_ok());
        assert!(policy.validate(&UploadFile::new("ORDERS.XLS", 2048)).is_ok());
        assert!(policy
            .validate(
                &UploadFile::new("export", 2048)
                    .with_mime_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            )
            .is_ok());
    }

    #[test]
    fn test_rejects_other_files() {
        let policy = UploadPolicy::default();
        let err = policy.validate(&UploadFile::new("orders.csv", 10)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidFileType { .. }));
        assert_eq!(err.notification().title, "Invalid File Type");

        let err = policy.validate(&UploadFile::new("xlsx", 10)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidFileType { .. }));
    }

    #[test]
    fn test_rejects_large_files() {
        let policy = UploadPolicy { max_bytes: 1024, ..UploadPolicy::default() };
        let err = policy.validate(&UploadFile::new("orders.xlsx", 1025)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::FileTooLarge { name: "orders.xlsx".to_string(), size: 1025, limit: 1024 }
        );
    }

    #[test]
    fn test_upload_report() {
        let file = UploadFile::new("products.xlsx", 12_646);

        let (entry, note) = upload_report(&file, "Order Fulfilment", Outcome::Success, Utc::now());
        assert_eq!(entry.operation, "Order Fulfilment - Bulk Upload");
        assert_eq!(entry.status, LogStatus::Success);
        assert_eq!(
            entry.details.as_deref(),
            Some("File: products.xlsx\nSize: 12.3 KB\nModule: Order Fulfilment")
        );
        assert_eq!(note.title, "Upload Successful");

        let (entry, note) = upload_report(&file, "Order Fulfilment", Outcome::Failure, Utc::now());
        assert_eq!(entry.message, "Failed to process products.xlsx");
        assert_eq!(note.severity, Severity::Error);
    }

    #[test]
    fn test_downloads_only_notify() {
        assert_eq!(download_sample("variant-update").title, "Downloading Sample Excel");
        assert_eq!(download_template("variant-update").message, "Template file download started");
    }
}
