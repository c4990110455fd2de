use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::activity::{LogEntry, LogKind, LogStatus};
use crate::notifications::Notification;

use super::outcome::Outcome;
use super::upload::SimulationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub description: &'static str,
}

const fn field(name: &'static str, field_type: &'static str, description: &'static str) -> ApiField {
    ApiField { name, field_type, description }
}

/// Reference request shown on the API tab of every module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiTemplate {
    pub endpoint: &'static str,
    pub method: &'static str,
    pub headers: Vec<(&'static str, &'static str)>,
    pub required_fields: Vec<ApiField>,
    pub optional_fields: Vec<ApiField>,
}

impl ApiTemplate {
    pub fn products() -> Self {
        Self {
            endpoint: "https://api.dropship-portal.com/v1/products",
            method: "POST",
            headers: vec![
                ("Content-Type", "application/json"),
                ("Authorization", "Bearer YOUR_API_KEY"),
                ("X-Client-ID", "YOUR_CLIENT_ID"),
            ],
            required_fields: vec![
                field("product_name", "string", "Name of the product"),
                field("sku", "string", "Stock Keeping Unit"),
                field("price", "number", "Product price"),
                field("category", "string", "Product category"),
                field("description", "string", "Product description"),
            ],
            optional_fields: vec![
                field("tags", "array", "Product tags"),
                field("images", "array", "Product image URLs"),
            ],
        }
    }

    /// Required fields absent from `payload`.
    pub fn missing_fields(&self, payload: &Value) -> Vec<&'static str> {
        self.required_fields
            .iter()
            .filter(|f| payload.get(f.name).is_none())
            .map(|f| f.name)
            .collect()
    }
}

pub fn sample_payload() -> Value {
    json!({
        "product_name": "Premium Wireless Headphones",
        "sku": "PWH-001",
        "price": 99.99,
        "category": "Electronics",
        "description": "High-quality wireless headphones with noise cancellation",
        "tags": ["wireless", "audio", "premium"],
        "images": [
            "https://example.com/images/headphones1.jpg",
            "https://example.com/images/headphones2.jpg"
        ]
    })
}

/// Toast shown as soon as a test is started.
pub fn test_initiated() -> Notification {
    Notification::info("API Test Initiated", "Check the logs section for results")
}

/// Log entry and toast for an API test whose outcome is already decided.
/// Required fields absent from `payload` are listed in the entry details.
pub fn api_test_report(
    template: &ApiTemplate,
    payload: &Value,
    module_title: &str,
    outcome: Outcome,
    now: DateTime<Utc>,
) -> Result<(LogEntry, Notification), SimulationError> {
    let pretty = serde_json::to_string_pretty(payload).map_err(|e| SimulationError::Payload(e.to_string()))?;

    let (status, message) = match outcome {
        Outcome::Success => (LogStatus::Success, "API test completed successfully"),
        Outcome::Failure => (LogStatus::Error, "API test failed"),
    };

    let mut details = format!("Endpoint: {}\nPayload: {}\nModule: {}", template.endpoint, pretty, module_title);
    let missing = template.missing_fields(payload);
    if !missing.is_empty() {
        details.push_str(&format!("\nMissing required fields: {}", missing.join(", ")));
    }

    let entry =
        LogEntry::new(LogKind::Api, format!("{} - API Test", module_title), status, message, now).with_details(details);

    let notification = match outcome {
        Outcome::Success => Notification::info("API Test Successful", message),
        Outcome::Failure => Notification::error("API Test Failed", message),
    };
    Ok((entry, notification))
}
