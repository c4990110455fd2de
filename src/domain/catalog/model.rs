use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Catalog Model - Learning modules and their scenarios
// ============================================================================

/// Every scenario the portal knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    AvcSingle,
    AvcMultiple,
    VuStocks,
    VuWholesale,
    VuEol,
    VuImages,
    OfQuery,
    OfAcknowledgement,
    OfDispatch,
    OfDelivery,
    OcPredispatch,
    OcPostdispatch,
    RrAccept,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 13] = [
        ScenarioId::AvcSingle,
        ScenarioId::AvcMultiple,
        ScenarioId::VuStocks,
        ScenarioId::VuWholesale,
        ScenarioId::VuEol,
        ScenarioId::VuImages,
        ScenarioId::OfQuery,
        ScenarioId::OfAcknowledgement,
        ScenarioId::OfDispatch,
        ScenarioId::OfDelivery,
        ScenarioId::OcPredispatch,
        ScenarioId::OcPostdispatch,
        ScenarioId::RrAccept,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioId::AvcSingle => "avc-single",
            ScenarioId::AvcMultiple => "avc-multiple",
            ScenarioId::VuStocks => "vu-stocks",
            ScenarioId::VuWholesale => "vu-wholesale",
            ScenarioId::VuEol => "vu-eol",
            ScenarioId::VuImages => "vu-images",
            ScenarioId::OfQuery => "of-query",
            ScenarioId::OfAcknowledgement => "of-acknowledgement",
            ScenarioId::OfDispatch => "of-dispatch",
            ScenarioId::OfDelivery => "of-delivery",
            ScenarioId::OcPredispatch => "oc-predispatch",
            ScenarioId::OcPostdispatch => "oc-postdispatch",
            ScenarioId::RrAccept => "rr-accept",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioId {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "Not Started",
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub description: String,
    /// `mm:ss`
    pub duration: String,
    pub url: Option<String>,
}

impl VideoInfo {
    pub fn new(title: &str, description: &str, duration: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            duration: duration.to_string(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: String,
    pub status: ProgressStatus,
    pub estimated_time: String,
    pub video: VideoInfo,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningModule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProgressStatus,
    /// Percentage shown on the module header, 0..=100.
    pub progress: u8,
    pub estimated_time: String,
    pub video: VideoInfo,
    pub notes: Vec<String>,
    pub scenarios: Vec<Scenario>,
}

impl LearningModule {
    pub fn scenario(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}
