use serde::Serialize;

use super::model::{LearningModule, ProgressStatus};

// ============================================================================
// Module Summary - Completion and key metrics for one module
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Done,
    Active,
    Pending,
}

impl From<ProgressStatus> for Badge {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::Completed => Badge::Done,
            ProgressStatus::InProgress => Badge::Active,
            ProgressStatus::NotStarted => Badge::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioBadge {
    pub title: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub module_title: String,
    pub completed: usize,
    pub total: usize,
    pub completion_percentage: u8,
    pub metrics: Vec<KeyMetric>,
    pub scenarios: Vec<ScenarioBadge>,
}

impl ModuleSummary {
    /// "N of M scenarios completed"
    pub fn completion_text(&self) -> String {
        format!("{} of {} scenarios completed", self.completed, self.total)
    }
}

pub fn summarize(module: &LearningModule) -> ModuleSummary {
    let total = module.scenarios.len();
    let completed = module
        .scenarios
        .iter()
        .filter(|s| s.status == ProgressStatus::Completed)
        .count();

    ModuleSummary {
        module_title: module.title.clone(),
        completed,
        total,
        completion_percentage: completion_percentage(completed, total),
        metrics: key_metrics(&module.id),
        scenarios: module
            .scenarios
            .iter()
            .map(|s| ScenarioBadge { title: s.title.clone(), badge: s.status.into() })
            .collect(),
    }
}

/// Rounded, half away from zero. A module without scenarios is at 0%.
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Static per-module figures shown under "Key Metrics".
pub fn key_metrics(module_id: &str) -> Vec<KeyMetric> {
    let pairs: &[(&'static str, u32)] = match module_id {
        "advert-variant-creation" => &[
            ("SKUs created", 127),
            ("Single product variants", 89),
            ("Product-variant groups", 38),
        ],
        "variant-update" => &[
            ("SKUs created", 156),
            ("SKUs having stock", 142),
            ("SKUs having wholesale price", 138),
            ("SKUs marked as EOL", 23),
            ("SKUs having images", 134),
        ],
        "order-fulfilment" => &[
            ("Orders created", 84),
            ("Order invoices queried", 76),
            ("Orders acknowledged", 81),
            ("Orders dispatched", 79),
            ("Orders delivered", 74),
        ],
        "order-cancellations" => &[
            ("Orders created", 67),
            ("Orders acknowledged", 63),
            ("Pre-dispatch cancellations", 12),
            ("Post-dispatch cancellations", 5),
        ],
        "returns-refunds" => &[
            ("Orders created", 92),
            ("Orders acknowledged", 89),
            ("Orders delivered", 85),
            ("Returns raised", 18),
            ("Refunds accepted", 14),
            ("Refunds denied", 2),
            ("Partial refunds done", 7),
        ],
        "invoice-credit-flows" => &[
            ("Invoices generated", 156),
            ("Credit notes processed", 23),
        ],
        _ => &[],
    };

    pairs
        .iter()
        .map(|&(label, value)| KeyMetric { label, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;

    #[test]
    fn test_completion_percentage_rounds() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn test_summarize_fixture_module() {
        let catalog = Catalog::fixture();
        let module = catalog.module("order-fulfilment").unwrap();

        let summary = summarize(module);

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completion_percentage, 25);
        assert_eq!(summary.completion_text(), "1 of 4 scenarios completed");
        assert_eq!(summary.metrics.len(), 5);
        assert_eq!(summary.scenarios[0].badge, Badge::Done);
        assert_eq!(summary.scenarios[1].badge, Badge::Active);
        assert_eq!(summary.scenarios[2].badge, Badge::Pending);
    }

    #[test]
    fn test_unknown_module_has_no_metrics() {
        assert!(key_metrics("product-catalog").is_empty());
        assert_eq!(key_metrics("returns-refunds")[3], KeyMetric { label: "Returns raised", value: 18 });
    }
}
