use super::model::{LearningModule, ProgressStatus, Scenario, ScenarioId, VideoInfo};

// ============================================================================
// Catalog Fixture - The static module list the portal starts with
// ============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<LearningModule>,
}

impl Catalog {
    pub fn new(modules: Vec<LearningModule>) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &[LearningModule] {
        &self.modules
    }

    /// Module by id. Unknown ids fall back to the first module; `None` only
    /// when the catalog is empty.
    pub fn module(&self, id: &str) -> Option<&LearningModule> {
        self.modules
            .iter()
            .find(|m| m.id == id)
            .or_else(|| self.modules.first())
    }

    /// The module that owns `scenario`, with the scenario itself.
    pub fn locate(&self, scenario: ScenarioId) -> Option<(&LearningModule, &Scenario)> {
        self.modules
            .iter()
            .find_map(|m| m.scenario(scenario).map(|s| (m, s)))
    }

    /// Six modules, thirteen scenarios.
    pub fn fixture() -> Self {
        Self::new(vec![
            module(
                "advert-variant-creation",
                "Advert & Variant Creation",
                "Create adverts with one or many variants",
                ProgressStatus::InProgress,
                50,
                "25 min",
                VideoInfo::new(
                    "Advert & Variant Creation Tutorial",
                    "How adverts, variants and MPNs fit together.",
                    "12:40",
                ),
                vec![
                    scenario(
                        ScenarioId::AvcSingle,
                        "Create advert with a single variant",
                        ProgressStatus::Completed,
                        "10 min",
                        "05:20",
                        &["Each advert needs at least one variant", "Variant MPN must be unique per advert"],
                    ),
                    scenario(
                        ScenarioId::AvcMultiple,
                        "Create advert with multiple variants",
                        ProgressStatus::InProgress,
                        "15 min",
                        "07:20",
                        &["Variants of one advert share the advert name"],
                    ),
                ],
            ),
            module(
                "variant-update",
                "Variant Update",
                "Keep stock, prices, lifecycle and images current",
                ProgressStatus::NotStarted,
                0,
                "40 min",
                VideoInfo::new(
                    "Variant Update Tutorial",
                    "Updating stock counts, wholesale prices, EOL flags and images.",
                    "16:05",
                ),
                vec![
                    scenario(
                        ScenarioId::VuStocks,
                        "Update stock levels",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "04:10",
                        &["Variants with no stock are listed first"],
                    ),
                    scenario(
                        ScenarioId::VuWholesale,
                        "Update wholesale prices",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "03:55",
                        &["Variants with no wholesale price are listed first"],
                    ),
                    scenario(
                        ScenarioId::VuEol,
                        "Mark variants as end of life",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "03:30",
                        &[],
                    ),
                    scenario(
                        ScenarioId::VuImages,
                        "Upload variant images",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "04:30",
                        &["Images are uploaded per variant, not per advert"],
                    ),
                ],
            ),
            module(
                "order-fulfilment",
                "Order Fulfilment",
                "Acknowledge, dispatch and deliver marketplace orders",
                ProgressStatus::InProgress,
                25,
                "45 min",
                VideoInfo::new(
                    "Order Fulfilment Tutorial",
                    "The order lifecycle from creation to delivery.",
                    "18:20",
                ),
                vec![
                    scenario(
                        ScenarioId::OfQuery,
                        "Query order invoices",
                        ProgressStatus::Completed,
                        "5 min",
                        "03:15",
                        &["Invoices are queried by marketplace order invoice id"],
                    ),
                    scenario(
                        ScenarioId::OfAcknowledgement,
                        "Acknowledge orders",
                        ProgressStatus::InProgress,
                        "15 min",
                        "06:00",
                        &[
                            "Orders must be acknowledged before they can be dispatched",
                            "The newest unacknowledged orders are shown first",
                        ],
                    ),
                    scenario(
                        ScenarioId::OfDispatch,
                        "Dispatch orders",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "04:45",
                        &["Only acknowledged orders can be dispatched"],
                    ),
                    scenario(
                        ScenarioId::OfDelivery,
                        "Confirm delivery",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "04:20",
                        &["Only dispatched orders can be delivered"],
                    ),
                ],
            ),
            module(
                "order-cancellations",
                "Order Cancellations",
                "Cancel orders before and after dispatch",
                ProgressStatus::NotStarted,
                0,
                "20 min",
                VideoInfo::new(
                    "Order Cancellations Tutorial",
                    "Pre-dispatch and post-dispatch cancellation flows.",
                    "09:50",
                ),
                vec![
                    scenario(
                        ScenarioId::OcPredispatch,
                        "Pre-dispatch cancellation",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "04:40",
                        &["A cancelled order cannot be acknowledged or dispatched"],
                    ),
                    scenario(
                        ScenarioId::OcPostdispatch,
                        "Post-dispatch cancellation",
                        ProgressStatus::NotStarted,
                        "10 min",
                        "05:10",
                        &["Delivered orders can no longer be cancelled"],
                    ),
                ],
            ),
            module(
                "returns-refunds",
                "Returns & Refunds",
                "Raise returns and accept refunds for delivered orders",
                ProgressStatus::NotStarted,
                0,
                "15 min",
                VideoInfo::new(
                    "Returns & Refunds Tutorial",
                    "Handling returns for delivered orders.",
                    "08:25",
                ),
                vec![scenario(
                    ScenarioId::RrAccept,
                    "Accept refund",
                    ProgressStatus::NotStarted,
                    "15 min",
                    "08:25",
                    &["Refunds can only be raised against delivered orders"],
                )],
            ),
            module(
                "invoice-credit-flows",
                "Invoice & Credit Flows",
                "Invoices and credit notes for completed orders",
                ProgressStatus::NotStarted,
                0,
                "20 min",
                VideoInfo::new(
                    "Invoice & Credit Flows Tutorial",
                    "Generating invoices and processing credit notes.",
                    "11:10",
                ),
                Vec::new(),
            ),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fixture()
    }
}

#[allow(clippy::too_many_arguments)]
fn module(
    id: &str,
    title: &str,
    description: &str,
    status: ProgressStatus,
    progress: u8,
    estimated_time: &str,
    video: VideoInfo,
    scenarios: Vec<Scenario>,
) -> LearningModule {
    LearningModule {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        progress,
        estimated_time: estimated_time.to_string(),
        video,
        notes: Vec::new(),
        scenarios,
    }
}

fn scenario(
    id: ScenarioId,
    title: &str,
    status: ProgressStatus,
    estimated_time: &str,
    duration: &str,
    notes: &[&str],
) -> Scenario {
    Scenario {
        id,
        title: title.to_string(),
        status,
        estimated_time: estimated_time.to_string(),
        video: VideoInfo::new(title, &format!("Walkthrough: {}", title.to_lowercase()), duration),
        notes: notes.iter().map(|n| n.to_string()).collect(),
    }
}
