use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::activity::ActivityLog;
use crate::config::SimulationConfig;
use crate::domain::catalog::{summarize, Catalog, LearningModule, ModuleSummary, ModuleTimer, ScenarioId};
use crate::domain::order::{OrderCommandHandler, OrderError, OrderId, OrderStore};
use crate::metrics::PortalMetrics;
use crate::notifications::NotificationSink;
use crate::presenter::{self, ActionKind, Presentation};
use crate::simulation::api::{self, ApiTemplate};
use crate::simulation::upload::{self, SimulationError, UploadFile, UploadPolicy};
use crate::simulation::{Outcome, OutcomeDecider};

// ============================================================================
// Portal Session
// ============================================================================
//
// One signed-in session: the module catalog, the order simulator, the
// activity log and the simulated integrations, plus which module and
// scenario are on screen.
//
// ============================================================================

pub struct Portal {
    catalog: Catalog,
    orders: OrderCommandHandler,
    activity: ActivityLog,
    timer: ModuleTimer,
    decider: Box<dyn OutcomeDecider>,
    sink: Arc<dyn NotificationSink>,
    metrics: Arc<PortalMetrics>,
    upload_policy: UploadPolicy,
    upload_success_rate: f64,
    api_success_rate: f64,
    active_module: String,
    active_scenario: Option<ScenarioId>,
}

impl Portal {
    pub fn new(
        settings: &SimulationConfig,
        sink: Arc<dyn NotificationSink>,
        decider: Box<dyn OutcomeDecider>,
        metrics: Arc<PortalMetrics>,
    ) -> Self {
        let catalog = Catalog::fixture();
        let active_module = catalog.modules().first().map(|m| m.id.clone()).unwrap_or_default();

        Self {
            orders: OrderCommandHandler::new(sink.clone()).with_metrics(metrics.clone()),
            catalog,
            activity: ActivityLog::seeded(),
            timer: ModuleTimer::new(),
            decider,
            sink,
            metrics,
            upload_policy: settings.upload_policy(),
            upload_success_rate: settings.upload_success_rate,
            api_success_rate: settings.api_success_rate,
            active_module,
            active_scenario: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderStore {
        self.orders.store()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn metrics(&self) -> &PortalMetrics {
        &self.metrics
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn active_module(&self) -> Option<&LearningModule> {
        self.catalog.module(&self.active_module)
    }

    pub fn active_scenario(&self) -> Option<ScenarioId> {
        self.active_scenario
    }

    /// Open a module (unknown ids open the first one) and start its timer.
    pub fn select_module(&mut self, module_id: &str) -> Option<&LearningModule> {
        let resolved = self.catalog.module(module_id)?.id.clone();
        if !self.timer.is_started(&resolved) {
            self.timer.start_module(&resolved, Utc::now());
        }
        tracing::debug!(requested = module_id, module = %resolved, "Module selected");

        self.active_module = resolved;
        self.active_scenario = None;
        self.active_module()
    }

    /// Open a scenario together with the module that owns it.
    pub fn select_scenario(&mut self, scenario: ScenarioId) -> bool {
        let module_id = match self.catalog.locate(scenario) {
            Some((module, _)) => module.id.clone(),
            None => return false,
        };
        self.select_module(&module_id);
        self.active_scenario = Some(scenario);
        true
    }

    pub fn presentation(&self) -> Presentation {
        match self.active_scenario {
            Some(scenario) => presenter::present(scenario, self.orders.store()),
            None => Presentation::empty(),
        }
    }

    pub fn summary(&self) -> Option<ModuleSummary> {
        self.active_module().map(summarize)
    }

    /// Time spent in the active module; empty before it was opened.
    pub fn elapsed(&self, now: DateTime<Utc>) -> String {
        self.timer.elapsed(&self.active_module, now)
    }

    // ------------------------------------------------------------------------
    // Order simulator
    // ------------------------------------------------------------------------

    /// Run a presented button. Returns the order it touched.
    pub fn perform(&mut self, action: &ActionKind) -> Result<OrderId, OrderError> {
        match action {
            ActionKind::Create(template) => self.orders.create_order(*template),
            ActionKind::Acknowledge(id) => self.orders.acknowledge(id).map(|_| id.clone()),
            ActionKind::Dispatch(id) => self.orders.dispatch(id).map(|_| id.clone()),
            ActionKind::Deliver(id) => self.orders.deliver(id).map(|_| id.clone()),
            ActionKind::Cancel(id) => self.orders.cancel(id).map(|_| id.clone()),
            ActionKind::RaiseRefund(id) => self.orders.raise_refund(id).map(|_| id.clone()),
        }
    }

    // ------------------------------------------------------------------------
    // Simulated integrations
    // ------------------------------------------------------------------------

    pub fn upload(&mut self, file: &UploadFile) -> Result<Outcome, SimulationError> {
        if let Err(err) = self.upload_policy.validate(file) {
            tracing::warn!(file = %file.name, error = %err, "Upload refused");
            self.metrics.record_upload("rejected");
            self.sink.notify(&err.notification());
            return Err(err);
        }

        let outcome = self.decider.decide(self.upload_success_rate);
        let module_title = self.module_title();
        let (entry, notification) = upload::upload_report(file, &module_title, outcome, Utc::now());

        tracing::info!(file = %file.name, module = %module_title, outcome = outcome.as_str(), "Bulk upload simulated");
        self.metrics.record_upload(outcome.as_str());
        self.activity.record(entry);
        self.sink.notify(&notification);
        Ok(outcome)
    }

    pub fn download_sample(&self) {
        self.sink.notify(&upload::download_sample(&self.active_module));
    }

    pub fn download_template(&self) {
        self.sink.notify(&upload::download_template(&self.active_module));
    }

    /// Send `payload` to the template endpoint, in simulation.
    pub fn test_api(&mut self, payload: &Value) -> Result<Outcome, SimulationError> {
        let template = ApiTemplate::products();
        self.sink.notify(&api::test_initiated());

        let outcome = self.decider.decide(self.api_success_rate);
        let module_title = self.module_title();
        let missing = template.missing_fields(payload);
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "API test payload lacks required fields");
        }
        let (entry, notification) = api::api_test_report(&template, payload, &module_title, outcome, Utc::now())?;

        tracing::info!(endpoint = template.endpoint, module = %module_title, outcome = outcome.as_str(), "API test simulated");
        self.metrics.record_api_test(outcome.as_str());
        self.activity.record(entry);
        self.sink.notify(&notification);
        Ok(outcome)
    }

    fn module_title(&self) -> String {
        self.active_module().map(|m| m.title.clone()).unwrap_or_default()
    }
}
