use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for the simulator
// ============================================================================
//
// Counts what happened during a session:
// - Orders created, by starting stage
// - Order transitions accepted and rejected, by action
// - Simulated bulk uploads and API tests, by outcome
//
// Nothing scrapes these; `render()` produces the text exposition format
// for the end-of-session summary.
// ============================================================================

pub struct PortalMetrics {
    registry: Registry,

    // Order Lifecycle Metrics
    pub orders_created: IntCounterVec,
    pub order_transitions: IntCounterVec,
    pub order_transitions_rejected: IntCounterVec,

    // Simulation Metrics
    pub simulated_uploads: IntCounterVec,
    pub simulated_api_tests: IntCounterVec,
}

impl PortalMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounterVec::new(
            Opts::new("orders_created_total", "Total mock orders created"),
            &["preset"],
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new("order_transitions_total", "Order transitions applied"),
            &["action"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        let order_transitions_rejected = IntCounterVec::new(
            Opts::new("order_transitions_rejected_total", "Order transitions rejected as invalid"),
            &["action"],
        )?;
        registry.register(Box::new(order_transitions_rejected.clone()))?;

        let simulated_uploads = IntCounterVec::new(
            Opts::new("simulated_uploads_total", "Simulated bulk uploads"),
            &["outcome"],
        )?;
        registry.register(Box::new(simulated_uploads.clone()))?;

        let simulated_api_tests = IntCounterVec::new(
            Opts::new("simulated_api_tests_total", "Simulated API tests"),
            &["outcome"],
        )?;
        registry.register(Box::new(simulated_api_tests.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_transitions,
            order_transitions_rejected,
            simulated_uploads,
            simulated_api_tests,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_created(&self, preset: &str) {
        self.orders_created.with_label_values(&[preset]).inc();
    }

    pub fn record_transition(&self, action: &str, accepted: bool) {
        if accepted {
            self.order_transitions.with_label_values(&[action]).inc();
        } else {
            self.order_transitions_rejected.with_label_values(&[action]).inc();
        }
    }

    pub fn record_upload(&self, outcome: &str) {
        self.simulated_uploads.with_label_values(&[outcome]).inc();
    }

    pub fn record_api_test(&self, outcome: &str) {
        self.simulated_api_tests.with_label_values(&[outcome]).inc();
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
