use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::event_sourcing::core::Aggregate;
use crate::metrics::PortalMetrics;
use crate::notifications::{Notification, NotificationSink};

use super::aggregate::OrderRecord;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::store::OrderStore;
use super::value_objects::{FulfilmentStage, OrderId, OrderStatus, OrderTemplate};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command → Order Record → Events → Order Store → Sink
//
// Owns the store. Every command runs to completion synchronously; a
// rejected command leaves the store exactly as it was and produces an
// error notification instead of a success one.
//
// ============================================================================

pub struct OrderCommandHandler {
    store: OrderStore,
    sink: Arc<dyn NotificationSink>,
    metrics: Option<Arc<PortalMetrics>>,
}

impl OrderCommandHandler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            store: OrderStore::new(),
            sink,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<PortalMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Read-only access for views and presenters
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn create_order(&mut self, template: OrderTemplate) -> Result<OrderId, OrderError> {
        self.create(template.order_type(), template.preset())
    }

    /// Create an order of free-text `order_type` starting at `preset`.
    pub fn create(&mut self, order_type: &str, preset: FulfilmentStage) -> Result<OrderId, OrderError> {
        let (order_id, created_at) = self.store.next_order_id(Utc::now());
        let command = OrderCommand::CreateOrder {
            order_id: order_id.clone(),
            order_type: order_type.to_string(),
            preset,
            created_at,
        };

        self.handle(&order_id, command).map(|_| order_id)
    }

    pub fn acknowledge(&mut self, order_id: &OrderId) -> Result<i64, OrderError> {
        self.handle(order_id, OrderCommand::Acknowledge)
    }

    pub fn dispatch(&mut self, order_id: &OrderId) -> Result<i64, OrderError> {
        self.handle(order_id, OrderCommand::Dispatch)
    }

    pub fn deliver(&mut self, order_id: &OrderId) -> Result<i64, OrderError> {
        self.handle(order_id, OrderCommand::Deliver)
    }

    pub fn cancel(&mut self, order_id: &OrderId) -> Result<i64, OrderError> {
        self.handle(order_id, OrderCommand::Cancel)
    }

    pub fn raise_refund(&mut self, order_id: &OrderId) -> Result<i64, OrderError> {
        self.handle(order_id, OrderCommand::RaiseRefund)
    }

    /// Handle a command, commit the resulting events and notify.
    /// Returns the order's version after the command.
    pub fn handle(&mut self, order_id: &OrderId, command: OrderCommand) -> Result<i64, OrderError> {
        let action = command.action();

        match self.apply(order_id, &command) {
            Ok(version) => {
                tracing::info!(
                    order_id = %order_id,
                    action = %action,
                    version,
                    "Order command applied"
                );

                if let Some(metrics) = &self.metrics {
                    match &command {
                        OrderCommand::CreateOrder { preset, .. } => metrics.record_order_created(preset.as_str()),
                        _ => metrics.record_transition(action.as_str(), true),
                    }
                }

                let notification = self.success_notification(order_id, &command);
                self.sink.notify(&notification);
                Ok(version)
            }
            Err(error) => {
                tracing::warn!(
                    order_id = %order_id,
                    action = %action,
                    error = %error,
                    "Order command rejected"
                );

                if let Some(metrics) = &self.metrics {
                    metrics.record_transition(action.as_str(), false);
                }

                self.sink.notify(&Notification::error("Action Not Allowed", error.to_string()));
                Err(error)
            }
        }
    }

    fn apply(&mut self, order_id: &OrderId, command: &OrderCommand) -> Result<i64, OrderError> {
        let correlation_id = Uuid::new_v4();

        if let OrderCommand::CreateOrder { order_id, order_type, preset, created_at } = command {
            let (record, events) =
                OrderRecord::create_with_events(order_id.clone(), order_type.as_str(), *preset, *created_at)?;
            return self.store.commit_created(record, events, correlation_id);
        }

        let current = self
            .store
            .get(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.clone()))?;
        let expected_version = current.version();

        let (next, events) = current.execute(command)?;
        self.store.commit_transition(next, events, expected_version, correlation_id)
    }

    fn success_notification(&self, order_id: &OrderId, command: &OrderCommand) -> Notification {
        match command {
            OrderCommand::CreateOrder { order_type, preset, .. } => match preset {
                FulfilmentStage::Pending => Notification::info(
                    "Order Created",
                    format!("{} created successfully: {}", order_type, order_id),
                ),
                FulfilmentStage::Acknowledged => Notification::info(
                    "Order Created & Acknowledged",
                    format!("Order created and acknowledged: {}", order_id),
                ),
                FulfilmentStage::Dispatched => Notification::info(
                    "Order Created, Acknowledged & Dispatched",
                    format!("Order fully processed: {}", order_id),
                ),
            },
            OrderCommand::Acknowledge => {
                Notification::info("Order Acknowledged", format!("Order {} acknowledged", order_id))
            }
            OrderCommand::Dispatch => {
                Notification::info("Order Dispatched", format!("Order {} dispatched", order_id))
            }
            OrderCommand::Deliver => {
                Notification::info("Order Delivered", format!("Order {} delivered", order_id))
            }
            OrderCommand::Cancel => {
                let when = match self.store.get(order_id).map(OrderRecord::status) {
                    Some(OrderStatus::Cancelled { stage: FulfilmentStage::Pending }) => "pre-dispatch",
                    _ => "post-dispatch",
                };
                Notification::info("Order Cancelled", format!("Order {} cancelled ({})", order_id, when))
            }
            OrderCommand::RaiseRefund => {
                Notification::info("Refund Raised", format!("Return initiated for order {}", order_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::commands::OrderAction;
    use crate::domain::order::views;
    use crate::notifications::{RecordingSink, Severity};

    fn handler() -> (OrderCommandHandler, Arc<RecordingSink>, Arc<PortalMetrics>) {
        let sink = Arc::new(RecordingSink::new());
        let metrics = Arc::new(PortalMetrics::new().unwrap());
        let handler = OrderCommandHandler::new(sink.clone()).with_metrics(metrics.clone());
        (handler, sink, metrics)
    }

    #[test]
    fn test_create_order_notifies_and_inserts() {
        let (mut handler, sink, metrics) = handler();

        let id = handler.create_order(OrderTemplate::SingleItem).unwrap();

        assert_eq!(handler.store().len(), 1);
        assert_eq!(handler.store().all()[0].id(), &id);
        let note = sink.last().unwrap();
        assert_eq!(note.title, "Order Created");
        assert_eq!(note.message, format!("Single item order created successfully: {}", id));
        assert_eq!(metrics.orders_created.with_label_values(&["pending"]).get(), 1);
    }

    #[test]
    fn test_create_preset_orders() {
        let (mut handler, sink, _) = handler();

        let acknowledged = handler.create_order(OrderTemplate::Acknowledged).unwrap();
        assert_eq!(sink.last().unwrap().title, "Order Created & Acknowledged");

        let dispatched = handler.create_order(OrderTemplate::Dispatched).unwrap();
        assert_eq!(sink.last().unwrap().message, format!("Order fully processed: {}", dispatched));

        let store = handler.store();
        assert_eq!(store.get(&acknowledged).unwrap().status(), OrderStatus::Acknowledged);
        assert_eq!(store.get(&dispatched).unwrap().status(), OrderStatus::Dispatched);
        assert_eq!(store.history(&dispatched).len(), 3);
    }

    #[test]
    fn test_full_lifecycle_through_handler() {
        let (mut handler, sink, metrics) = handler();
        let id = handler.create_order(OrderTemplate::MultipleItems).unwrap();

        assert_eq!(handler.acknowledge(&id).unwrap(), 2);
        assert_eq!(handler.dispatch(&id).unwrap(), 3);
        assert_eq!(handler.deliver(&id).unwrap(), 4);
        assert_eq!(handler.raise_refund(&id).unwrap(), 5);

        assert_eq!(sink.len(), 5);
        assert_eq!(sink.last().unwrap().message, format!("Return initiated for order {}", id));
        assert_eq!(metrics.order_transitions.with_label_values(&["deliver"]).get(), 1);
    }

    #[test]
    fn test_rejected_command_leaves_store_unchanged() {
        let (mut handler, sink, metrics) = handler();
        let id = handler.create_order(OrderTemplate::SingleItem).unwrap();
        let before = handler.store().get(&id).unwrap().clone();

        let result = handler.dispatch(&id);

        assert!(matches!(
            result.unwrap_err(),
            OrderError::InvalidTransition { action: OrderAction::Dispatch, .. }
        ));
        assert_eq!(handler.store().get(&id).unwrap(), &before);
        assert_eq!(handler.store().journal().len(), 1);

        let note = sink.last().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.title, "Action Not Allowed");
        assert_eq!(metrics.order_transitions_rejected.with_label_values(&["dispatch"]).get(), 1);
    }

    #[test]
    fn test_unknown_order_is_rejected_with_notification() {
        let (mut handler, sink, _) = handler();

        let result = handler.acknowledge(&OrderId::new("ORD-404"));

        assert!(matches!(result.unwrap_err(), OrderError::OrderNotFound(_)));
        assert_eq!(sink.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_cancel_notification_names_stage() {
        let (mut handler, sink, _) = handler();

        let pre = handler.create_order(OrderTemplate::SingleItem).unwrap();
        handler.cancel(&pre).unwrap();
        assert!(sink.last().unwrap().message.ends_with("(pre-dispatch)"));

        let post = handler.create_order(OrderTemplate::Dispatched).unwrap();
        handler.cancel(&post).unwrap();
        assert!(sink.last().unwrap().message.ends_with("(post-dispatch)"));
    }

    #[test]
    fn test_refund_is_notification_only() {
        let (mut handler, sink, _) = handler();
        let id = handler.create_order(OrderTemplate::Dispatched).unwrap();
        handler.deliver(&id).unwrap();
        let delivered = handler.store().get(&id).unwrap().clone();

        handler.raise_refund(&id).unwrap();
        handler.raise_refund(&id).unwrap();

        let after = handler.store().get(&id).unwrap();
        assert_eq!(after.status(), delivered.status());
        assert!(after.delivered() && !after.cancelled());
        assert_eq!(sink.last().unwrap().title, "Refund Raised");

        let raised = handler
            .store()
            .history(&id)
            .iter()
            .filter(|e| e.event_type == "OrderRefundRaised")
            .count();
        assert_eq!(raised, 2);
    }

    #[test]
    fn test_views_follow_transitions() {
        let (mut handler, _, _) = handler();
        let id = handler.create_order(OrderTemplate::SingleItem).unwrap();
        assert_eq!(views::pending_acknowledgement(handler.store().all()).len(), 1);

        handler.acknowledge(&id).unwrap();
        assert!(views::pending_acknowledgement(handler.store().all()).is_empty());
        assert_eq!(views::awaiting_dispatch(handler.store().all()).len(), 1);
    }
}
