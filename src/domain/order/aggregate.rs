use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::Aggregate;
use super::value_objects::{FulfilmentStage, OrderId, OrderStatus};
use super::events::*;
use super::commands::{OrderAction, OrderCommand};
use super::errors::OrderError;

// ============================================================================
// Order Record - Domain Logic
// ============================================================================
//
// Fields are private: the only ways to obtain or change a record are the
// creation and transition operations below, so the flag invariants
// (dispatched => acknowledged, delivered => dispatched, cancellation is
// terminal) and the immutability of `created_at` hold for every record.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    id: OrderId,
    version: i64,
    order_type: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Build a new record starting at `preset`.
    pub fn create(
        id: OrderId,
        order_type: impl Into<String>,
        preset: FulfilmentStage,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        Self::create_with_events(id, order_type, preset, created_at).map(|(record, _)| record)
    }

    /// Like [`OrderRecord::create`], also returning the events that built the
    /// record. A preset order gets the full history (created, acknowledged,
    /// dispatched) stamped with the creation time.
    pub fn create_with_events(
        id: OrderId,
        order_type: impl Into<String>,
        preset: FulfilmentStage,
        created_at: DateTime<Utc>,
    ) -> Result<(Self, Vec<OrderEvent>), OrderError> {
        let mut events = vec![OrderEvent::Created(OrderCreated {
            order_id: id,
            order_type: order_type.into(),
            created_at,
        })];
        if preset >= FulfilmentStage::Acknowledged {
            events.push(OrderEvent::Acknowledged(OrderAcknowledged { acknowledged_at: created_at }));
        }
        if preset >= FulfilmentStage::Dispatched {
            events.push(OrderEvent::Dispatched(OrderDispatched { dispatched_at: created_at }));
        }

        let mut record = Self::apply_first_event(&events[0])?;
        for event in &events[1..] {
            record.apply_event(event)?;
        }

        Ok((record, events))
    }

    /// Validate `command` and return the next state with the events that
    /// produced it. `self` is left untouched.
    pub fn execute(&self, command: &OrderCommand) -> Result<(Self, Vec<OrderEvent>), OrderError> {
        let events = self.handle_command(command)?;
        let mut next = self.clone();
        for event in &events {
            next.apply_event(event)?;
        }
        Ok((next, events))
    }

    pub fn acknowledge(&self) -> Result<Self, OrderError> {
        self.execute(&OrderCommand::Acknowledge).map(|(next, _)| next)
    }

    pub fn dispatch(&self) -> Result<Self, OrderError> {
        self.execute(&OrderCommand::Dispatch).map(|(next, _)| next)
    }

    pub fn deliver(&self) -> Result<Self, OrderError> {
        self.execute(&OrderCommand::Deliver).map(|(next, _)| next)
    }

    pub fn cancel(&self) -> Result<Self, OrderError> {
        self.execute(&OrderCommand::Cancel).map(|(next, _)| next)
    }

    /// Flags are unchanged; only the version moves.
    pub fn raise_refund(&self) -> Result<Self, OrderError> {
        self.execute(&OrderCommand::RaiseRefund).map(|(next, _)| next)
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn order_type(&self) -> &str {
        &self.order_type
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn acknowledged(&self) -> bool {
        self.status.is_acknowledged()
    }

    pub fn dispatched(&self) -> bool {
        self.status.is_dispatched()
    }

    pub fn delivered(&self) -> bool {
        self.status.is_delivered()
    }

    pub fn cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    fn reject(&self, action: OrderAction) -> OrderError {
        OrderError::InvalidTransition {
            order_id: self.id.clone(),
            action,
            status: self.status,
        }
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderRecord {
    type Id = OrderId;
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Created(e) => Ok(Self {
                id: e.order_id.clone(),
                version: 1,
                order_type: e.order_type.clone(),
                status: OrderStatus::Pending,
                created_at: e.created_at,
                updated_at: e.created_at,
            }),
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        self.version += 1;

        match event {
            OrderEvent::Created(_) => {
                // First event already applied
            }
            OrderEvent::Acknowledged(e) => {
                self.status = OrderStatus::Acknowledged;
                self.updated_at = e.acknowledged_at;
            }
            OrderEvent::Dispatched(e) => {
                self.status = OrderStatus::Dispatched;
                self.updated_at = e.dispatched_at;
            }
            OrderEvent::Delivered(e) => {
                self.status = OrderStatus::Delivered;
                self.updated_at = e.delivered_at;
            }
            OrderEvent::Cancelled(e) => {
                self.status = OrderStatus::Cancelled { stage: e.stage };
                self.updated_at = e.cancelled_at;
            }
            OrderEvent::RefundRaised(e) => {
                self.updated_at = e.raised_at;
            }
        }

        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let now = Utc::now();

        match command {
            OrderCommand::CreateOrder { .. } => Err(self.reject(OrderAction::Create)),

            OrderCommand::Acknowledge => match self.status {
                OrderStatus::Pending => Ok(vec![OrderEvent::Acknowledged(OrderAcknowledged {
                    acknowledged_at: now,
                })]),
                _ => Err(self.reject(OrderAction::Acknowledge)),
            },

            OrderCommand::Dispatch => match self.status {
                OrderStatus::Acknowledged => Ok(vec![OrderEvent::Dispatched(OrderDispatched {
                    dispatched_at: now,
                })]),
                _ => Err(self.reject(OrderAction::Dispatch)),
            },

            OrderCommand::Deliver => match self.status {
                OrderStatus::Dispatched => Ok(vec![OrderEvent::Delivered(OrderDelivered {
                    delivered_at: now,
                })]),
                _ => Err(self.reject(OrderAction::Deliver)),
            },

            OrderCommand::Cancel => {
                let stage = match self.status {
                    OrderStatus::Pending => FulfilmentStage::Pending,
                    OrderStatus::Acknowledged => FulfilmentStage::Acknowledged,
                    OrderStatus::Dispatched => FulfilmentStage::Dispatched,
                    OrderStatus::Delivered | OrderStatus::Cancelled { .. } => {
                        return Err(self.reject(OrderAction::Cancel))
                    }
                };

                Ok(vec![OrderEvent::Cancelled(OrderCancelled {
                    cancelled_at: now,
                    stage,
                })])
            }

            OrderCommand::RaiseRefund => match self.status {
                OrderStatus::Delivered => Ok(vec![OrderEvent::RefundRaised(OrderRefundRaised {
                    raised_at: now,
                })]),
                _ => Err(self.reject(OrderAction::RaiseRefund)),
            },
        }
    }

    fn aggregate_id(&self) -> &OrderId {
        &self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
