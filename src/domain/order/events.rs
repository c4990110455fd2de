use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{FulfilmentStage, OrderId};

// ============================================================================
// Order Events - Domain Events for the Order Record
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Created(OrderCreated),
    Acknowledged(OrderAcknowledged),
    Dispatched(OrderDispatched),
    Delivered(OrderDelivered),
    Cancelled(OrderCancelled),
    RefundRaised(OrderRefundRaised),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created(_) => "OrderCreated",
            OrderEvent::Acknowledged(_) => "OrderAcknowledged",
            OrderEvent::Dispatched(_) => "OrderDispatched",
            OrderEvent::Delivered(_) => "OrderDelivered",
            OrderEvent::Cancelled(_) => "OrderCancelled",
            OrderEvent::RefundRaised(_) => "OrderRefundRaised",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Created - Initial event in order lifecycle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub order_type: String,
    pub created_at: DateTime<Utc>,
}

/// Order Acknowledged - Seller accepted the order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderAcknowledged {
    pub acknowledged_at: DateTime<Utc>,
}

/// Order Dispatched - Handed to the carrier
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderDispatched {
    pub dispatched_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderDelivered {
    pub delivered_at: DateTime<Utc>,
}

/// Order Cancelled - Order lifecycle ended
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderCancelled {
    pub cancelled_at: DateTime<Utc>,
    pub stage: FulfilmentStage,
}

/// Return initiated on a delivered order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderRefundRaised {
    pub raised_at: DateTime<Utc>,
}
