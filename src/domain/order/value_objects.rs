use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Order identifier, `ORD-<unix millis>` for ids issued by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(format!("ORD-{}", millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How far an order has progressed through fulfilment.
///
/// Also used as the starting point of a newly created order: there is no
/// way to ask for a dispatched order that skipped acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfilmentStage {
    Pending,
    Acknowledged,
    Dispatched,
}

impl FulfilmentStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfilmentStage::Pending => "pending",
            FulfilmentStage::Acknowledged => "acknowledged",
            FulfilmentStage::Dispatched => "dispatched",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Acknowledged,
    Dispatched,
    Delivered,
    /// Terminal. `stage` is where the order was when it got cancelled.
    Cancelled { stage: FulfilmentStage },
}

impl OrderStatus {
    pub fn is_acknowledged(&self) -> bool {
        match self {
            OrderStatus::Pending => false,
            OrderStatus::Acknowledged | OrderStatus::Dispatched | OrderStatus::Delivered => true,
            OrderStatus::Cancelled { stage } => *stage >= FulfilmentStage::Acknowledged,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        match self {
            OrderStatus::Dispatched | OrderStatus::Delivered => true,
            OrderStatus::Cancelled { stage } => *stage == FulfilmentStage::Dispatched,
            OrderStatus::Pending | OrderStatus::Acknowledged => false,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Acknowledged => "acknowledged",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled { .. } => "cancelled",
        }
    }
}

impl From<FulfilmentStage> for OrderStatus {
    fn from(stage: FulfilmentStage) -> Self {
        match stage {
            FulfilmentStage::Pending => OrderStatus::Pending,
            FulfilmentStage::Acknowledged => OrderStatus::Acknowledged,
            FulfilmentStage::Dispatched => OrderStatus::Dispatched,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The canned orders the simulator can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderTemplate {
    SingleItem,
    MultipleItems,
    EveryShippingMethod,
    EeInsurance,
    EeLoan,
    Acknowledged,
    Dispatched,
}

impl OrderTemplate {
    /// Templates offered on the acknowledgement scenario.
    pub const PLAIN: [OrderTemplate; 5] = [
        OrderTemplate::SingleItem,
        OrderTemplate::MultipleItems,
        OrderTemplate::EveryShippingMethod,
        OrderTemplate::EeInsurance,
        OrderTemplate::EeLoan,
    ];

    /// Free-text type stored on the order.
    pub fn order_type(&self) -> &'static str {
        match self {
            OrderTemplate::SingleItem => "Single item order",
            OrderTemplate::MultipleItems => "Multiple items order",
            OrderTemplate::EveryShippingMethod => "Order with every shipping method",
            OrderTemplate::EeInsurance => "Order with EE insurance",
            OrderTemplate::EeLoan => "Order with EE loan",
            OrderTemplate::Acknowledged => "Acknowledged Order",
            OrderTemplate::Dispatched => "Dispatched Order",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            OrderTemplate::SingleItem => "Single Item Order",
            OrderTemplate::MultipleItems => "Multiple Items Order",
            OrderTemplate::EveryShippingMethod => "Every Shipping Method",
            OrderTemplate::EeInsurance => "Order with EE Insurance",
            OrderTemplate::EeLoan => "Order with EE Loan",
            OrderTemplate::Acknowledged => "Create & Acknowledge Order",
            OrderTemplate::Dispatched => "Create, Acknowledge & Dispatch Order",
        }
    }

    pub fn preset(&self) -> FulfilmentStage {
        match self {
            OrderTemplate::Acknowledged => FulfilmentStage::Acknowledged,
            OrderTemplate::Dispatched => FulfilmentStage::Dispatched,
            _ => FulfilmentStage::Pending,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
