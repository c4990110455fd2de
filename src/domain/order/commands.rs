use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{FulfilmentStage, OrderId};

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    CreateOrder {
        order_id: OrderId,
        order_type: String,
        preset: FulfilmentStage,
        created_at: DateTime<Utc>,
    },
    Acknowledge,
    Dispatch,
    Deliver,
    Cancel,
    RaiseRefund,
}

impl OrderCommand {
    pub fn action(&self) -> OrderAction {
        match self {
            OrderCommand::CreateOrder { .. } => OrderAction::Create,
            OrderCommand::Acknowledge => OrderAction::Acknowledge,
            OrderCommand::Dispatch => OrderAction::Dispatch,
            OrderCommand::Deliver => OrderAction::Deliver,
            OrderCommand::Cancel => OrderAction::Cancel,
            OrderCommand::RaiseRefund => OrderAction::RaiseRefund,
        }
    }
}

/// Command kind without payload; used for errors, metric labels and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Create,
    Acknowledge,
    Dispatch,
    Deliver,
    Cancel,
    RaiseRefund,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::Create => "create",
            OrderAction::Acknowledge => "acknowledge",
            OrderAction::Dispatch => "dispatch",
            OrderAction::Deliver => "deliver",
            OrderAction::Cancel => "cancel",
            OrderAction::RaiseRefund => "raise_refund",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
