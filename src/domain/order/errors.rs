use super::commands::OrderAction;
use super::value_objects::{OrderId, OrderStatus};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot {action} order {order_id} while it is {status}")]
    InvalidTransition {
        order_id: OrderId,
        action: OrderAction,
        status: OrderStatus,
    },

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Order id already in use: {0}")]
    DuplicateOrderId(OrderId),

    #[error("Replacement does not match stored order {0}")]
    ConflictingRecord(OrderId),

    #[error("Concurrency conflict on {order_id}: expected version {expected}, found {actual}")]
    VersionConflict {
        order_id: OrderId,
        expected: i64,
        actual: i64,
    },

    #[error("Aggregate not initialized")]
    NotInitialized,
}
