use super::aggregate::OrderRecord;

// ============================================================================
// Derived Views - Read-only projections over the order list
// ============================================================================
//
// Every view is a stable filter over the store's display order (newest
// first), recomputed on each call. Nothing is cached.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Pending,
    Dispatched,
}

impl DispatchState {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchState::Pending => "Pending",
            DispatchState::Dispatched => "Dispatched",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    InTransit,
    Delivered,
}

impl DeliveryState {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryState::InTransit => "In Transit",
            DeliveryState::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DispatchRow<'a> {
    pub order: &'a OrderRecord,
    pub state: DispatchState,
}

#[derive(Debug, Clone, Copy)]
pub struct DeliveryRow<'a> {
    pub order: &'a OrderRecord,
    pub state: DeliveryState,
}

#[derive(Debug, Clone, Copy)]
pub struct CancellationRow<'a> {
    pub order: &'a OrderRecord,
    pub cancelled: bool,
}

/// Orders nobody has acknowledged yet.
pub fn pending_acknowledgement(orders: &[OrderRecord]) -> Vec<&OrderRecord> {
    orders
        .iter()
        .filter(|o| !o.acknowledged() && !o.cancelled())
        .collect()
}

pub fn awaiting_dispatch(orders: &[OrderRecord]) -> Vec<DispatchRow<'_>> {
    orders
        .iter()
        .filter(|o| o.acknowledged() && !o.cancelled())
        .map(|order| DispatchRow {
            order,
            state: if order.dispatched() { DispatchState::Dispatched } else { DispatchState::Pending },
        })
        .collect()
}

pub fn awaiting_delivery(orders: &[OrderRecord]) -> Vec<DeliveryRow<'_>> {
    orders
        .iter()
        .filter(|o| o.dispatched() && !o.cancelled())
        .map(|order| DeliveryRow {
            order,
            state: if order.delivered() { DeliveryState::Delivered } else { DeliveryState::InTransit },
        })
        .collect()
}

pub fn refund_eligible(orders: &[OrderRecord]) -> Vec<&OrderRecord> {
    orders
        .iter()
        .filter(|o| o.delivered() && !o.cancelled())
        .collect()
}

/// Unacknowledged orders, cancelled ones included so the table can show
/// which have already been cancelled.
pub fn pre_dispatch_cancellable(orders: &[OrderRecord]) -> Vec<CancellationRow<'_>> {
    cancellation_rows(orders, false)
}

/// Acknowledged orders, cancelled ones included.
pub fn post_dispatch_cancellable(orders: &[OrderRecord]) -> Vec<CancellationRow<'_>> {
    cancellation_rows(orders, true)
}

fn cancellation_rows(orders: &[OrderRecord], acknowledged: bool) -> Vec<CancellationRow<'_>> {
    orders
        .iter()
        .filter(|o| o.acknowledged() == acknowledged)
        .map(|order| CancellationRow { order, cancelled: order.cancelled() })
        .collect()
}
