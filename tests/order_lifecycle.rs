use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use portal_sim::domain::order::views::{self, DeliveryState, DispatchState};
use portal_sim::domain::order::{
    FulfilmentStage, OrderAction, OrderCommandHandler, OrderError, OrderId, OrderRecord, OrderStatus, OrderTemplate,
};
use portal_sim::notifications::{RecordingSink, Severity};

fn handler() -> (OrderCommandHandler, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (OrderCommandHandler::new(sink.clone()), sink)
}

/// Drive the handler with `steps` random commands, valid or not.
fn random_session(seed: u64, steps: usize) -> OrderCommandHandler {
    let (mut handler, _) = handler();
    let mut rng = StdRng::seed_from_u64(seed);
    let templates = [OrderTemplate::SingleItem, OrderTemplate::Acknowledged, OrderTemplate::Dispatched];

    for _ in 0..steps {
        let ids: Vec<OrderId> = handler.store().all().iter().map(|o| o.id().clone()).collect();
        if ids.is_empty() || rng.gen_bool(0.25) {
            let template = templates[rng.gen_range(0..templates.len())];
            handler.create_order(template).unwrap();
            continue;
        }

        let id = &ids[rng.gen_range(0..ids.len())];
        let _ = match rng.gen_range(0..5) {
            0 => handler.acknowledge(id),
            1 => handler.dispatch(id),
            2 => handler.deliver(id),
            3 => handler.cancel(id),
            _ => handler.raise_refund(id),
        };
    }
    handler
}

fn assert_flag_invariants(order: &OrderRecord) {
    if order.dispatched() {
        assert!(order.acknowledged(), "{} dispatched without acknowledgement", order.id());
    }
    if order.delivered() {
        assert!(order.dispatched(), "{} delivered without dispatch", order.id());
    }
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_ids_are_unique() {
    let (mut handler, _) = handler();
    for _ in 0..200 {
        handler.create_order(OrderTemplate::SingleItem).unwrap();
    }

    let ids: HashSet<&OrderId> = handler.store().all().iter().map(|o| o.id()).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_flags_stay_monotonic_across_random_sessions() {
    for seed in 0..20 {
        let handler = random_session(seed, 150);
        handler.store().all().iter().for_each(assert_flag_invariants);
    }
}

#[test]
fn test_cancellation_is_terminal() {
    let (mut handler, _) = handler();
    let id = handler.create_order(OrderTemplate::Acknowledged).unwrap();
    handler.cancel(&id).unwrap();
    let cancelled = handler.store().get(&id).unwrap().clone();

    assert!(handler.acknowledge(&id).is_err());
    assert!(handler.dispatch(&id).is_err());
    assert!(handler.deliver(&id).is_err());
    assert!(handler.cancel(&id).is_err());
    assert!(handler.raise_refund(&id).is_err());

    let after = handler.store().get(&id).unwrap();
    assert_eq!(after, &cancelled);
    assert_eq!(after.status(), OrderStatus::Cancelled { stage: FulfilmentStage::Acknowledged });
    assert!(!after.dispatched());
}

#[test]
fn test_store_is_newest_first() {
    for seed in 0..10 {
        let handler = random_session(seed, 100);
        let orders = handler.store().all();
        assert!(orders.windows(2).all(|w| w[0].created_at() >= w[1].created_at()));
    }
}

#[test]
fn test_views_partition_the_store() {
    for seed in 0..20 {
        let handler = random_session(seed, 150);
        let orders = handler.store().all();

        let pending: HashSet<&OrderId> = views::pending_acknowledgement(orders).iter().map(|o| o.id()).collect();
        let dispatch: HashSet<&OrderId> = views::awaiting_dispatch(orders).iter().map(|r| r.order.id()).collect();
        let cancelled: HashSet<&OrderId> = orders.iter().filter(|o| o.cancelled()).map(|o| o.id()).collect();

        assert!(pending.is_disjoint(&dispatch));
        assert!(pending.is_disjoint(&cancelled));
        assert!(dispatch.is_disjoint(&cancelled));
        assert_eq!(pending.len() + dispatch.len() + cancelled.len(), orders.len());
    }
}

#[test]
fn test_journal_replays_to_current_state() {
    let handler = random_session(99, 200);
    for order in handler.store().all() {
        let rebuilt = handler.store().rebuild(order.id()).unwrap();
        assert_eq!(&rebuilt, order);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_plain_order_waits_for_acknowledgement() {
    let (mut handler, _) = handler();
    let id = handler.create_order(OrderTemplate::SingleItem).unwrap();
    let orders = handler.store().all();

    assert!(views::pending_acknowledgement(orders).iter().any(|o| o.id() == &id));
    assert!(views::awaiting_dispatch(orders).is_empty());
}

#[test]
fn test_acknowledged_order_moves_to_dispatch() {
    let (mut handler, _) = handler();
    let id = handler.create_order(OrderTemplate::SingleItem).unwrap();

    handler.acknowledge(&id).unwrap();

    let orders = handler.store().all();
    assert!(views::pending_acknowledgement(orders).is_empty());
    let rows = views::awaiting_dispatch(orders);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order.id(), &id);
    assert_eq!(rows[0].state, DispatchState::Pending);
    assert!(!rows[0].order.dispatched());
}

#[test]
fn test_dispatch_before_acknowledgement_is_rejected() {
    let (mut handler, sink) = handler();
    let id = handler.create_order(OrderTemplate::SingleItem).unwrap();
    let before: Vec<OrderRecord> = handler.store().all().to_vec();

    let err = handler.dispatch(&id).unwrap_err();

    assert!(matches!(err, OrderError::InvalidTransition { action: OrderAction::Dispatch, .. }));
    assert_eq!(handler.store().all(), before.as_slice());
    assert_eq!(sink.last().unwrap().severity, Severity::Error);
}

#[test]
fn test_preset_dispatched_order_awaits_delivery() {
    let (mut handler, _) = handler();
    let id = handler.create_order(OrderTemplate::Dispatched).unwrap();
    let orders = handler.store().all();

    let order = handler.store().get(&id).unwrap();
    assert!(order.acknowledged() && order.dispatched() && !order.delivered());

    assert!(views::pending_acknowledgement(orders).is_empty());
    assert!(views::awaiting_dispatch(orders).iter().all(|r| r.state == DispatchState::Dispatched));
    let delivery = views::awaiting_delivery(orders);
    assert_eq!(delivery.len(), 1);
    assert_eq!(delivery[0].state, DeliveryState::InTransit);
    assert!(views::refund_eligible(orders).is_empty());
}

#[test]
fn test_refund_then_cancel_after_delivery() {
    let (mut handler, _) = handler();
    let id = handler.create_order(OrderTemplate::Dispatched).unwrap();
    handler.deliver(&id).unwrap();

    handler.raise_refund(&id).unwrap();
    let err = handler.cancel(&id).unwrap_err();

    assert!(matches!(
        err,
        OrderError::InvalidTransition { action: OrderAction::Cancel, status: OrderStatus::Delivered, .. }
    ));
    let order = handler.store().get(&id).unwrap();
    assert!(order.delivered() && !order.cancelled());
    assert_eq!(handler.store().history(&id).last().unwrap().event_type, "OrderRefundRaised");
}
