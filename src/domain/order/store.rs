use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event_sourcing::core::{Aggregate, EventEnvelope};
use crate::event_sourcing::store::{EventJournal, JournalError};
use super::aggregate::OrderRecord;
use super::errors::OrderError;
use super::events::{
    OrderAcknowledged, OrderCancelled, OrderCreated, OrderDelivered, OrderDispatched, OrderEvent, OrderRefundRaised,
};
use super::value_objects::{FulfilmentStage, OrderId, OrderStatus};

// ============================================================================
// Order Store - Single Source of Truth
// ============================================================================
//
// Holds every order created during the session, newest first, plus the
// journal of events that produced them. Every change to `orders` goes
// through the journal, so `rebuild` always agrees with `all`. Records are
// never removed.
// Ordering is by `created_at` descending; on equal timestamps the most
// recent insert comes first.
//
// ============================================================================

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<OrderRecord>,
    journal: EventJournal<OrderEvent>,
    last_issued_millis: i64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh `ORD-<millis>` id and its creation timestamp.
    ///
    /// Millis never repeat within a store even if the clock stands still or
    /// goes backwards, so ids are unique and creation times strictly increase.
    pub fn next_order_id(&mut self, now: DateTime<Utc>) -> (OrderId, DateTime<Utc>) {
        let mut millis = now.timestamp_millis().max(self.last_issued_millis + 1);
        while self.contains(&OrderId::from_millis(millis)) {
            millis += 1;
        }
        self.last_issued_millis = millis;

        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(now);
        (OrderId::from_millis(millis), created_at)
    }

    /// Insert a freshly created, still pending record at the head of the list
    /// and journal its creation.
    ///
    /// A record older than the current head is placed at its chronological
    /// position instead, so display order stays newest first. Records that
    /// already carry history must come in through `commit_created`.
    pub fn insert_at_head(&mut self, record: OrderRecord) -> Result<(), OrderError> {
        if record.version() != 1 || record.status() != OrderStatus::Pending {
            return Err(OrderError::ConflictingRecord(record.id().clone()));
        }

        let created = OrderEvent::Created(OrderCreated {
            order_id: record.id().clone(),
            order_type: record.order_type().to_string(),
            created_at: record.created_at(),
        });
        self.commit_created(record, vec![created], Uuid::new_v4()).map(|_| ())
    }

    /// Swap in the next state of an order, keeping its position.
    ///
    /// `record` must be exactly one legal step ahead of the stored record;
    /// the event for that step is journalled. Stale or skipped states are
    /// rejected with `ConflictingRecord`.
    pub fn replace(&mut self, id: &OrderId, record: OrderRecord) -> Result<(), OrderError> {
        let position = self.position(id, &record)?;
        let current = &self.orders[position];
        let event = next_event(current, &record).ok_or_else(|| OrderError::ConflictingRecord(id.clone()))?;
        let expected_version = current.version();

        self.commit_transition(record, vec![event], expected_version, Uuid::new_v4())
            .map(|_| ())
    }

    pub fn all(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| o.id() == id)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Insert a freshly created record and journal its creation events.
    pub fn commit_created(
        &mut self,
        record: OrderRecord,
        events: Vec<OrderEvent>,
        correlation_id: Uuid,
    ) -> Result<i64, OrderError> {
        let id = record.id().clone();
        if self.contains(&id) {
            return Err(OrderError::DuplicateOrderId(id));
        }

        let version = self
            .journal
            .append_events(id.as_str(), 0, events, correlation_id)
            .map_err(|e| journal_error(&id, e))?;

        let created_at = record.created_at();
        let position = self.orders.partition_point(|o| o.created_at() > created_at);
        self.last_issued_millis = self.last_issued_millis.max(created_at.timestamp_millis());
        self.orders.insert(position, record);
        Ok(version)
    }

    /// Replace an existing record with its next state and journal the events.
    /// Nothing changes unless both the record and the journal accept it.
    pub fn commit_transition(
        &mut self,
        record: OrderRecord,
        events: Vec<OrderEvent>,
        expected_version: i64,
        correlation_id: Uuid,
    ) -> Result<i64, OrderError> {
        let id = record.id().clone();
        let position = self.position(&id, &record)?;

        let version = self
            .journal
            .append_events(id.as_str(), expected_version, events, correlation_id)
            .map_err(|e| journal_error(&id, e))?;
        self.orders[position] = record;
        Ok(version)
    }

    /// Events for one order, oldest first.
    pub fn history(&self, id: &OrderId) -> Vec<EventEnvelope<OrderEvent>> {
        self.journal.load_events(id.as_str())
    }

    pub fn journal(&self) -> &[EventEnvelope<OrderEvent>] {
        self.journal.entries()
    }

    /// Replay an order's history from the journal.
    pub fn rebuild(&self, id: &OrderId) -> anyhow::Result<OrderRecord> {
        self.journal.load_aggregate::<OrderRecord>(id.as_str())
    }

    fn position(&self, id: &OrderId, record: &OrderRecord) -> Result<usize, OrderError> {
        let position = self
            .orders
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| OrderError::OrderNotFound(id.clone()))?;

        let current = &self.orders[position];
        if record.id() != id || record.created_at() != current.created_at() || record.version() <= current.version() {
            return Err(OrderError::ConflictingRecord(id.clone()));
        }
        Ok(position)
    }
}

/// The single event that turns `current` into `next`, if there is one.
fn next_event(current: &OrderRecord, next: &OrderRecord) -> Option<OrderEvent> {
    let at = next.updated_at();
    let event = match (current.status(), next.status()) {
        (OrderStatus::Pending, OrderStatus::Acknowledged) => {
            OrderEvent::Acknowledged(OrderAcknowledged { acknowledged_at: at })
        }
        (OrderStatus::Acknowledged, OrderStatus::Dispatched) => {
            OrderEvent::Dispatched(OrderDispatched { dispatched_at: at })
        }
        (OrderStatus::Dispatched, OrderStatus::Delivered) => OrderEvent::Delivered(OrderDelivered { delivered_at: at }),
        (OrderStatus::Delivered, OrderStatus::Delivered) => OrderEvent::RefundRaised(OrderRefundRaised { raised_at: at }),
        (from, OrderStatus::Cancelled { stage }) if stage_of(from) == Some(stage) => {
            OrderEvent::Cancelled(OrderCancelled { cancelled_at: at, stage })
        }
        _ => return None,
    };

    let mut replayed = current.clone();
    replayed.apply_event(&event).ok()?;
    (&replayed == next).then_some(event)
}

fn stage_of(status: OrderStatus) -> Option<FulfilmentStage> {
    match status {
        OrderStatus::Pending => Some(FulfilmentStage::Pending),
        OrderStatus::Acknowledged => Some(FulfilmentStage::Acknowledged),
        OrderStatus::Dispatched => Some(FulfilmentStage::Dispatched),
        OrderStatus::Delivered | OrderStatus::Cancelled { .. } => None,
    }
}

fn journal_error(id: &OrderId, error: JournalError) -> OrderError {
    match error {
        JournalError::VersionConflict { expected, actual, .. } => OrderError::VersionConflict {
            order_id: id.clone(),
            expected,
            actual,
        },
        JournalError::EmptyAppend => OrderError::ConflictingRecord(id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{FulfilmentStage, OrderCommand, OrderStatus};
    use chrono::{Duration, TimeZone};

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn record(millis: i64) -> OrderRecord {
        OrderRecord::create(OrderId::from_millis(millis), "Single item order", FulfilmentStage::Pending, at(millis))
            .unwrap()
    }

    #[test]
    fn test_next_order_id_is_unique_when_clock_stands_still() {
        let mut store = OrderStore::new();
        let now = at(1_700_000_000_000);

        let (a, ta) = store.next_order_id(now);
        let (b, tb) = store.next_order_id(now);
        let (c, tc) = store.next_order_id(now - Duration::seconds(5));

        assert_eq!(a.as_str(), "ORD-1700000000000");
        assert_eq!(b.as_str(), "ORD-1700000000001");
        assert_eq!(c.as_str(), "ORD-1700000000002");
        assert!(ta < tb && tb < tc);
    }

    #[test]
    fn test_insert_at_head_keeps_newest_first() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();
        store.insert_at_head(record(2)).unwrap();
        store.insert_at_head(record(3)).unwrap();

        let ids: Vec<_> = store.all().iter().map(|o| o.id().to_string()).collect();
        assert_eq!(ids, vec!["ORD-3", "ORD-2", "ORD-1"]);
    }

    #[test]
    fn test_insert_older_record_lands_in_order() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(10)).unwrap();
        store.insert_at_head(record(30)).unwrap();
        store.insert_at_head(record(20)).unwrap();

        let ids: Vec<_> = store.all().iter().map(|o| o.id().to_string()).collect();
        assert_eq!(ids, vec!["ORD-30", "ORD-20", "ORD-10"]);
    }

    #[test]
    fn test_equal_timestamps_latest_insert_first() {
        let mut store = OrderStore::new();
        let first = OrderRecord::create(OrderId::new("A"), "x", FulfilmentStage::Pending, at(5)).unwrap();
        let second = OrderRecord::create(OrderId::new("B"), "x", FulfilmentStage::Pending, at(5)).unwrap();
        store.insert_at_head(first).unwrap();
        store.insert_at_head(second).unwrap();

        assert_eq!(store.all()[0].id().as_str(), "B");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();

        let result = store.insert_at_head(record(1));
        assert!(matches!(result.unwrap_err(), OrderError::DuplicateOrderId(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_preserves_position() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();
        store.insert_at_head(record(2)).unwrap();

        let id = OrderId::from_millis(1);
        let acknowledged = store.get(&id).unwrap().acknowledge().unwrap();
        store.replace(&id, acknowledged).unwrap();

        assert_eq!(store.all()[1].id(), &id);
        assert_eq!(store.all()[1].status(), OrderStatus::Acknowledged);
    }

    #[test]
    fn test_replace_unknown_order() {
        let mut store = OrderStore::new();
        let result = store.replace(&OrderId::new("ORD-404"), record(404));
        assert!(matches!(result.unwrap_err(), OrderError::OrderNotFound(_)));
    }

    #[test]
    fn test_replace_with_different_identity_rejected() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();

        let impostor = OrderRecord::create(OrderId::from_millis(1), "x", FulfilmentStage::Pending, at(99)).unwrap();
        let result = store.replace(&OrderId::from_millis(1), impostor);
        assert!(matches!(result.unwrap_err(), OrderError::ConflictingRecord(_)));
    }

    #[test]
    fn test_commit_journals_events_and_rebuilds() {
        let mut store = OrderStore::new();
        let (id, created_at) = store.next_order_id(Utc::now());
        let (created, events) =
            OrderRecord::create_with_events(id.clone(), "Acknowledged Order", FulfilmentStage::Acknowledged, created_at)
                .unwrap();
        assert_eq!(store.commit_created(created, events, Uuid::new_v4()).unwrap(), 2);

        let current = store.get(&id).unwrap().clone();
        let (next, events) = current.execute(&OrderCommand::Dispatch).unwrap();
        assert_eq!(store.commit_transition(next, events, current.version(), Uuid::new_v4()).unwrap(), 3);

        let history = store.history(&id);
        let types: Vec<_> = history.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["OrderCreated", "OrderAcknowledged", "OrderDispatched"]);

        let rebuilt = store.rebuild(&id).unwrap();
        assert_eq!(&rebuilt, store.get(&id).unwrap());
    }

    #[test]
    fn test_stale_commit_leaves_store_unchanged() {
        let mut store = OrderStore::new();
        let (id, created_at) = store.next_order_id(Utc::now());
        let (created, events) =
            OrderRecord::create_with_events(id.clone(), "x", FulfilmentStage::Pending, created_at).unwrap();
        store.commit_created(created.clone(), events, Uuid::new_v4()).unwrap();

        let (next, events) = created.execute(&OrderCommand::Acknowledge).unwrap();
        let result = store.commit_transition(next, events, 0, Uuid::new_v4());

        assert!(matches!(result.unwrap_err(), OrderError::VersionConflict { expected: 0, actual: 1, .. }));
        assert_eq!(store.get(&id).unwrap().status(), OrderStatus::Pending);
        assert_eq!(store.journal().len(), 1);
    }

    #[test]
    fn test_insert_rejects_records_with_history() {
        let mut store = OrderStore::new();
        let acknowledged = record(1).acknowledge().unwrap();

        let result = store.insert_at_head(acknowledged);

        assert!(matches!(result.unwrap_err(), OrderError::ConflictingRecord(_)));
        assert!(store.is_empty());
        assert!(store.journal().is_empty());
    }

    #[test]
    fn test_replace_rejects_stale_snapshot() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();
        let id = OrderId::from_millis(1);
        let pending = store.get(&id).unwrap().clone();

        store.replace(&id, pending.acknowledge().unwrap()).unwrap();
        let result = store.replace(&id, pending.cancel().unwrap());

        assert!(matches!(result.unwrap_err(), OrderError::ConflictingRecord(_)));
        let current = store.get(&id).unwrap();
        assert_eq!(current.status(), OrderStatus::Acknowledged);
        assert!(current.acknowledged());
    }

    #[test]
    fn test_replace_rejects_skipped_steps() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();
        let id = OrderId::from_millis(1);
        let dispatched = store.get(&id).unwrap().acknowledge().unwrap().dispatch().unwrap();

        let result = store.replace(&id, dispatched);

        assert!(matches!(result.unwrap_err(), OrderError::ConflictingRecord(_)));
        assert_eq!(store.get(&id).unwrap().status(), OrderStatus::Pending);
        assert_eq!(store.history(&id).len(), 1);
    }

    #[test]
    fn test_replace_is_journalled() {
        let mut store = OrderStore::new();
        store.insert_at_head(record(1)).unwrap();
        let id = OrderId::from_millis(1);

        let acknowledged = store.get(&id).unwrap().acknowledge().unwrap();
        store.replace(&id, acknowledged).unwrap();
        assert_eq!(&store.rebuild(&id).unwrap(), store.get(&id).unwrap());

        let current = store.get(&id).unwrap().clone();
        let (next, events) = current.execute(&OrderCommand::Dispatch).unwrap();
        assert_eq!(store.commit_transition(next, events, current.version(), Uuid::new_v4()).unwrap(), 3);

        let cancelled = store.get(&id).unwrap().cancel().unwrap();
        store.replace(&id, cancelled).unwrap();

        let types: Vec<_> = store.history(&id).iter().map(|e| e.event_type.clone()).collect();
        assert_eq!(types, vec!["OrderCreated", "OrderAcknowledged", "OrderDispatched", "OrderCancelled"]);
        assert_eq!(&store.rebuild(&id).unwrap(), store.get(&id).unwrap());
    }
}
