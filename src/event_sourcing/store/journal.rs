use std::collections::HashMap;

use anyhow::{Result, bail};
use uuid::Uuid;

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};

// ============================================================================
// Generic Event Journal - In-Memory Event Log
// ============================================================================
//
// Append-only log of every event, for any event type.
//
// Responsibilities:
// 1. Append events with per-aggregate sequence numbers
// 2. Load the event history of one aggregate
// 3. Reject appends that were computed against a stale version
//
// Lives for the duration of the session; nothing is written anywhere.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum JournalError {
    #[error("Cannot append empty event list")]
    EmptyAppend,

    #[error("Concurrency conflict on {aggregate_id}: expected version {expected}, but current is {actual}")]
    VersionConflict {
        aggregate_id: String,
        expected: i64,
        actual: i64,
    },
}

#[derive(Debug)]
pub struct EventJournal<E: DomainEvent> {
    entries: Vec<EventEnvelope<E>>,
    versions: HashMap<String, i64>,
}

impl<E: DomainEvent> EventJournal<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            versions: HashMap::new(),
        }
    }

    /// Append events to one aggregate's stream.
    /// Returns the new version number after appending.
    pub fn append_events(
        &mut self,
        aggregate_id: &str,
        expected_version: i64,
        events: Vec<E>,
        correlation_id: Uuid,
    ) -> Result<i64, JournalError> {
        if events.is_empty() {
            return Err(JournalError::EmptyAppend);
        }

        let current_version = self.current_version(aggregate_id);
        if current_version != expected_version {
            return Err(JournalError::VersionConflict {
                aggregate_id: aggregate_id.to_string(),
                expected: expected_version,
                actual: current_version,
            });
        }

        let mut new_version = expected_version;
        for event in events {
            new_version += 1;

            let envelope = EventEnvelope::new(aggregate_id, new_version, event, correlation_id);

            tracing::trace!(
                aggregate_id = %aggregate_id,
                sequence_number = new_version,
                event_type = %envelope.event_type,
                "Journaled event"
            );

            self.entries.push(envelope);
        }

        self.versions.insert(aggregate_id.to_string(), new_version);
        Ok(new_version)
    }

    /// Load all events for an aggregate, oldest first
    pub fn load_events(&self, aggregate_id: &str) -> Vec<EventEnvelope<E>> {
        self.entries
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    /// 0 for an aggregate that has no events yet
    pub fn current_version(&self, aggregate_id: &str) -> i64 {
        self.versions.get(aggregate_id).copied().unwrap_or(0)
    }

    /// Rebuild an aggregate by replaying its stream
    pub fn load_aggregate<A>(&self, aggregate_id: &str) -> Result<A>
    where
        A: Aggregate<Event = E>,
        <A as Aggregate>::Error: std::fmt::Display,
    {
        let events = self.load_events(aggregate_id);

        if events.is_empty() {
            bail!("Aggregate not found: {}", aggregate_id);
        }

        A::load_from_events(&events)
    }

    pub fn entries(&self) -> &[EventEnvelope<E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: DomainEvent> Default for EventJournal<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
