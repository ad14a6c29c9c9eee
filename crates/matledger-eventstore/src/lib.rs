use std::collections::HashMap;

use chrono::Utc;
use matledger_core::{DomainEvent, EventEnvelope, EventStore, MaterialId};
use tracing::debug;

/// Append-only event log kept in memory for the lifetime of a session.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    log: Vec<EventEnvelope>,
    streams: HashMap<MaterialId, Vec<usize>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&mut self, event: DomainEvent) -> EventEnvelope {
        let sequence = self.log.len() as u64 + 1;
        let envelope = EventEnvelope {
            sequence,
            event,
            stored_at: Utc::now(),
        };

        debug!(
            sequence,
            material_id = %envelope.event.material_id,
            kind = ?envelope.event.kind,
            "event appended"
        );

        self.streams
            .entry(envelope.event.material_id)
            .or_default()
            .push(self.log.len());
        self.log.push(envelope.clone());

        envelope
    }

    fn stream(&self, material_id: MaterialId) -> Vec<EventEnvelope> {
        self.streams
            .get(&material_id)
            .map(|positions| positions.iter().map(|&i| self.log[i].clone()).collect())
            .unwrap_or_default()
    }

    fn all(&self) -> Vec<EventEnvelope> {
        self.log.clone()
    }
}
