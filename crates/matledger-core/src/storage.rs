use chrono::{DateTime, Utc};

use crate::events::DomainEvent;
use crate::models::MaterialId;

#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub sequence: u64,
    pub event: DomainEvent,
    pub stored_at: DateTime<Utc>,
}

pub trait EventStore {
    fn append(&mut self, event: DomainEvent) -> EventEnvelope;
    fn stream(&self, material_id: MaterialId) -> Vec<EventEnvelope>;
    fn all(&self) -> Vec<EventEnvelope>;
}
