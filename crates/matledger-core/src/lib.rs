pub mod error;
pub mod events;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use events::{DomainEvent, DomainEventKind, MaterialCreatedPayload, PurchaseAppliedPayload};
pub use models::{Material, MaterialId, Purchase};
pub use storage::{EventEnvelope, EventStore};
