use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{MaterialId, Purchase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEventKind {
    MaterialCreated,
    PurchaseApplied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: Uuid,
    pub material_id: MaterialId,
    pub kind: DomainEventKind,
    pub occurred_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCreatedPayload {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseAppliedPayload {
    pub weight: Decimal,
    pub price_per_kg: Decimal,
}

impl DomainEvent {
    pub fn material_created(material_id: MaterialId, name: &str) -> LedgerResult<Self> {
        let payload = serde_json::to_value(MaterialCreatedPayload {
            name: name.to_string(),
        })?;
        Ok(Self::new(material_id, DomainEventKind::MaterialCreated, payload))
    }

    pub fn purchase_applied(purchase: &Purchase) -> LedgerResult<Self> {
        let payload = serde_json::to_value(PurchaseAppliedPayload {
            weight: purchase.weight,
            price_per_kg: purchase.price_per_kg,
        })?;
        Ok(Self::new(
            purchase.material_id,
            DomainEventKind::PurchaseApplied,
            payload,
        ))
    }

    fn new(material_id: MaterialId, kind: DomainEventKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            material_id,
            kind,
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn created_payload(&self) -> LedgerResult<MaterialCreatedPayload> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    pub fn purchase_payload(&self) -> LedgerResult<PurchaseAppliedPayload> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}
