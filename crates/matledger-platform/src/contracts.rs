use chrono::{DateTime, Utc};
use matledger_core::{
    DomainEventKind, EventEnvelope, LedgerError, LedgerResult, Material, MaterialId,
};
use matledger_inventory::{MaterialLedger, receive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot handed to the dashboard renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub materials: Vec<MaterialView>,
    pub inventory_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialView {
    pub id: MaterialId,
    pub name: String,
    pub weight: Decimal,
    pub price_per_kg: Decimal,
    pub stock_value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseHistoryView {
    pub material_id: MaterialId,
    pub name: String,
    pub purchases: Vec<PurchaseLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub weight: Decimal,
    pub price_per_kg: Decimal,
    pub running_weight: Decimal,
    pub running_price_per_kg: Decimal,
}

impl MaterialView {
    pub fn from_material(material: &Material) -> LedgerResult<Self> {
        Ok(Self {
            id: material.id,
            name: material.name.clone(),
            weight: material.weight,
            price_per_kg: material.price_per_kg,
            stock_value: material
                .stock_value()
                .ok_or(LedgerError::ArithmeticOverflow)?,
        })
    }
}

impl DashboardView {
    pub fn from_ledger(ledger: &MaterialLedger) -> LedgerResult<Self> {
        let materials = ledger
            .iter()
            .map(MaterialView::from_material)
            .collect::<LedgerResult<Vec<_>>>()?;

        Ok(Self {
            generated_at: Utc::now(),
            materials,
            inventory_value: ledger.inventory_value()?,
        })
    }
}

impl PurchaseHistoryView {
    /// Walks one material's event stream and records the running weight and
    /// average price after each purchase.
    pub fn from_stream(material: &Material, stream: &[EventEnvelope]) -> LedgerResult<Self> {
        let mut running = Material::new(material.id, material.name.clone());
        let mut purchases = Vec::new();

        for envelope in stream {
            if envelope.event.material_id != material.id
                || envelope.event.kind != DomainEventKind::PurchaseApplied
            {
                continue;
            }

            let payload = envelope.event.purchase_payload()?;
            running = receive(&running, payload.weight, payload.price_per_kg)?;
            purchases.push(PurchaseLine {
                sequence: envelope.sequence,
                recorded_at: envelope.stored_at,
                weight: payload.weight,
                price_per_kg: payload.price_per_kg,
                running_weight: running.weight,
                running_price_per_kg: running.price_per_kg,
            });
        }

        Ok(Self {
            material_id: material.id,
            name: material.name.clone(),
            purchases,
        })
    }
}
