use std::str::FromStr;

use matledger_core::{DomainEvent, EventStore, LedgerError, Material, MaterialId, Purchase};
use matledger_eventstore::InMemoryEventStore;
use matledger_inventory::MaterialLedger;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("the new material form is not open")]
    MaterialFormHidden,
    #[error("select a material before adding a purchase")]
    NoMaterialSelected,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Form state as typed by the user, plus the ledger snapshot it drives.
#[derive(Debug)]
pub struct FormSession<S = InMemoryEventStore> {
    materials: MaterialLedger,
    events: S,
    pub show_material_form: bool,
    pub new_material_name: String,
    pub selected_material: String,
    pub weight: String,
    pub price_per_kg: String,
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_store(InMemoryEventStore::new())
    }
}

impl<S: EventStore> FormSession<S> {
    pub fn with_store(events: S) -> Self {
        Self {
            materials: MaterialLedger::new(),
            events,
            show_material_form: false,
            new_material_name: String::new(),
            selected_material: String::new(),
            weight: String::new(),
            price_per_kg: String::new(),
        }
    }

    pub fn materials(&self) -> &MaterialLedger {
        &self.materials
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn toggle_material_form(&mut self) -> bool {
        self.show_material_form = !self.show_material_form;
        self.show_material_form
    }

    pub fn submit_new_material(&mut self) -> Result<Material, FormError> {
        if !self.show_material_form {
            return Err(FormError::MaterialFormHidden);
        }

        let (materials, material) = self.materials.create_material(&self.new_material_name)?;
        let event = DomainEvent::material_created(material.id, &material.name)?;

        self.materials = materials;
        self.events.append(event);
        self.new_material_name.clear();
        self.show_material_form = false;

        info!(material_id = %material.id, name = %material.name, "material created");
        Ok(material)
    }

    /// The purchase button stays disabled until a material is selected.
    pub fn can_submit_purchase(&self) -> bool {
        !self.selected_material.trim().is_empty()
    }

    pub fn submit_purchase(&mut self) -> Result<Material, FormError> {
        if !self.can_submit_purchase() {
            return Err(FormError::NoMaterialSelected);
        }

        let purchase = self.parse_purchase()?;
        let materials = self.materials.apply(&purchase)?;
        let material = materials
            .get(purchase.material_id)
            .cloned()
            .ok_or(LedgerError::UnknownMaterial(purchase.material_id))?;
        let event = DomainEvent::purchase_applied(&purchase)?;

        self.materials = materials;
        self.events.append(event);
        self.selected_material.clear();
        self.weight.clear();
        self.price_per_kg.clear();

        info!(
            material_id = %material.id,
            weight = %purchase.weight,
            price_per_kg = %purchase.price_per_kg,
            average_price = %material.price_per_kg,
            "purchase applied"
        );
        Ok(material)
    }

    fn parse_purchase(&self) -> Result<Purchase, LedgerError> {
        let material_id = parse_material_id(&self.selected_material)?;
        let weight = parse_amount("weight", &self.weight)?;
        let price_per_kg = parse_amount("price per kg", &self.price_per_kg)?;
        Ok(Purchase::new(material_id, weight, price_per_kg))
    }
}

pub fn parse_material_id(raw: &str) -> Result<MaterialId, LedgerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::MissingField("material"));
    }
    raw.parse::<u32>()
        .map(MaterialId)
        .map_err(|_| LedgerError::InvalidNumber {
            field: "material",
            value: raw.to_string(),
        })
}

/// Parses a numeric input that accepts steps of 0.01.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, LedgerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    // number inputs never accept digit separators
    if raw.contains('_') {
        return Err(LedgerError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }

    let value = Decimal::from_str(raw).map_err(|_| LedgerError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    if value.normalize().scale() > 2 {
        return Err(LedgerError::TooManyDecimals {
            field,
            value: raw.to_string(),
        });
    }

    Ok(value)
}
