//! Material registry and weighted-average purchase reducer.
//!
//! Every operation takes the current [`MaterialLedger`] by reference and
//! returns a new snapshot. A rejected operation leaves the caller's snapshot
//! exactly as it was.

use matledger_core::{
    DomainEvent, DomainEventKind, LedgerError, LedgerResult, Material, MaterialId, Purchase,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLedger {
    materials: Vec<Material>,
}

impl MaterialLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.iter().find(|material| material.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Registers a material with no stock. The id is the collection size plus
    /// one; materials are never removed so ids are never reused.
    pub fn create_material(&self, name: &str) -> LedgerResult<(Self, Material)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let next_id = u32::try_from(self.materials.len())
            .ok()
            .and_then(|len| len.checked_add(1))
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let material = Material::new(MaterialId(next_id), name);

        let mut materials = self.materials.clone();
        materials.push(material.clone());

        Ok((Self { materials }, material))
    }

    /// Folds one purchase into the target material's running weight and
    /// weighted-average price. Every other material is carried over as is.
    pub fn apply_purchase(
        &self,
        material_id: MaterialId,
        weight: Decimal,
        price_per_kg: Decimal,
    ) -> LedgerResult<Self> {
        let index = self
            .materials
            .iter()
            .position(|material| material.id == material_id)
            .ok_or(LedgerError::UnknownMaterial(material_id))?;

        let updated = receive(&self.materials[index], weight, price_per_kg)?;

        let mut materials = self.materials.clone();
        materials[index] = updated;

        Ok(Self { materials })
    }

    pub fn apply(&self, purchase: &Purchase) -> LedgerResult<Self> {
        self.apply_purchase(purchase.material_id, purchase.weight, purchase.price_per_kg)
    }

    /// Total stock value across all materials at their average prices.
    pub fn inventory_value(&self) -> LedgerResult<Decimal> {
        self.materials.iter().try_fold(Decimal::ZERO, |total, material| {
            material
                .stock_value()
                .and_then(|value| total.checked_add(value))
                .ok_or(LedgerError::ArithmeticOverflow)
        })
    }

    /// Rebuilds a snapshot from an event log. Creation events must arrive in
    /// id order, exactly as the registry assigned them.
    pub fn replay<'a, I>(events: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = &'a DomainEvent>,
    {
        events
            .into_iter()
            .try_fold(Self::new(), |ledger, event| match event.kind {
                DomainEventKind::MaterialCreated => {
                    let payload = event.created_payload()?;
                    let (ledger, material) = ledger.create_material(&payload.name)?;
                    if material.id != event.material_id {
                        return Err(LedgerError::InvalidPayload(format!(
                            "material {} created out of order, expected id {}",
                            event.material_id, material.id
                        )));
                    }
                    Ok(ledger)
                }
                DomainEventKind::PurchaseApplied => {
                    let payload = event.purchase_payload()?;
                    ledger.apply_purchase(event.material_id, payload.weight, payload.price_per_kg)
                }
            })
    }
}

/// Weighted-average receipt of `weight` kilograms at `price_per_kg` into a
/// single material.
pub fn receive(material: &Material, weight: Decimal, price_per_kg: Decimal) -> LedgerResult<Material> {
    if weight <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveWeight);
    }
    if price_per_kg < Decimal::ZERO {
        return Err(LedgerError::NegativePrice);
    }

    let current_value = material
        .weight
        .checked_mul(material.price_per_kg)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let incoming_value = weight
        .checked_mul(price_per_kg)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let new_weight = material
        .weight
        .checked_add(weight)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    if new_weight.is_zero() {
        return Err(LedgerError::ZeroTotalWeight);
    }

    let average_cost = current_value
        .checked_add(incoming_value)
        .and_then(|total| total.checked_div(new_weight))
        .ok_or(LedgerError::ArithmeticOverflow)?;

    Ok(Material {
        weight: new_weight,
        price_per_kg: average_cost.normalize(),
        ..material.clone()
    })
}

#[cfg(test)]
mod tests {
    use matledger_core::EventStore;
    use matledger_eventstore::InMemoryEventStore;
    use proptest::prelude::*;

    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn ledger_with(names: &[&str]) -> MaterialLedger {
        names.iter().fold(MaterialLedger::new(), |ledger, name| {
            ledger.create_material(name).unwrap().0
        })
    }

    #[test]
    fn create_assigns_sequential_ids_and_zero_stock() {
        let ledger = ledger_with(&["Copper", "Tin"]);
        let (ledger, bronze) = ledger.create_material("Bronze").unwrap();

        assert_eq!(bronze.id, MaterialId(3));
        assert_eq!(bronze.weight, Decimal::ZERO);
        assert_eq!(bronze.price_per_kg, Decimal::ZERO);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(MaterialId(3)), Some(&bronze));
    }

    #[test]
    fn create_trims_and_rejects_blank_names() {
        let ledger = MaterialLedger::new();
        assert_eq!(ledger.create_material("   "), Err(LedgerError::EmptyName));

        let (_, material) = ledger.create_material("  Zinc ").unwrap();
        assert_eq!(material.name, "Zinc");
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let ledger = ledger_with(&["Copper", "Copper"]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.materials()[1].id, MaterialId(2));
    }

    #[test]
    fn create_leaves_input_snapshot_untouched() {
        let ledger = ledger_with(&["Copper"]);
        let before = ledger.clone();
        let _ = ledger.create_material("Tin").unwrap();
        assert_eq!(ledger, before);
    }

    #[test]
    fn copper_two_purchases_average_to_six() {
        let ledger = ledger_with(&["Copper"]);

        let ledger = ledger.apply_purchase(MaterialId(1), dec(10), dec(5)).unwrap();
        let copper = ledger.get(MaterialId(1)).unwrap();
        assert_eq!(copper.weight, dec(10));
        assert_eq!(copper.price_per_kg, dec(5));

        let ledger = ledger.apply_purchase(MaterialId(1), dec(10), dec(7)).unwrap();
        let copper = ledger.get(MaterialId(1)).unwrap();
        assert_eq!(copper.weight, dec(20));
        assert_eq!(copper.price_per_kg, dec(6));
    }

    #[test]
    fn unknown_material_is_rejected_without_changes() {
        let ledger = ledger_with(&["Copper"]);
        let before = ledger.clone();

        let result = ledger.apply_purchase(MaterialId(42), dec(10), dec(5));

        assert_eq!(result, Err(LedgerError::UnknownMaterial(MaterialId(42))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn weight_and_price_constraints() {
        let ledger = ledger_with(&["Copper"]);

        assert_eq!(
            ledger.apply_purchase(MaterialId(1), Decimal::ZERO, dec(5)),
            Err(LedgerError::NonPositiveWeight)
        );
        assert_eq!(
            ledger.apply_purchase(MaterialId(1), dec(-1), dec(5)),
            Err(LedgerError::NonPositiveWeight)
        );
        assert_eq!(
            ledger.apply_purchase(MaterialId(1), dec(1), dec(-5)),
            Err(LedgerError::NegativePrice)
        );
    }

    #[test]
    fn free_purchase_dilutes_average() {
        let ledger = ledger_with(&["Scrap"])
            .apply_purchase(MaterialId(1), dec(10), dec(8))
            .unwrap()
            .apply_purchase(MaterialId(1), dec(30), Decimal::ZERO)
            .unwrap();

        let scrap = ledger.get(MaterialId(1)).unwrap();
        assert_eq!(scrap.weight, dec(40));
        assert_eq!(scrap.price_per_kg, dec(2));
    }

    #[test]
    fn receive_validates_before_dividing() {
        let material = Material::new(MaterialId(1), "Copper");
        assert_eq!(
            receive(&material, Decimal::ZERO, dec(5)),
            Err(LedgerError::NonPositiveWeight)
        );

        let received = receive(&material, Decimal::new(25, 1), dec(4)).unwrap();
        assert_eq!(received.weight, Decimal::new(25, 1));
        assert_eq!(received.price_per_kg, dec(4));
        assert_eq!(received.name, "Copper");
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        let ledger = ledger_with(&["Gold"]);
        let result = ledger.apply_purchase(MaterialId(1), Decimal::MAX, Decimal::MAX);
        assert_eq!(result, Err(LedgerError::ArithmeticOverflow));
    }

    #[test]
    fn inventory_value_sums_stock() {
        let ledger = ledger_with(&["Copper", "Tin", "Lead"])
            .apply_purchase(MaterialId(1), dec(20), dec(6))
            .unwrap()
            .apply_purchase(MaterialId(2), Decimal::new(25, 1), dec(4))
            .unwrap();

        assert_eq!(ledger.inventory_value().unwrap(), dec(130));
    }

    #[test]
    fn replay_rebuilds_session_snapshot() {
        let mut store = InMemoryEventStore::new();
        let mut ledger = MaterialLedger::new();

        for name in ["Copper", "Tin"] {
            let (next, material) = ledger.create_material(name).unwrap();
            store.append(DomainEvent::material_created(material.id, &material.name).unwrap());
            ledger = next;
        }
        for purchase in [
            Purchase::new(MaterialId(1), dec(10), dec(5)),
            Purchase::new(MaterialId(2), Decimal::new(375, 2), Decimal::new(1299, 2)),
            Purchase::new(MaterialId(1), dec(10), dec(7)),
        ] {
            ledger = ledger.apply(&purchase).unwrap();
            store.append(DomainEvent::purchase_applied(&purchase).unwrap());
        }

        let events: Vec<_> = store.all().into_iter().map(|e| e.event).collect();
        assert_eq!(MaterialLedger::replay(&events).unwrap(), ledger);
    }

    #[test]
    fn replay_rejects_out_of_order_creation() {
        let events = vec![DomainEvent::material_created(MaterialId(2), "Tin").unwrap()];
        assert!(matches!(
            MaterialLedger::replay(&events),
            Err(LedgerError::InvalidPayload(_))
        ));
    }

    fn purchase_strategy() -> impl Strategy<Value = (Decimal, Decimal)> {
        (1i64..=100_000, 0i64..=100_000)
            .prop_map(|(weight, price)| (Decimal::new(weight, 2), Decimal::new(price, 2)))
    }

    proptest! {
        #[test]
        fn average_equals_total_cost_over_total_weight(
            purchases in prop::collection::vec(purchase_strategy(), 1..20)
        ) {
            let mut ledger = ledger_with(&["Copper"]);
            let mut total_weight = Decimal::ZERO;
            let mut total_cost = Decimal::ZERO;

            for (weight, price) in &purchases {
                ledger = ledger.apply_purchase(MaterialId(1), *weight, *price).unwrap();
                total_weight += *weight;
                total_cost += *weight * *price;
            }

            let copper = ledger.get(MaterialId(1)).unwrap();
            let expected = total_cost / total_weight;
            prop_assert_eq!(copper.weight, total_weight);
            prop_assert!((copper.price_per_kg - expected).abs() < Decimal::new(1, 18));
        }

        #[test]
        fn purchase_only_touches_target(
            target in 1u32..=5,
            (weight, price) in purchase_strategy()
        ) {
            let ledger = ledger_with(&["Copper", "Tin", "Lead", "Zinc", "Iron"])
                .apply_purchase(MaterialId(3), dec(4), dec(9))
                .unwrap();

            let next = ledger.apply_purchase(MaterialId(target), weight, price).unwrap();

            for (before, after) in ledger.iter().zip(next.iter()) {
                if before.id == MaterialId(target) {
                    prop_assert!(after.weight > before.weight);
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}
