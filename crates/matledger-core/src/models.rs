use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sequential material identifier. The first registered material is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Cumulative kilograms purchased.
    pub weight: Decimal,
    /// Weighted-average price over every purchase applied so far.
    pub price_per_kg: Decimal,
}

impl Material {
    pub fn new(id: MaterialId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weight: Decimal::ZERO,
            price_per_kg: Decimal::ZERO,
        }
    }

    /// Value of the stock on hand at the current average price.
    pub fn stock_value(&self) -> Option<Decimal> {
        self.weight.checked_mul(self.price_per_kg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub material_id: MaterialId,
    pub weight: Decimal,
    pub price_per_kg: Decimal,
}

impl Purchase {
    pub fn new(material_id: MaterialId, weight: Decimal, price_per_kg: Decimal) -> Self {
        Self {
            material_id,
            weight,
            price_per_kg,
        }
    }
}
