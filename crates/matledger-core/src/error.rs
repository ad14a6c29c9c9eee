use thiserror::Error;

use crate::models::MaterialId;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("material name is required")]
    EmptyName,
    #[error("material {0} does not exist")]
    UnknownMaterial(MaterialId),
    #[error("purchased weight must be greater than zero")]
    NonPositiveWeight,
    #[error("price per kg must not be negative")]
    NegativePrice,
    #[error("total weight would be zero")]
    ZeroTotalWeight,
    #[error("arithmetic overflow while averaging price")]
    ArithmeticOverflow,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} allows at most two decimal places: {value:?}")]
    TooManyDecimals { field: &'static str, value: String },
    #[error("event payload is invalid: {0}")]
    InvalidPayload(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
