pub mod config;
pub mod contracts;

pub use config::{OutputFormat, TrackerConfig};
pub use contracts::{DashboardView, MaterialView, PurchaseHistoryView, PurchaseLine};
