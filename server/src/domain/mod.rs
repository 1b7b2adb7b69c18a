//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage or HTTP dependencies.

mod entity;
mod inventory;
mod production;
mod overhaul;
mod calibration;
mod personnel;
mod quality;
mod stock;
mod engineering;
mod profile;

pub use entity::{check_range, DomainError, DomainResult, Entity, RequiredFields, Validate};
pub use inventory::{InventoryItem, INVENTORY_STATUSES};
pub use production::{Material, ProductionRun, ProgressEntry, PRODUCTION_DONE};
pub use overhaul::{HistoryEntry, Overhaul};
pub use calibration::{Calibration, CALIBRATION_STEPS};
pub use personnel::{AssignProfile, Personnel};
pub use quality::{make_code, parse_code, pass_rate, Department, QcSource, QualityCheck, QC_PASSED};
pub use stock::StockEntry;
pub use engineering::{join_team, split_team, EngineeringProject};
pub use profile::{Education, Experience, Profile};
