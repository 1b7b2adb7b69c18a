//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod inventory_repo;
mod production_repo;
mod overhaul_repo;
mod calibration_repo;
mod personnel_repo;
mod quality_repo;
mod stock_repo;
mod engineering_repo;
mod profile_repo;

#[cfg(test)]
mod tests;

pub use traits::{FromConnection, Repository};
pub use db::{init_db, DbState, SharedConnection};
pub use inventory_repo::InventoryRepository;
pub use production_repo::ProductionRepository;
pub use overhaul_repo::OverhaulRepository;
pub use calibration_repo::CalibrationRepository;
pub use personnel_repo::PersonnelRepository;
pub use quality_repo::QualityRepository;
pub use stock_repo::StockRepository;
pub use engineering_repo::EngineeringRepository;
pub use profile_repo::ProfileRepository;
