//! Data models for GearGuard

pub mod category;
pub mod dashboard;
pub mod enums;
pub mod equipment;
pub mod maintenance_request;
pub mod team;
pub mod user;
pub mod work_center;

// Re-export commonly used types
pub use category::EquipmentCategory;
pub use enums::{Frequency, Priority, RequestType, Stage};
pub use equipment::Equipment;
pub use maintenance_request::{MaintenanceRequest, MaintenanceRequestDetails};
pub use team::MaintenanceTeam;
pub use user::{User, UserClaims};
pub use work_center::WorkCenter;
