//! Data models for the maintenance desk

pub mod equipment;
pub mod request;

// Re-export commonly used types
pub use equipment::Equipment;
pub use request::MaintenanceRequest;
