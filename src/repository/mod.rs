//! Repository layer for database operations
//!
//! Services never touch a connection pool directly: they go through the
//! [`EquipmentStore`] and [`RequestStore`] traits, backed either by
//! PostgreSQL or by the in-process [`memory::MemoryStore`].

pub mod equipment;
pub mod memory;
pub mod requests;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        request::{MaintenanceRequest, NewMaintenanceRequest, UpdateMaintenanceRequest},
    },
};

/// Storage operations on equipment records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// All equipment, optionally restricted to one company, ordered by name
    async fn list(&self, company_id: Option<i32>) -> AppResult<Vec<Equipment>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;

    async fn insert(&self, data: &CreateEquipment) -> AppResult<Equipment>;

    /// Returns `None` when no row has this id
    async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Option<Equipment>>;
}

/// Storage operations needed by the maintenance request service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn find_equipment_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;

    async fn find_request_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRequest>>;

    async fn insert_request(&self, data: &NewMaintenanceRequest) -> AppResult<MaintenanceRequest>;

    /// Returns `None` when no row has this id
    async fn update_request(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRequest>>;

    /// Returns `false` when no row was deleted
    async fn delete_request(&self, id: i32) -> AppResult<bool>;

    /// Requests ordered newest first, optionally restricted to one company
    async fn list_requests(&self, company_id: Option<i32>) -> AppResult<Vec<MaintenanceRequest>>;

    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the store handles
#[derive(Clone)]
pub struct Repository {
    pub equipment: Arc<dyn EquipmentStore>,
    pub requests: Arc<dyn RequestStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: Arc::new(equipment::EquipmentRepository::new(pool.clone())),
            requests: Arc::new(requests::RequestsRepository::new(pool)),
        }
    }

    /// Repository backed by a fresh in-process store
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            equipment: store.clone(),
            requests: store,
        }
    }
}
