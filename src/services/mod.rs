//! Business logic services

pub mod equipment;
pub mod notifications;
pub mod requests;

use std::sync::Arc;

use crate::repository::Repository;

use notifications::RequestEvents;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
}

impl Services {
    /// Create all services with the given repository and event publisher
    pub fn new(
        repository: Repository,
        events: Arc<dyn RequestEvents>,
        notify_email: impl Into<String>,
    ) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.equipment),
            requests: requests::RequestsService::new(repository.requests, events, notify_email),
        }
    }
}
