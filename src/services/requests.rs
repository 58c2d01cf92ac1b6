//! Maintenance request intake service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::Equipment,
        request::{
            CreateMaintenanceRequest, MaintenanceRequest, NewMaintenanceRequest, RequestQuery,
            UpdateMaintenanceRequest,
        },
    },
    repository::RequestStore,
};

use super::notifications::{RequestCreated, RequestEvents};

#[derive(Clone)]
pub struct RequestsService {
    store: Arc<dyn RequestStore>,
    events: Arc<dyn RequestEvents>,
    notify_email: String,
}

impl RequestsService {
    pub fn new(
        store: Arc<dyn RequestStore>,
        events: Arc<dyn RequestEvents>,
        notify_email: impl Into<String>,
    ) -> Self {
        Self {
            store,
            events,
            notify_email: notify_email.into(),
        }
    }

    /// Create a request for an existing equipment
    ///
    /// Category and team default to the equipment's values when the payload
    /// leaves them unset or sets them to 0. Nothing is written when the
    /// equipment does not exist.
    pub async fn create(&self, data: CreateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        data.validate()?;

        let equipment = self
            .store
            .find_equipment_by_id(data.equipment_id)
            .await?
            .ok_or_else(|| AppError::Validation("Equipment not found".to_string()))?;

        let fields = resolve_defaults(data, &equipment);
        let request = self.store.insert_request(&fields).await?;

        tracing::info!(
            "Created maintenance request {} for equipment {}",
            request.id,
            equipment.id
        );

        self.events
            .request_created(RequestCreated::new(&request, &equipment, &self.notify_email));

        Ok(request)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.store
            .find_request_by_id(id)
            .await?
            .ok_or_else(request_not_found)
    }

    /// List requests, newest first
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        self.store.list_requests(query.company_filter()).await
    }

    /// Apply a partial update; `equipment_id` is not re-validated
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<MaintenanceRequest> {
        data.validate()?;

        let existing = self.get_by_id(id).await?;
        if data.is_empty() {
            return Ok(existing);
        }

        let request = self
            .store
            .update_request(id, data)
            .await?
            .ok_or_else(request_not_found)?;

        tracing::info!("Updated maintenance request {}", id);
        Ok(request)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete_request(id).await? {
            return Err(request_not_found());
        }
        tracing::info!("Deleted maintenance request {}", id);
        Ok(())
    }

    /// Check that the store is reachable
    pub async fn ready(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

fn request_not_found() -> AppError {
    AppError::NotFound("Request not found".to_string())
}

/// Fill category and team from the equipment when the payload value is
/// missing or 0
pub fn resolve_defaults(data: CreateMaintenanceRequest, equipment: &Equipment) -> NewMaintenanceRequest {
    let category_id = data
        .category_id
        .filter(|id| *id != 0)
        .unwrap_or(equipment.category_id);
    let team_id = match data.team_id {
        Some(id) if id != 0 => Some(id),
        _ => equipment.maintenance_team_id,
    };

    NewMaintenanceRequest {
        equipment_id: data.equipment_id,
        company_id: data.company_id,
        category_id,
        team_id,
        technician_id: data.technician_id,
        maintenance_type: data.maintenance_type,
        priority: data.priority,
        subject: data.subject,
        description: data.description,
        scheduled_date: data.scheduled_date,
        duration_hours: data.duration_hours,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{
        repository::{memory::MemoryStore, EquipmentStore, MockRequestStore},
        services::notifications::MockRequestEvents,
    };

    fn equipment(category_id: i32, team_id: Option<i32>) -> Equipment {
        let now = Utc::now();
        Equipment {
            id: 3,
            name: "Forklift".to_string(),
            category_id,
            company_id: 5,
            used_by_id: None,
            maintenance_team_id: team_id,
            assign_dt: None,
            technician_id: None,
            employee: None,
            is_scrapped: false,
            scrapped_dt: None,
            used_in_location: None,
            work_center_id: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored(fields: &NewMaintenanceRequest) -> MaintenanceRequest {
        let now = Utc::now();
        MaintenanceRequest {
            id: 1,
            equipment_id: fields.equipment_id,
            company_id: fields.company_id,
            category_id: Some(fields.category_id),
            team_id: fields.team_id,
            technician_id: fields.technician_id,
            maintenance_type: fields.maintenance_type,
            priority: fields.priority,
            subject: fields.subject.clone(),
            description: fields.description.clone(),
            scheduled_date: fields.scheduled_date,
            duration_hours: fields.duration_hours,
            created_at: now,
            updated_at: now,
        }
    }

    fn quiet_events() -> Arc<MockRequestEvents> {
        let mut events = MockRequestEvents::new();
        events.expect_request_created().return_const(());
        Arc::new(events)
    }

    fn service(store: MockRequestStore, events: Arc<MockRequestEvents>) -> RequestsService {
        RequestsService::new(Arc::new(store), events, "admin@company.com")
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let fields = resolve_defaults(
            CreateMaintenanceRequest {
                equipment_id: 3,
                ..Default::default()
            },
            &equipment(2, Some(4)),
        );
        assert_eq!(fields.category_id, 2);
        assert_eq!(fields.team_id, Some(4));
    }

    #[test]
    fn test_defaults_override_zero() {
        let fields = resolve_defaults(
            CreateMaintenanceRequest {
                equipment_id: 3,
                category_id: Some(0),
                team_id: Some(0),
                ..Default::default()
            },
            &equipment(2, Some(4)),
        );
        assert_eq!(fields.category_id, 2);
        assert_eq!(fields.team_id, Some(4));
    }

    #[test]
    fn test_defaults_keep_explicit_values() {
        let fields = resolve_defaults(
            CreateMaintenanceRequest {
                equipment_id: 3,
                category_id: Some(8),
                team_id: Some(9),
                ..Default::default()
            },
            &equipment(2, Some(4)),
        );
        assert_eq!(fields.category_id, 8);
        assert_eq!(fields.team_id, Some(9));
    }

    #[test]
    fn test_defaults_propagate_missing_team() {
        let fields = resolve_defaults(
            CreateMaintenanceRequest {
                equipment_id: 3,
                ..Default::default()
            },
            &equipment(2, None),
        );
        assert_eq!(fields.team_id, None);
    }

    #[tokio::test]
    async fn test_create_writes_resolved_fields_once() {
        let mut store = MockRequestStore::new();
        store
            .expect_find_equipment_by_id()
            .with(eq(3))
            .once()
            .returning(|_| Ok(Some(equipment(2, Some(4)))));
        store
            .expect_insert_request()
            .withf(|fields| fields.category_id == 2 && fields.team_id == Some(4))
            .once()
            .returning(|fields| Ok(stored(fields)));

        let mut events = MockRequestEvents::new();
        events
            .expect_request_created()
            .withf(|event| event.request_id == 1 && event.equipment_name == "Forklift")
            .once()
            .return_const(());

        let created = service(store, Arc::new(events))
            .create(CreateMaintenanceRequest {
                equipment_id: 3,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.category_id, Some(2));
        assert_eq!(created.team_id, Some(4));
    }

    #[tokio::test]
    async fn test_create_unknown_equipment_writes_nothing() {
        let mut store = MockRequestStore::new();
        store.expect_find_equipment_by_id().once().returning(|_| Ok(None));
        store.expect_insert_request().never();

        let mut events = MockRequestEvents::new();
        events.expect_request_created().never();

        let result = service(store, Arc::new(events))
            .create(CreateMaintenanceRequest {
                equipment_id: 99,
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_invalid_payload_skips_lookup() {
        let mut store = MockRequestStore::new();
        store.expect_find_equipment_by_id().never();
        store.expect_insert_request().never();

        let result = service(store, quiet_events())
            .create(CreateMaintenanceRequest {
                equipment_id: 3,
                maintenance_type: Some(4),
                ..Default::default()
            })
            .await;

        assert_err!(result);
    }

    #[tokio::test]
    async fn test_update_missing_request_is_not_found() {
        let mut store = MockRequestStore::new();
        store.expect_find_request_by_id().once().returning(|_| Ok(None));
        store.expect_update_request().never();

        let result = service(store, quiet_events())
            .update(42, &UpdateMaintenanceRequest::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_invalid_priority_writes_nothing() {
        let mut store = MockRequestStore::new();
        store.expect_find_request_by_id().never();
        store.expect_update_request().never();

        let result = service(store, quiet_events())
            .update(
                1,
                &UpdateMaintenanceRequest {
                    priority: Some(Some(9)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_request_is_not_found() {
        let mut store = MockRequestStore::new();
        store.expect_delete_request().with(eq(42)).once().returning(|_| Ok(false));

        let result = service(store, quiet_events()).delete(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_not_a_not_found() {
        let mut store = MockRequestStore::new();
        store
            .expect_delete_request()
            .once()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let result = service(store, quiet_events()).delete(1).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_changes_only_team_against_memory_store() {
        let memory = Arc::new(MemoryStore::new());
        let equipment = EquipmentStore::insert(
            memory.as_ref(),
            &serde_json::from_value(serde_json::json!({
                "name": "Press",
                "categoryId": 2,
                "companyId": 5,
                "maintenanceTeamId": 4
            }))
            .unwrap(),
        )
        .await
        .unwrap();

        let service = RequestsService::new(memory, quiet_events(), "admin@company.com");
        let created = service
            .create(CreateMaintenanceRequest {
                equipment_id: equipment.id,
                technician_id: Some(11),
                subject: Some("Hydraulic leak".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let update: UpdateMaintenanceRequest =
            serde_json::from_value(serde_json::json!({ "teamId": 7 })).unwrap();
        let updated = assert_ok!(service.update(created.id, &update).await);

        assert_eq!(updated.team_id, Some(7));
        assert_eq!(updated.technician_id, Some(11));
        assert_eq!(updated.subject.as_deref(), Some("Hydraulic leak"));
        assert_eq!(updated.category_id, created.category_id);
        assert_eq!(updated.equipment_id, created.equipment_id);
    }
}
