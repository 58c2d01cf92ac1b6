//! In-process store
//!
//! Implements both store traits over maps guarded by a single lock. Used by
//! the test suites and by `database.url = "memory://"` for local demos.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{EquipmentStore, RequestStore};
use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        request::{MaintenanceRequest, NewMaintenanceRequest, UpdateMaintenanceRequest},
    },
};

#[derive(Default)]
struct Tables {
    equipment: BTreeMap<i32, Equipment>,
    requests: BTreeMap<i32, MaintenanceRequest>,
    next_equipment_id: i32,
    next_request_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EquipmentStore for MemoryStore {
    async fn list(&self, company_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Equipment> = tables
            .equipment
            .values()
            .filter(|e| company_id.map_or(true, |c| e.company_id == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        Ok(self.tables.read().await.equipment.get(&id).cloned())
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let mut tables = self.tables.write().await;
        tables.next_equipment_id += 1;
        let now = Utc::now();
        let row = Equipment {
            id: tables.next_equipment_id,
            name: data.name.clone(),
            category_id: data.category_id,
            company_id: data.company_id,
            used_by_id: data.used_by_id,
            maintenance_team_id: data.maintenance_team_id,
            assign_dt: data.assign_dt,
            technician_id: data.technician_id,
            employee: data.employee.clone(),
            is_scrapped: data.is_scrapped,
            scrapped_dt: data.scrapped_dt,
            used_in_location: data.used_in_location.clone(),
            work_center_id: data.work_center_id,
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.equipment.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Option<Equipment>> {
        let mut tables = self.tables.write().await;
        Ok(tables.equipment.get_mut(&id).map(|row| {
            data.apply_to(row);
            row.updated_at = Utc::now();
            row.clone()
        }))
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn find_equipment_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        EquipmentStore::find_by_id(self, id).await
    }

    async fn find_request_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRequest>> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn insert_request(&self, data: &NewMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let mut tables = self.tables.write().await;
        tables.next_request_id += 1;
        let now = Utc::now();
        let row = MaintenanceRequest {
            id: tables.next_request_id,
            equipment_id: data.equipment_id,
            company_id: data.company_id,
            category_id: Some(data.category_id),
            team_id: data.team_id,
            technician_id: data.technician_id,
            maintenance_type: data.maintenance_type,
            priority: data.priority,
            subject: data.subject.clone(),
            description: data.description.clone(),
            scheduled_date: data.scheduled_date,
            duration_hours: data.duration_hours,
            created_at: now,
            updated_at: now,
        };
        tables.requests.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_request(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRequest>> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.get_mut(&id).map(|row| {
            data.apply_to(row);
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete_request(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.requests.remove(&id).is_some())
    }

    async fn list_requests(&self, company_id: Option<i32>) -> AppResult<Vec<MaintenanceRequest>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<MaintenanceRequest> = tables
            .requests
            .values()
            .filter(|r| company_id.map_or(true, |c| r.company_id == Some(c)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lathe(company_id: i32) -> CreateEquipment {
        CreateEquipment {
            name: "Lathe".to_string(),
            category_id: 2,
            company_id,
            used_by_id: None,
            maintenance_team_id: Some(4),
            assign_dt: None,
            technician_id: None,
            employee: None,
            is_scrapped: false,
            scrapped_dt: None,
            used_in_location: None,
            work_center_id: None,
            description: None,
        }
    }

    fn new_request(equipment_id: i32, company_id: Option<i32>) -> NewMaintenanceRequest {
        NewMaintenanceRequest {
            equipment_id,
            company_id,
            category_id: 2,
            team_id: None,
            technician_id: None,
            maintenance_type: None,
            priority: None,
            subject: None,
            description: None,
            scheduled_date: None,
            duration_hours: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let first = store.insert(&lathe(1)).await.unwrap();
        let second = store.insert(&lathe(1)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_requests_newest_first_with_filter() {
        let store = MemoryStore::new();
        store.insert_request(&new_request(1, Some(5))).await.unwrap();
        store.insert_request(&new_request(1, Some(6))).await.unwrap();
        store.insert_request(&new_request(1, Some(5))).await.unwrap();

        let ids: Vec<i32> = store
            .list_requests(Some(5))
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);

        let all: Vec<i32> = store.list_requests(None).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(all, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .update_request(42, &UpdateMaintenanceRequest::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let store = MemoryStore::new();
        let created = store.insert_request(&new_request(1, None)).await.unwrap();
        assert!(store.delete_request(created.id).await.unwrap());
        assert!(!store.delete_request(created.id).await.unwrap());
    }
}
