//! Equipment service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::EquipmentStore,
};

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let company_id = query.company_id.filter(|id| *id != 0);
        self.store.list(company_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(equipment_not_found)
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.store.insert(data).await?;
        tracing::info!("Created equipment {} ({})", equipment.id, equipment.name);
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self
            .store
            .update(id, data)
            .await?
            .ok_or_else(equipment_not_found)?;
        tracing::info!("Updated equipment {}", id);
        Ok(equipment)
    }
}

fn equipment_not_found() -> AppError {
    AppError::NotFound("Equipment not found".to_string())
}
