//! Equipment repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::EquipmentStore;
use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for EquipmentRepository {
    async fn list(&self, company_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        let rows = match company_id {
            Some(company_id) => {
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE company_id = $1 ORDER BY name, id",
                )
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name, id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, category_id, company_id, used_by_id, maintenance_team_id,
                assign_dt, technician_id, employee, is_scrapped, scrapped_dt,
                used_in_location, work_center_id, description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.company_id)
        .bind(data.used_by_id)
        .bind(data.maintenance_team_id)
        .bind(data.assign_dt)
        .bind(data.technician_id)
        .bind(&data.employee)
        .bind(data.is_scrapped)
        .bind(data.scrapped_dt)
        .bind(&data.used_in_location)
        .bind(data.work_center_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Option<Equipment>> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category_id, "category_id");
        add_field!(data.used_by_id, "used_by_id");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.assign_dt, "assign_dt");
        add_field!(data.technician_id, "technician_id");
        add_field!(data.employee, "employee");
        add_field!(data.is_scrapped, "is_scrapped");
        add_field!(data.scrapped_dt, "scrapped_dt");
        add_field!(data.used_in_location, "used_in_location");
        add_field!(data.work_center_id, "work_center_id");
        add_field!(data.description, "description");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        // Nullable columns bind the inner Option so an explicit null clears them
        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category_id);
        bind_field!(data.used_by_id);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.assign_dt);
        bind_field!(data.technician_id);
        bind_field!(data.employee);
        bind_field!(data.is_scrapped);
        bind_field!(data.scrapped_dt);
        bind_field!(data.used_in_location);
        bind_field!(data.work_center_id);
        bind_field!(data.description);

        let row = builder.bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }
}
