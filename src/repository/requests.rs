//! Maintenance requests repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::RequestStore;
use crate::{
    error::AppResult,
    models::{
        equipment::Equipment,
        request::{MaintenanceRequest, NewMaintenanceRequest, UpdateMaintenanceRequest},
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestsRepository {
    async fn find_equipment_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_request_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRequest>> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_request(&self, data: &NewMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                equipment_id, company_id, category_id, team_id, technician_id,
                maintenance_type, priority, subject, description,
                scheduled_date, duration_hours
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.company_id)
        .bind(data.category_id)
        .bind(data.team_id)
        .bind(data.technician_id)
        .bind(data.maintenance_type)
        .bind(data.priority)
        .bind(&data.subject)
        .bind(&data.description)
        .bind(data.scheduled_date)
        .bind(data.duration_hours)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_request(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRequest>> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.equipment_id, "equipment_id");
        add_f!(data.company_id, "company_id");
        add_f!(data.category_id, "category_id");
        add_f!(data.team_id, "team_id");
        add_f!(data.technician_id, "technician_id");
        add_f!(data.maintenance_type, "maintenance_type");
        add_f!(data.priority, "priority");
        add_f!(data.subject, "subject");
        add_f!(data.description, "description");
        add_f!(data.scheduled_date, "scheduled_date");
        add_f!(data.duration_hours, "duration_hours");

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query).bind(now);

        macro_rules! bind_f {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_f!(data.equipment_id);
        bind_f!(data.company_id);
        bind_f!(data.category_id);
        bind_f!(data.team_id);
        bind_f!(data.technician_id);
        bind_f!(data.maintenance_type);
        bind_f!(data.priority);
        bind_f!(data.subject);
        bind_f!(data.description);
        bind_f!(data.scheduled_date);
        bind_f!(data.duration_hours);

        let row = builder.bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete_request(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_requests(&self, company_id: Option<i32>) -> AppResult<Vec<MaintenanceRequest>> {
        let mut query = String::from("SELECT * FROM maintenance_requests");
        if company_id.is_some() {
            query.push_str(" WHERE company_id = $1");
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query);
        if let Some(company_id) = company_id {
            builder = builder.bind(company_id);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
