//! Maintenance request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Maintenance request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: i32,
    /// Equipment the request is about
    pub equipment_id: i32,
    pub company_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Maintenance team in charge
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
    /// Type (0=corrective, 1=preventive)
    pub maintenance_type: Option<i16>,
    /// Priority (0=low, 1=medium, 2=high)
    pub priority: Option<i16>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create maintenance request payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub equipment_id: i32,
    pub company_id: Option<i32>,
    /// Defaults to the equipment's category when absent or 0
    pub category_id: Option<i32>,
    /// Defaults to the equipment's maintenance team when absent or 0
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
    #[validate(range(min = 0, max = 1, message = "Unknown maintenance type"))]
    pub maintenance_type: Option<i16>,
    #[validate(range(min = 0, max = 2, message = "Priority must be 0, 1 or 2"))]
    pub priority: Option<i16>,
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, message = "Duration cannot be negative"))]
    pub duration_hours: Option<f64>,
}

/// Fully resolved field set written on creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRequest {
    pub equipment_id: i32,
    pub company_id: Option<i32>,
    pub category_id: i32,
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub maintenance_type: Option<i16>,
    pub priority: Option<i16>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
}

/// Partial update payload
///
/// Absent fields are left untouched; an explicit `null` clears a nullable
/// column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub equipment_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub company_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub team_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub technician_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i16>)]
    #[validate(range(min = 0, max = 1, message = "Unknown maintenance type"))]
    pub maintenance_type: Option<Option<i16>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i16>)]
    #[validate(range(min = 0, max = 2, message = "Priority must be 0, 1 or 2"))]
    pub priority: Option<Option<i16>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(range(min = 0.0, message = "Duration cannot be negative"))]
    pub duration_hours: Option<Option<f64>>,
}

impl UpdateMaintenanceRequest {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields to an existing record
    pub fn apply_to(&self, request: &mut MaintenanceRequest) {
        macro_rules! apply {
            ($($field:ident),*) => {
                $(
                    if let Some(ref val) = self.$field {
                        request.$field = val.clone();
                    }
                )*
            };
        }

        if let Some(equipment_id) = self.equipment_id {
            request.equipment_id = equipment_id;
        }
        apply!(
            company_id,
            category_id,
            team_id,
            technician_id,
            maintenance_type,
            priority,
            subject,
            description,
            scheduled_date,
            duration_hours
        );
    }
}

/// Query parameters for listing requests
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RequestQuery {
    /// Only requests of this company (0 is treated as no filter)
    pub company_id: Option<i32>,
}

impl RequestQuery {
    /// Company filter to apply, if any
    pub fn company_filter(&self) -> Option<i32> {
        self.company_id.filter(|id| *id != 0)
    }
}

/// Confirmation body returned by delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}
