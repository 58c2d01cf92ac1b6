//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    /// Owning company
    pub company_id: i32,
    /// Employee or department using the equipment
    pub used_by_id: Option<i32>,
    /// Team that maintains this equipment; default team for new requests
    pub maintenance_team_id: Option<i32>,
    /// Assignment date
    pub assign_dt: Option<DateTime<Utc>>,
    pub technician_id: Option<i32>,
    pub employee: Option<String>,
    pub is_scrapped: bool,
    pub scrapped_dt: Option<DateTime<Utc>>,
    pub used_in_location: Option<String>,
    pub work_center_id: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub category_id: i32,
    pub company_id: i32,
    pub used_by_id: Option<i32>,
    pub maintenance_team_id: Option<i32>,
    pub assign_dt: Option<DateTime<Utc>>,
    pub technician_id: Option<i32>,
    pub employee: Option<String>,
    #[serde(default)]
    pub is_scrapped: bool,
    pub scrapped_dt: Option<DateTime<Utc>>,
    pub used_in_location: Option<String>,
    pub work_center_id: Option<i32>,
    pub description: Option<String>,
}

/// Update equipment request
///
/// Absent fields are left untouched; an explicit `null` clears a nullable
/// column.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub used_by_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub maintenance_team_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub assign_dt: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub technician_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub employee: Option<Option<String>>,
    pub is_scrapped: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scrapped_dt: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub used_in_location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub work_center_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl UpdateEquipment {
    /// Apply the set fields to an existing record
    pub fn apply_to(&self, equipment: &mut Equipment) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(
                    if let Some(ref val) = self.$field {
                        equipment.$field = val.clone();
                    }
                )*
            };
        }

        set!(
            name,
            category_id,
            used_by_id,
            maintenance_team_id,
            assign_dt,
            technician_id,
            employee,
            is_scrapped,
            scrapped_dt,
            used_in_location,
            work_center_id,
            description
        );
    }
}

/// Query parameters for listing equipment
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Only equipment owned by this company
    pub company_id: Option<i32>,
}
