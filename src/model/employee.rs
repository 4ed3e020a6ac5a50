use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee record as published by the identity directory.
///
/// The time clock only reads these rows: the workload feeds the hours
/// calculation and the company id scopes manager authority.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "email": "john.doe@company.com",
        "name": "John Doe",
        "workload": 40.0,
        "company_id": "12345678000199",
        "is_manager": false,
        "is_admin": false,
        "active": true
    })
)]
pub struct Employee {
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "John Doe")]
    pub name: String,

    /// Contracted hours per week. Values below 0.1 count as unset.
    #[schema(example = 40.0)]
    pub workload: f64,

    #[schema(example = "12345678000199")]
    pub company_id: String,

    #[schema(example = false)]
    pub is_manager: bool,

    #[schema(example = false)]
    pub is_admin: bool,

    #[schema(example = true)]
    pub active: bool,
}

impl Employee {
    pub fn same_company(&self, other: &Employee) -> bool {
        self.company_id == other.company_id
    }
}
