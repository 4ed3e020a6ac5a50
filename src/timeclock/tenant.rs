use tracing::warn;

use super::error::{TimeClockError, TimeClockResult, require};
use crate::model::employee::Employee;
use crate::store::IdentityStore;

/// Same-company check shared by every manager-facing operation.
pub struct TenantGuard<'a> {
    identity: &'a dyn IdentityStore,
}

impl<'a> TenantGuard<'a> {
    pub fn new(identity: &'a dyn IdentityStore) -> Self {
        Self { identity }
    }

    /// Resolves `manager_email` to an employee flagged as manager.
    pub async fn resolve_manager(&self, manager_email: &str) -> TimeClockResult<Employee> {
        require(manager_email, "manager_email")?;

        match self.identity.find_employee(manager_email).await? {
            Some(manager) if manager.is_manager => Ok(manager),
            _ => {
                warn!(manager_email, "Manager not found");
                Err(TimeClockError::ManagerNotFound(manager_email.to_string()))
            }
        }
    }

    /// Resolves the subject and checks it belongs to `manager`'s company.
    /// Returns the subject.
    pub async fn admit(&self, manager: &Employee, subject_email: &str) -> TimeClockResult<Employee> {
        let subject = self
            .identity
            .find_employee(subject_email)
            .await?
            .ok_or_else(|| TimeClockError::EmployeeNotFound(subject_email.to_string()))?;

        if !manager.same_company(&subject) {
            warn!(
                manager_email = %manager.email,
                manager_company = %manager.company_id,
                employee_email = %subject.email,
                employee_company = %subject.company_id,
                "Cross-company access attempt"
            );
            return Err(TimeClockError::CrossCompany {
                manager: manager.email.clone(),
                employee: subject.email,
            });
        }

        Ok(subject)
    }

    /// Succeeds with the manager when manager and subject share a company.
    pub async fn authorize(&self, manager_email: &str, subject_email: &str) -> TimeClockResult<Employee> {
        let manager = self.resolve_manager(manager_email).await?;
        self.admit(&manager, subject_email).await?;
        Ok(manager)
    }
}
