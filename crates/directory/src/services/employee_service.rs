//! Employee directory service.

use sqlx::PgPool;
use tracing::{info, warn};

use staffdesk_database::{
    DirectoryResult, Employee, EmployeePayload, EmployeeRepository, Page, UserFilters,
};

/// Service orchestrating employee directory operations.
pub struct EmployeeService {
    repository: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EmployeeRepository::new(pool),
        }
    }

    /// Filtered, paginated listing: one page of rows plus the total count
    /// under the same filters.
    pub async fn list(
        &self,
        filters: &UserFilters,
        page: Page,
    ) -> DirectoryResult<(Vec<Employee>, i64)> {
        self.repository.list(filters, page).await
    }

    /// Create an employee from the raw payload. Normalization rejects
    /// malformed numbers and dates before anything is written; uniqueness is
    /// left to the table constraints.
    pub async fn create(&self, payload: EmployeePayload) -> DirectoryResult<i64> {
        let input = payload.normalize()?;
        let id = self.repository.create(&input).await?;

        info!(id, email = %input.email, "employee record created");
        Ok(id)
    }

    pub async fn update(&self, id: i64, payload: EmployeePayload) -> DirectoryResult<()> {
        let input = payload.normalize()?;
        self.repository.update(id, &input).await?;

        info!(id, "employee record updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DirectoryResult<()> {
        self.repository.delete(id).await?;

        warn!(id, "employee record deleted");
        Ok(())
    }
}
