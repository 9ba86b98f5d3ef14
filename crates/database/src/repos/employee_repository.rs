//! Employee repository for database operations.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryScalar};
use sqlx::{PgPool, Postgres, Row};

use crate::entities::employee::{Employee, EmployeeInput};
use crate::query::{build_user_query, Page, SqlParam, UserFilters};
use crate::types::errors::{DirectoryError, DirectoryResult};

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, gender, location, email, phone, department, role, salary, join_date, years_of_experience, created_at, updated_at";

/// Repository for employee directory rows.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the filtered listing: total count plus one page of rows, both
    /// bound to the same filter parameters in the same order.
    pub async fn list(
        &self,
        filters: &UserFilters,
        page: Page,
    ) -> DirectoryResult<(Vec<Employee>, i64)> {
        let query = build_user_query(filters, page);

        let mut count = sqlx::query_scalar::<_, i64>(&query.count_sql);
        for param in &query.params {
            count = bind_scalar(count, param);
        }
        let total = count.fetch_one(&self.pool).await?;

        let mut rows_query = sqlx::query(&query.page_sql);
        for param in &query.params {
            rows_query = bind_query(rows_query, param);
        }
        let rows = rows_query
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        let mut employees = Vec::with_capacity(rows.len());
        for row in &rows {
            employees.push(map_row(row)?);
        }

        Ok((employees, total))
    }

    /// Insert a new employee. Uniqueness of email and phone is enforced by
    /// the table constraints; a violation surfaces as a conflict naming the
    /// colliding field.
    pub async fn create(&self, input: &EmployeeInput) -> DirectoryResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (first_name, last_name, gender, location, email, phone, department, role, salary, join_date, years_of_experience, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW()) RETURNING id",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.gender)
        .bind(&input.location)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.department)
        .bind(&input.role)
        .bind(input.salary)
        .bind(input.join_date)
        .bind(input.years_of_experience)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Full-row update refreshing `updated_at`.
    pub async fn update(&self, id: i64, input: &EmployeeInput) -> DirectoryResult<()> {
        let result = sqlx::query(
            "UPDATE users SET first_name = $1, last_name = $2, gender = $3, location = $4, email = $5, phone = $6, department = $7, role = $8, salary = $9, join_date = $10, years_of_experience = $11, updated_at = NOW() WHERE id = $12",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.gender)
        .bind(&input.location)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.department)
        .bind(&input.role)
        .bind(input.salary)
        .bind(input.join_date)
        .bind(input.years_of_experience)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound);
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DirectoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound);
        }

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn email_exists(&self, email: &str) -> DirectoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

fn bind_query<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q SqlParam,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        SqlParam::Text(value) => query.bind(value.as_str()),
        SqlParam::Int(value) => query.bind(*value),
        SqlParam::Date(value) => query.bind(*value),
    }
}

fn bind_scalar<'q>(
    query: QueryScalar<'q, Postgres, i64, PgArguments>,
    param: &'q SqlParam,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    match param {
        SqlParam::Text(value) => query.bind(value.as_str()),
        SqlParam::Int(value) => query.bind(*value),
        SqlParam::Date(value) => query.bind(*value),
    }
}

fn map_row(row: &PgRow) -> DirectoryResult<Employee> {
    Ok(Employee {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        gender: row.try_get("gender")?,
        location: row.try_get("location")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        department: row.try_get("department")?,
        role: row.try_get("role")?,
        salary: row.try_get("salary")?,
        join_date: row.try_get("join_date")?,
        years_of_experience: row.try_get("years_of_experience")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
