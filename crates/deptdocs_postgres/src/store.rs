//! Postgres implementations of all deptdocs_core port traits.
//!
//! Each adapter is a newtype wrapping PgPool. All SQL is runtime-checked
//! (sqlx::query, not sqlx::query!) to avoid compile-time DB requirement.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use deptdocs_core::activity::UserActivity;
use deptdocs_core::departments::NAME_TAKEN;
use deptdocs_core::error::DeptDocsError;
use deptdocs_core::ports::{
    ActivityStore, DepartmentStore, DocumentStore, DocumentTypeStore, EmployeeStore, Result,
};
use deptdocs_core::types::*;

use crate::sqlx_types::{
    PgActivityRow, PgDepartmentRow, PgDocumentRow, PgDocumentTypeRow, PgEmployeeRow,
};

fn unavailable(e: sqlx::Error, what: &'static str) -> DeptDocsError {
    DeptDocsError::Unavailable(anyhow::Error::new(e).context(what))
}

/// Like [`unavailable`], except a unique violation on the department name
/// (a concurrent create/rename won the race) stays a validation failure.
fn write_failed(e: sqlx::Error, what: &'static str) -> DeptDocsError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique_violation {
        return DeptDocsError::ValidationFailed(NAME_TAKEN.into());
    }
    unavailable(e, what)
}

// ── PgEmployeeStore ───────────────────────────────────────────

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_department(&self, department_id: &str) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, PgEmployeeRow>(
            r#"
            SELECT id, department, first_name, last_name
            FROM employees
            WHERE department = $1
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to load department employees"))?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}

// ── PgDocumentStore ───────────────────────────────────────────

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_any_employee_name(
        &self,
        names: &[String],
        document_type_id: Option<DocumentTypeId>,
    ) -> Result<Vec<Document>> {
        // `?|` is true when any element of the text array is a top-level
        // string element of the JSONB array.
        let rows = sqlx::query_as::<_, PgDocumentRow>(
            r#"
            SELECT id, title, document_type_id, employee_names, metadata,
                   created_at, updated_at
            FROM documents
            WHERE employee_names ?| $1::text[]
              AND ($2::bigint IS NULL OR document_type_id = $2)
            "#,
        )
        .bind(names)
        .bind(document_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to load documents by employee name"))?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn create(&self, document: &NewDocument) -> Result<Document> {
        let row = sqlx::query_as::<_, PgDocumentRow>(
            r#"
            INSERT INTO documents (title, document_type_id, employee_names, metadata)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, document_type_id, employee_names, metadata,
                      created_at, updated_at
            "#,
        )
        .bind(&document.title)
        .bind(document.document_type_id)
        .bind(Json(&document.employee_names))
        .bind(&document.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to create document"))?;
        Ok(row.into())
    }
}

// ── PgDocumentTypeStore ───────────────────────────────────────

pub struct PgDocumentTypeStore {
    pool: PgPool,
}

impl PgDocumentTypeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentTypeStore for PgDocumentTypeStore {
    async fn list_all(&self) -> Result<Vec<DocumentType>> {
        let rows = sqlx::query_as::<_, PgDocumentTypeRow>(
            r#"SELECT id, document_type FROM document_types ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to list document types"))?;
        Ok(rows.into_iter().map(DocumentType::from).collect())
    }

    async fn get(&self, id: DocumentTypeId) -> Result<Option<DocumentType>> {
        let row = sqlx::query_as::<_, PgDocumentTypeRow>(
            r#"SELECT id, document_type FROM document_types WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to load document type"))?;
        Ok(row.map(DocumentType::from))
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<DocumentType>> {
        let row = sqlx::query_as::<_, PgDocumentTypeRow>(
            r#"
            SELECT id, document_type
            FROM document_types
            WHERE lower(document_type) = lower($1)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(label)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to find document type by label"))?;
        Ok(row.map(DocumentType::from))
    }
}

// ── PgDepartmentStore ─────────────────────────────────────────

pub struct PgDepartmentStore {
    pool: PgPool,
}

impl PgDepartmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for PgDepartmentStore {
    async fn create(&self, name: &str) -> Result<Department> {
        let row = sqlx::query_as::<_, PgDepartmentRow>(
            r#"
            INSERT INTO departments (department, created_at, updated_at)
            VALUES ($1, now(), now())
            RETURNING id, department, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_failed(e, "failed to create department"))?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query_as::<_, PgDepartmentRow>(
            r#"SELECT id, department, created_at, updated_at FROM departments ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to list departments"))?;
        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn get(&self, id: DepartmentId) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, PgDepartmentRow>(
            r#"SELECT id, department, created_at, updated_at FROM departments WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to load department"))?;
        Ok(row.map(Department::from))
    }

    async fn update(&self, id: DepartmentId, name: &str) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, PgDepartmentRow>(
            r#"
            UPDATE departments
            SET department = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, department, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_failed(e, "failed to update department"))?;
        Ok(row.map(Department::from))
    }

    async fn delete(&self, id: DepartmentId) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM departments WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable(e, "failed to delete department"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn name_taken(&self, name: &str, except: Option<DepartmentId>) -> Result<bool> {
        let (taken,) = sqlx::query_as::<_, (bool,)>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM departments
                WHERE department = $1
                  AND ($2::bigint IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(except)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to check department name"))?;
        Ok(taken)
    }
}

// ── PgActivityStore ───────────────────────────────────────────

pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn record(&self, activity: &UserActivity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_activities (actor_id, activity, occurred_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&activity.actor_id)
        .bind(activity.activity.as_str())
        .bind(activity.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to record user activity"))?;
        Ok(())
    }

    async fn list_for_actor(&self, actor_id: &str) -> Result<Vec<UserActivity>> {
        let rows = sqlx::query_as::<_, PgActivityRow>(
            r#"
            SELECT actor_id, activity, occurred_at
            FROM user_activities
            WHERE actor_id = $1
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(actor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable(e, "failed to list user activity"))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| DeptDocsError::Unavailable(anyhow::anyhow!(e)))
            })
            .collect()
    }
}
