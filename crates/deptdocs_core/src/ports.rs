//! Port traits for every external store the services talk to.
//!
//! Implemented by `deptdocs_postgres` for production and by
//! [`crate::memory`] for tests and local runs. [`FieldExtractor`] has no
//! in-tree implementation; deployments that want text-only intake plug one in.

use async_trait::async_trait;

use crate::activity::UserActivity;
use crate::error::DeptDocsError;
use crate::types::*;

pub type Result<T> = std::result::Result<T, DeptDocsError>;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employees whose `department` equals `department_id` exactly.
    async fn find_by_department(&self, department_id: &str) -> Result<Vec<Employee>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents whose `employee_names` contains at least one of `names`,
    /// further restricted to `document_type_id` when given.
    ///
    /// `names` is never empty when called from the lookup service.
    async fn find_by_any_employee_name(
        &self,
        names: &[String],
        document_type_id: Option<DocumentTypeId>,
    ) -> Result<Vec<Document>>;

    async fn create(&self, document: &NewDocument) -> Result<Document>;
}

#[async_trait]
pub trait DocumentTypeStore: Send + Sync {
    /// Every document type, in storage order.
    async fn list_all(&self) -> Result<Vec<DocumentType>>;
    async fn get(&self, id: DocumentTypeId) -> Result<Option<DocumentType>>;
    /// Lowest-id type whose label equals `label`, ignoring ASCII case.
    async fn find_by_label(&self, label: &str) -> Result<Option<DocumentType>>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn create(&self, name: &str) -> Result<Department>;
    async fn list(&self) -> Result<Vec<Department>>;
    async fn get(&self, id: DepartmentId) -> Result<Option<Department>>;
    /// Returns `None` when no department has this id.
    async fn update(&self, id: DepartmentId, name: &str) -> Result<Option<Department>>;
    /// Returns `false` when no department has this id.
    async fn delete(&self, id: DepartmentId) -> Result<bool>;
    /// Whether another department already uses `name`, ignoring `except`.
    async fn name_taken(&self, name: &str, except: Option<DepartmentId>) -> Result<bool>;
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn record(&self, activity: &UserActivity) -> Result<()>;
    /// Newest first.
    async fn list_for_actor(&self, actor_id: &str) -> Result<Vec<UserActivity>>;
}

/// Turns cleaned document text into structured fields.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// One `field: value` line per field, `employee_names: [..]` included.
    async fn extract_fields(&self, text: &str) -> Result<String>;

    /// A type label for text that names none of the known types.
    async fn classify(&self, text: &str) -> Result<Option<String>>;
}
