//! Department CRUD with name validation.
//!
//! Rules for the `department` field: required, string, at most
//! [`MAX_NAME_CHARS`] characters, unique across departments. The value is
//! trimmed before any check and stored trimmed.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::DeptDocsError;
use crate::ports::{DepartmentStore, Result};
use crate::types::{Department, DepartmentId, DepartmentInput};

pub const MAX_NAME_CHARS: usize = 255;

pub const NAME_REQUIRED: &str = "The department field is required.";
pub const NAME_NOT_STRING: &str = "The department must be a string.";
pub const NAME_TOO_LONG: &str = "The department may not be greater than 255 characters.";
pub const NAME_TAKEN: &str = "The department has already been taken.";

/// Check the shape of a department name, without the uniqueness rule.
pub fn validate_name(input: &DepartmentInput) -> Result<String> {
    let raw = match &input.department {
        None | Some(JsonValue::Null) => return Err(invalid(NAME_REQUIRED)),
        Some(JsonValue::String(s)) => s,
        Some(_) => return Err(invalid(NAME_NOT_STRING)),
    };
    let name = raw.trim();
    if name.is_empty() {
        return Err(invalid(NAME_REQUIRED));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(invalid(NAME_TOO_LONG));
    }
    Ok(name.to_string())
}

fn invalid(message: &str) -> DeptDocsError {
    DeptDocsError::ValidationFailed(message.into())
}

fn not_found(id: DepartmentId) -> DeptDocsError {
    DeptDocsError::NotFound(format!("department {id}"))
}

pub struct DepartmentService {
    store: Arc<dyn DepartmentStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn DepartmentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: &DepartmentInput) -> Result<Department> {
        let name = validate_name(input)?;
        if self.store.name_taken(&name, None).await? {
            return Err(invalid(NAME_TAKEN));
        }
        let department = self.store.create(&name).await?;
        tracing::info!(id = department.id, name = %department.department, "department created");
        Ok(department)
    }

    pub async fn list(&self) -> Result<Vec<Department>> {
        self.store.list().await
    }

    pub async fn find(&self, id: DepartmentId) -> Result<Department> {
        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Existence is checked before the payload is validated.
    pub async fn update(&self, id: DepartmentId, input: &DepartmentInput) -> Result<Department> {
        self.find(id).await?;
        let name = validate_name(input)?;
        if self.store.name_taken(&name, Some(id)).await? {
            return Err(invalid(NAME_TAKEN));
        }
        let department = self
            .store
            .update(id, &name)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, name = %department.department, "department updated");
        Ok(department)
    }

    pub async fn delete(&self, id: DepartmentId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "department deleted");
        Ok(())
    }
}
