//! Row shapes as they come out of Postgres, converted into core types.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::FromRow;

use deptdocs_core::activity::{ActivityKind, UserActivity};
use deptdocs_core::types::{Department, Document, DocumentType, Employee};

#[derive(Debug, FromRow)]
pub struct PgEmployeeRow {
    pub id: i64,
    pub department: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<PgEmployeeRow> for Employee {
    fn from(row: PgEmployeeRow) -> Self {
        Self {
            id: row.id,
            department: row.department,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PgDocumentRow {
    pub id: i64,
    pub title: Option<String>,
    pub document_type_id: Option<i64>,
    pub employee_names: Json<Vec<String>>,
    pub metadata: JsonValue,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PgDocumentRow> for Document {
    fn from(row: PgDocumentRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            document_type_id: row.document_type_id,
            employee_names: row.employee_names.0,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PgDocumentTypeRow {
    pub id: i64,
    pub document_type: String,
}

impl From<PgDocumentTypeRow> for DocumentType {
    fn from(row: PgDocumentTypeRow) -> Self {
        Self {
            id: row.id,
            document_type: row.document_type,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PgDepartmentRow {
    pub id: i64,
    pub department: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PgDepartmentRow> for Department {
    fn from(row: PgDepartmentRow) -> Self {
        Self {
            id: row.id,
            department: row.department,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PgActivityRow {
    pub actor_id: String,
    pub activity: String,
    pub occurred_at: DateTime<Utc>,
}

impl TryFrom<PgActivityRow> for UserActivity {
    type Error = String;

    fn try_from(row: PgActivityRow) -> Result<Self, Self::Error> {
        let activity = ActivityKind::parse(&row.activity)
            .ok_or_else(|| format!("unknown activity kind: {}", row.activity))?;
        Ok(Self {
            actor_id: row.actor_id,
            activity,
            occurred_at: row.occurred_at,
        })
    }
}
