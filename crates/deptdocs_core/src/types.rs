//! Domain value types shared by the services and every store adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub type DepartmentId = i64;
pub type DocumentId = i64;
pub type DocumentTypeId = i64;

// ── Employees ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    /// Department name this employee belongs to (string identifier, not an id).
    pub department: String,
    pub first_name: String,
    pub last_name: String,
}

impl Employee {
    /// `first_name + " " + last_name`, verbatim. Documents reference employees
    /// by exactly this string.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ── Documents ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub document_type_id: Option<DocumentTypeId>,
    /// Full names of the employees the document concerns, in document order.
    #[serde(default)]
    pub employee_names: Vec<String>,
    /// Everything else extracted for the document; passed through untouched.
    #[serde(default)]
    pub metadata: JsonValue,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn mentions_any(&self, names: &[String]) -> bool {
        self.employee_names.iter().any(|n| names.contains(n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub id: DocumentTypeId,
    pub document_type: String,
}

/// A checked document, ready for [`crate::ports::DocumentStore::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: Option<String>,
    pub document_type_id: Option<DocumentTypeId>,
    pub employee_names: Vec<String>,
    pub metadata: JsonValue,
}

/// Raw `POST /documents` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub document_type_id: Option<DocumentTypeId>,
    #[serde(default)]
    pub employee_names: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

// ── Departments ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub department: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw create/update payload. `department` stays untyped so that a
/// non-string value surfaces as a validation failure rather than a
/// deserialisation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentInput {
    #[serde(default)]
    pub department: Option<JsonValue>,
}

impl DepartmentInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            department: Some(JsonValue::String(name.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(first: &str, last: &str) -> Employee {
        Employee {
            id: 1,
            department: "Sales".into(),
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    #[test]
    fn full_name_joins_with_single_space() {
        assert_eq!(employee("Jane", "Doe").full_name(), "Jane Doe");
    }

    #[test]
    fn full_name_keeps_case_and_whitespace() {
        assert_eq!(employee("jane ", "DOE").full_name(), "jane  DOE");
        assert_eq!(employee("", "Doe").full_name(), " Doe");
    }

    #[test]
    fn mentions_any_is_exact_string_match() {
        let doc = Document {
            id: 1,
            title: None,
            document_type_id: None,
            employee_names: vec!["Jon Roe".into(), "Amy Lee".into()],
            metadata: JsonValue::Null,
            created_at: None,
            updated_at: None,
        };
        assert!(doc.mentions_any(&["Amy Lee".into()]));
        assert!(!doc.mentions_any(&["amy lee".into()]));
        assert!(!doc.mentions_any(&["Amy".into()]));
        assert!(!doc.mentions_any(&[]));
    }

    #[test]
    fn department_input_accepts_missing_field() {
        let input: DepartmentInput = serde_json::from_str("{}").unwrap();
        assert!(input.department.is_none());
    }

    #[test]
    fn department_input_keeps_non_string_values() {
        let input: DepartmentInput = serde_json::from_str(r#"{"department": 42}"#).unwrap();
        assert_eq!(input.department, Some(JsonValue::from(42)));
    }
}
