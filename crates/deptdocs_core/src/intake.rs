//! Document intake.
//!
//! Documents arrive either field by field (`create`) or as cleaned text plus
//! the `field: value` lines an extractor produced for it (`ingest`). Text
//! recognition and field extraction happen upstream; only the deterministic
//! steps (keyword classification, line parsing, type resolution) live here.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DeptDocsError;
use crate::ports::{DocumentStore, DocumentTypeStore, FieldExtractor, Result};
use crate::principal::{Principal, ADMIN_ROLE};
use crate::types::{Document, DocumentInput, NewDocument};

/// Known document types, in keyword priority order.
pub const DOCUMENT_TYPE_LABELS: [&str; 3] = ["Travel Order", "Office Order", "Special Order"];

pub const TEXT_REQUIRED: &str = "The text field is required.";
pub const INVALID_DOCUMENT_TYPE: &str = "The selected document type is invalid.";
pub const METADATA_NOT_OBJECT: &str = "The metadata must be an object.";
pub const EXTRACTOR_MISSING: &str =
    "The extracted fields are required when no field extractor is configured.";

/// First label whose name appears in `text`, ignoring case.
pub fn classify_document_type(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    DOCUMENT_TYPE_LABELS
        .iter()
        .copied()
        .find(|label| upper.contains(&label.to_uppercase()))
}

/// Fields parsed from extractor output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    /// `None` when the extractor reported the list as missing.
    pub employee_names: Option<Vec<String>>,
    /// Every other field by lower-cased name; `None` marks a missing value.
    pub fields: BTreeMap<String, Option<String>>,
}

impl ExtractedFields {
    /// Parse `name: value` lines. Lines without `": "` are skipped and a
    /// later line overrides an earlier one with the same name.
    pub fn parse(response: &str) -> Self {
        let mut parsed = Self::default();
        for line in response.lines() {
            let Some((name, value)) = line.split_once(": ") else {
                continue;
            };
            let name = name.trim().to_lowercase();
            let value = value.trim();
            let present = value != "None";
            if name == "employee_names" {
                parsed.employee_names = present.then(|| parse_name_list(value));
            } else {
                parsed
                    .fields
                    .insert(name, present.then(|| value.to_string()));
            }
        }
        parsed
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    /// The non-name fields as a JSON object, missing values as `null`.
    pub fn metadata(&self) -> JsonValue {
        JsonValue::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().map_or(JsonValue::Null, JsonValue::String)))
                .collect(),
        )
    }
}

/// `[Jane Doe, "Jon Roe"]` → `["Jane Doe", "Jon Roe"]`.
fn parse_name_list(value: &str) -> Vec<String> {
    value
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect()
}

fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

fn invalid(message: &str) -> DeptDocsError {
    DeptDocsError::ValidationFailed(message.into())
}

/// Raw `POST /documents/ingest` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Extractor output produced upstream. When absent the configured
    /// [`FieldExtractor`] runs on `text`.
    #[serde(default)]
    pub extracted_fields: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub document: Document,
    pub document_type: Option<String>,
    pub extracted_fields: ExtractedFields,
}

pub struct DocumentIntakeService {
    documents: Arc<dyn DocumentStore>,
    document_types: Arc<dyn DocumentTypeStore>,
    extractor: Option<Arc<dyn FieldExtractor>>,
}

impl DocumentIntakeService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        document_types: Arc<dyn DocumentTypeStore>,
    ) -> Self {
        Self {
            documents,
            document_types,
            extractor: None,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn FieldExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Store a document given field by field. Admin only.
    pub async fn create(&self, principal: &Principal, input: &DocumentInput) -> Result<Document> {
        principal.require_role(ADMIN_ROLE)?;

        let metadata = match &input.metadata {
            None | Some(JsonValue::Null) => JsonValue::Object(Default::default()),
            Some(object @ JsonValue::Object(_)) => object.clone(),
            Some(_) => return Err(invalid(METADATA_NOT_OBJECT)),
        };
        if let Some(id) = input.document_type_id {
            if self.document_types.get(id).await?.is_none() {
                return Err(invalid(INVALID_DOCUMENT_TYPE));
            }
        }

        let new = NewDocument {
            title: non_blank(input.title.as_deref()),
            document_type_id: input.document_type_id,
            employee_names: clean_names(input.employee_names.as_deref().unwrap_or_default()),
            metadata,
        };
        let document = self.documents.create(&new).await?;
        tracing::info!(
            id = document.id,
            actor = %principal.actor_id,
            employees = document.employee_names.len(),
            "document created"
        );
        Ok(document)
    }

    /// Classify `text`, parse its extracted fields and store the result.
    /// Admin only.
    pub async fn ingest(
        &self,
        principal: &Principal,
        input: &IntakeInput,
    ) -> Result<IntakeOutcome> {
        principal.require_role(ADMIN_ROLE)?;

        let text = non_blank(input.text.as_deref()).ok_or_else(|| invalid(TEXT_REQUIRED))?;
        let supplied = input
            .extracted_fields
            .as_deref()
            .filter(|lines| !lines.trim().is_empty());
        let response = match (supplied, &self.extractor) {
            (Some(lines), _) => lines.to_string(),
            (None, Some(extractor)) => extractor.extract_fields(&text).await?,
            (None, None) => return Err(invalid(EXTRACTOR_MISSING)),
        };
        let extracted = ExtractedFields::parse(&response);

        let label = self.classify(&text).await?;
        let document_type_id = match &label {
            Some(label) => self.document_types.find_by_label(label).await?.map(|t| t.id),
            None => None,
        };

        let new = NewDocument {
            title: non_blank(input.title.as_deref())
                .or_else(|| non_blank(extracted.field("subject"))),
            document_type_id,
            employee_names: clean_names(extracted.employee_names.as_deref().unwrap_or_default()),
            metadata: extracted.metadata(),
        };
        let document = self.documents.create(&new).await?;
        tracing::info!(
            id = document.id,
            actor = %principal.actor_id,
            document_type = ?label,
            employees = document.employee_names.len(),
            "document ingested"
        );
        Ok(IntakeOutcome {
            document,
            document_type: label,
            extracted_fields: extracted,
        })
    }

    /// Keywords first; otherwise the extractor's answer, kept only when it
    /// names a known type.
    pub async fn classify(&self, text: &str) -> Result<Option<String>> {
        if let Some(label) = classify_document_type(text) {
            return Ok(Some(label.to_string()));
        }
        let Some(extractor) = &self.extractor else {
            return Ok(None);
        };
        let answer = extractor.classify(text).await?;
        Ok(answer.and_then(|a| {
            DOCUMENT_TYPE_LABELS
                .iter()
                .find(|label| label.eq_ignore_ascii_case(a.trim()))
                .map(|label| label.to_string())
        }))
    }
}
