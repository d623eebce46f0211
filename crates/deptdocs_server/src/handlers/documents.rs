//! Department document lookups and document intake. Lookups take the
//! department from the authenticated principal, never from the request.

use axum::{extract::Query, http::StatusCode, Extension, Json};
use deptdocs_core::error::DeptDocsError;
use deptdocs_core::intake::{ExtractedFields, IntakeInput};
use deptdocs_core::principal::{Principal, ADMIN_ROLE};
use deptdocs_core::types::{Document, DocumentInput, DocumentTypeId};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::Payload;
use crate::state::AppState;

pub const CREATE_FAILED: &str = "Failed to create document. Please try again.";

pub const INVALID_DOCUMENT_TYPE: &str = "The document type must be an integer.";

#[derive(Debug, Default, Deserialize)]
pub struct DocumentTypeQuery {
    pub document_type: Option<String>,
}

impl DocumentTypeQuery {
    /// Absent or blank means no filter.
    pub fn document_type_id(&self) -> Result<Option<DocumentTypeId>, DeptDocsError> {
        match self.document_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<DocumentTypeId>()
                .map(Some)
                .map_err(|_| DeptDocsError::ValidationFailed(INVALID_DOCUMENT_TYPE.into())),
        }
    }
}

/// GET /departments/documents
pub async fn department_documents(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.lookup.documents_for_actor(&principal, None).await?;
    Ok(Json(documents))
}

/// GET /departments/documents/by-type?document_type=<id>
pub async fn department_documents_by_type(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<DocumentTypeQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    // Authorization is checked before the query string is looked at.
    principal.require_department()?;
    let document_type_id = query.document_type_id()?;
    let documents = state
        .lookup
        .documents_for_actor(&principal, document_type_id)
        .await?;
    Ok(Json(documents))
}

/// GET /document-types/names
pub async fn document_type_names(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.lookup.list_document_type_names().await?))
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub message: &'static str,
    pub document: Document,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub message: &'static str,
    pub document: Document,
    pub document_type: Option<String>,
    pub extracted_fields: ExtractedFields,
}

/// POST /documents
pub async fn store(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Payload, AppError>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    // Authorization before the body is looked at.
    principal.require_role(ADMIN_ROLE)?;
    let input: DocumentInput = payload?.into_input()?;
    let document = state
        .intake
        .create(&principal, &input)
        .await
        .map_err(|e| AppError::mutation_failed(e, CREATE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            message: "Document created successfully.",
            document,
        }),
    ))
}

/// POST /documents/ingest
pub async fn ingest(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Payload, AppError>,
) -> Result<(StatusCode, Json<IntakeResponse>), AppError> {
    principal.require_role(ADMIN_ROLE)?;
    let input: IntakeInput = payload?.into_input()?;
    let outcome = state
        .intake
        .ingest(&principal, &input)
        .await
        .map_err(|e| AppError::mutation_failed(e, CREATE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        Json(IntakeResponse {
            message: "Document ingested successfully.",
            document: outcome.document,
            document_type: outcome.document_type,
            extracted_fields: outcome.extracted_fields,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: Option<&str>) -> DocumentTypeQuery {
        DocumentTypeQuery {
            document_type: raw.map(String::from),
        }
    }

    #[test]
    fn absent_or_blank_is_no_filter() {
        assert_eq!(query(None).document_type_id().unwrap(), None);
        assert_eq!(query(Some("")).document_type_id().unwrap(), None);
        assert_eq!(query(Some("  ")).document_type_id().unwrap(), None);
    }

    #[test]
    fn integers_are_filters() {
        assert_eq!(query(Some("2")).document_type_id().unwrap(), Some(2));
        assert_eq!(query(Some("0")).document_type_id().unwrap(), Some(0));
    }

    #[test]
    fn non_integer_is_validation_failure() {
        let err = query(Some("travel")).document_type_id().unwrap_err();
        assert!(matches!(err, DeptDocsError::ValidationFailed(_)));
    }
}
