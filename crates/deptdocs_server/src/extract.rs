//! Request body extraction.
//!
//! Mutating endpoints accept either an urlencoded form or a JSON object.
//! Every rejection is an [`AppError`], so bad bodies still answer with
//! `{"error": ...}`.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use deptdocs_core::types::DepartmentInput;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;

pub const BODY_NOT_OBJECT: &str = "The request body must be a JSON object.";

/// Top-level body fields. Form values arrive as JSON strings.
#[derive(Debug, Default)]
pub struct Payload(pub Map<String, JsonValue>);

impl Payload {
    pub fn department_input(mut self) -> DepartmentInput {
        DepartmentInput {
            department: self.0.remove("department"),
        }
    }

    /// Deserialize into a typed input; shape errors are 422s.
    pub fn into_input<T: DeserializeOwned>(self) -> Result<T, AppError> {
        serde_json::from_value(JsonValue::Object(self.0))
            .map_err(|e| AppError::unprocessable(format!("Invalid request body: {e}")))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
            return Ok(Self(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::String(v)))
                    .collect(),
            ));
        }
        match Json::<JsonValue>::from_request(req, state).await? {
            Json(JsonValue::Object(fields)) => Ok(Self(fields)),
            Json(_) => Err(AppError::unprocessable(BODY_NOT_OBJECT)),
        }
    }
}
