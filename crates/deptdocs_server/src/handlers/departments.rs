//! Department CRUD.

use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    Extension, Json,
};
use deptdocs_core::types::{Department, DepartmentId};
use serde::Serialize;

use crate::error::AppError;
use crate::extract::Payload;
use crate::state::AppState;

pub const CREATE_FAILED: &str = "Failed to create department. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update department. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete department. Please try again.";

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub message: &'static str,
    pub department: Department,
}

#[derive(Debug, Serialize)]
pub struct DepartmentList {
    pub departments: Vec<Department>,
}

/// GET /departments
pub async fn index(
    Extension(state): Extension<AppState>,
) -> Result<Json<DepartmentList>, AppError> {
    let departments = state.departments.list().await?;
    Ok(Json(DepartmentList { departments }))
}

/// POST /departments
pub async fn store(
    Extension(state): Extension<AppState>,
    payload: Payload,
) -> Result<(StatusCode, Json<DepartmentResponse>), AppError> {
    let department = state
        .departments
        .create(&payload.department_input())
        .await
        .map_err(|e| AppError::mutation_failed(e, CREATE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        Json(DepartmentResponse {
            message: "Department created successfully.",
            department,
        }),
    ))
}

/// PUT /departments/:id
pub async fn update(
    Extension(state): Extension<AppState>,
    path: Result<Path<DepartmentId>, PathRejection>,
    payload: Result<Payload, AppError>,
) -> Result<Json<DepartmentResponse>, AppError> {
    let Path(id) = path?;
    let payload = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            // A missing department still answers 404 ahead of a bad body.
            state
                .departments
                .find(id)
                .await
                .map_err(|e| AppError::mutation_failed(e, UPDATE_FAILED))?;
            return Err(rejection);
        }
    };
    let department = state
        .departments
        .update(id, &payload.department_input())
        .await
        .map_err(|e| AppError::mutation_failed(e, UPDATE_FAILED))?;
    Ok(Json(DepartmentResponse {
        message: "Department updated successfully.",
        department,
    }))
}

/// DELETE /departments/:id
pub async fn destroy(
    Extension(state): Extension<AppState>,
    path: Result<Path<DepartmentId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state
        .departments
        .delete(id)
        .await
        .map_err(|e| AppError::mutation_failed(e, DELETE_FAILED))?;
    Ok(StatusCode::NO_CONTENT)
}
