//! Login/logout notifications and the caller's activity trail.

use axum::{Extension, Json};
use deptdocs_core::activity::{ActivityEvent, ActivityKind, UserActivity};
use deptdocs_core::principal::Principal;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActivityReceipt {
    pub actor_id: String,
    pub activity: ActivityKind,
    pub listeners: usize,
}

async fn announce(
    state: &AppState,
    principal: &Principal,
    kind: ActivityKind,
) -> Result<Json<ActivityReceipt>, AppError> {
    let event = ActivityEvent::now(&principal.actor_id, kind);
    let listeners = state.activity.dispatch(&event).await?;
    Ok(Json(ActivityReceipt {
        actor_id: event.actor_id,
        activity: kind,
        listeners,
    }))
}

/// POST /session/login
pub async fn login(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ActivityReceipt>, AppError> {
    announce(&state, &principal, ActivityKind::Login).await
}

/// POST /session/logout
pub async fn logout(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ActivityReceipt>, AppError> {
    announce(&state, &principal, ActivityKind::Logout).await
}

/// GET /session/activity, newest first.
pub async fn activity(
    Extension(state): Extension<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<UserActivity>>, AppError> {
    Ok(Json(state.activities.list_for_actor(&principal.actor_id).await?))
}
