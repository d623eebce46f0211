//! Login / logout activity events and their listeners.
//!
//! The dispatcher holds an explicit listen map (activity kind -> ordered
//! listeners). [`ActivityDispatcher::with_default_listeners`] registers
//! [`LogUserActivity`] for both login and logout.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::{ActivityStore, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Login,
    Logout,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "login" => Some(Self::Login),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub actor_id: String,
    pub kind: ActivityKind,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn now(actor_id: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            actor_id: actor_id.into(),
            kind,
            occurred_at: Utc::now(),
        }
    }
}

/// A persisted activity row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub actor_id: String,
    pub activity: ActivityKind,
    pub occurred_at: DateTime<Utc>,
}

impl UserActivity {
    pub fn now(actor_id: impl Into<String>, activity: ActivityKind) -> Self {
        Self {
            actor_id: actor_id.into(),
            activity,
            occurred_at: Utc::now(),
        }
    }
}

impl From<&ActivityEvent> for UserActivity {
    fn from(event: &ActivityEvent) -> Self {
        Self {
            actor_id: event.actor_id.clone(),
            activity: event.kind,
            occurred_at: event.occurred_at,
        }
    }
}

#[async_trait]
pub trait ActivityListener: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, event: &ActivityEvent) -> Result<()>;
}

/// Writes every event it sees to the activity store.
pub struct LogUserActivity {
    store: Arc<dyn ActivityStore>,
}

impl LogUserActivity {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActivityListener for LogUserActivity {
    fn name(&self) -> &'static str {
        "log_user_activity"
    }

    async fn handle(&self, event: &ActivityEvent) -> Result<()> {
        self.store.record(&UserActivity::from(event)).await?;
        tracing::info!(
            actor = %event.actor_id,
            activity = event.kind.as_str(),
            "user activity recorded"
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct ActivityDispatcher {
    listen: HashMap<ActivityKind, Vec<Arc<dyn ActivityListener>>>,
}

impl ActivityDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Login and Logout both go to [`LogUserActivity`].
    pub fn with_default_listeners(store: Arc<dyn ActivityStore>) -> Self {
        let log: Arc<dyn ActivityListener> = Arc::new(LogUserActivity::new(store));
        Self::new()
            .listen(ActivityKind::Login, Arc::clone(&log))
            .listen(ActivityKind::Logout, log)
    }

    /// Register a listener (builder pattern). Listeners run in registration order.
    pub fn listen(mut self, kind: ActivityKind, listener: Arc<dyn ActivityListener>) -> Self {
        self.listen.entry(kind).or_default().push(listener);
        self
    }

    pub fn listener_count(&self, kind: ActivityKind) -> usize {
        self.listen.get(&kind).map_or(0, Vec::len)
    }

    /// Run every listener registered for the event's kind.
    /// Returns how many listeners ran; the first failure aborts the rest.
    pub async fn dispatch(&self, event: &ActivityEvent) -> Result<usize> {
        let Some(listeners) = self.listen.get(&event.kind) else {
            tracing::debug!(activity = event.kind.as_str(), "no listeners registered");
            return Ok(0);
        };
        for listener in listeners {
            if let Err(e) = listener.handle(event).await {
                tracing::warn!(
                    listener = listener.name(),
                    activity = event.kind.as_str(),
                    error = %e,
                    "activity listener failed"
                );
                return Err(e);
            }
        }
        Ok(listeners.len())
    }
}
