//! deptdocs_postgres: sqlx adapters for every `deptdocs_core` port.

pub mod sqlx_types;
pub mod store;

use anyhow::Context;
use sqlx::PgPool;

pub use store::{
    PgActivityStore, PgDepartmentStore, PgDocumentStore, PgDocumentTypeStore, PgEmployeeStore,
};

/// All Postgres stores sharing one pool.
pub struct PgStores {
    pub employees: PgEmployeeStore,
    pub documents: PgDocumentStore,
    pub document_types: PgDocumentTypeStore,
    pub departments: PgDepartmentStore,
    pub activities: PgActivityStore,
}

impl PgStores {
    pub fn new(pool: PgPool) -> Self {
        Self {
            employees: PgEmployeeStore::new(pool.clone()),
            documents: PgDocumentStore::new(pool.clone()),
            document_types: PgDocumentTypeStore::new(pool.clone()),
            departments: PgDepartmentStore::new(pool.clone()),
            activities: PgActivityStore::new(pool),
        }
    }
}

/// Apply the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to apply deptdocs migrations")?;
    tracing::info!("deptdocs migrations applied");
    Ok(())
}
