//! Shared application state.

use std::sync::Arc;

use deptdocs_core::memory::MemoryStores;
use deptdocs_core::ports::{
    ActivityStore, DepartmentStore, DocumentStore, DocumentTypeStore, EmployeeStore,
};
use deptdocs_core::{
    ActivityDispatcher, DepartmentService, DocumentIntakeService, DocumentLookupService,
};
use deptdocs_postgres::PgStores;

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<DocumentLookupService>,
    pub intake: Arc<DocumentIntakeService>,
    pub departments: Arc<DepartmentService>,
    pub activity: Arc<ActivityDispatcher>,
    pub activities: Arc<dyn ActivityStore>,
}

impl AppState {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        documents: Arc<dyn DocumentStore>,
        document_types: Arc<dyn DocumentTypeStore>,
        departments: Arc<dyn DepartmentStore>,
        activities: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            lookup: Arc::new(DocumentLookupService::new(
                employees,
                Arc::clone(&documents),
                Arc::clone(&document_types),
            )),
            intake: Arc::new(DocumentIntakeService::new(documents, document_types)),
            departments: Arc::new(DepartmentService::new(departments)),
            activity: Arc::new(ActivityDispatcher::with_default_listeners(Arc::clone(
                &activities,
            ))),
            activities,
        }
    }

    pub fn from_pg(stores: PgStores) -> Self {
        Self::new(
            Arc::new(stores.employees),
            Arc::new(stores.documents),
            Arc::new(stores.document_types),
            Arc::new(stores.departments),
            Arc::new(stores.activities),
        )
    }

    pub fn in_memory(stores: &MemoryStores) -> Self {
        Self::new(
            stores.employees.clone(),
            stores.documents.clone(),
            stores.document_types.clone(),
            stores.departments.clone(),
            stores.activities.clone(),
        )
    }
}
