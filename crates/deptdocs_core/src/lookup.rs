//! Department-scoped document lookup.
//!
//! A document belongs to a department when any of the department's current
//! employees appears by full name in the document's `employee_names`. The
//! name list is resolved first, then handed to a single "contains any of"
//! store query, so the cost is one employee read plus at most one document
//! read per call regardless of department size.

use std::sync::Arc;

use crate::error::DeptDocsError;
use crate::ports::{DocumentStore, DocumentTypeStore, EmployeeStore, Result};
use crate::principal::{Principal, NO_DEPARTMENT};
use crate::types::{Document, DocumentTypeId};

pub struct DocumentLookupService {
    employees: Arc<dyn EmployeeStore>,
    documents: Arc<dyn DocumentStore>,
    document_types: Arc<dyn DocumentTypeStore>,
}

impl DocumentLookupService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        documents: Arc<dyn DocumentStore>,
        document_types: Arc<dyn DocumentTypeStore>,
    ) -> Self {
        Self {
            employees,
            documents,
            document_types,
        }
    }

    /// Documents referencing any employee of the actor's department.
    ///
    /// Fails with `Forbidden` before touching any store when the actor has
    /// no department.
    pub async fn documents_for_actor(
        &self,
        principal: &Principal,
        document_type_id: Option<DocumentTypeId>,
    ) -> Result<Vec<Document>> {
        let department = principal.require_department()?;
        self.list_documents_for_department_and_type(department, document_type_id)
            .await
    }

    pub async fn list_documents_for_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<Document>> {
        self.list_documents_for_department_and_type(department_id, None)
            .await
    }

    /// As [`Self::list_documents_for_department`], AND-restricted to
    /// `document_type_id` when one is given.
    pub async fn list_documents_for_department_and_type(
        &self,
        department_id: &str,
        document_type_id: Option<DocumentTypeId>,
    ) -> Result<Vec<Document>> {
        if department_id.trim().is_empty() {
            return Err(DeptDocsError::Forbidden(NO_DEPARTMENT.into()));
        }

        let names = self.employee_names(department_id).await?;
        if names.is_empty() {
            // No employee can match, so no document can either.
            tracing::debug!(department = %department_id, "department has no employees");
            return Ok(Vec::new());
        }

        let documents = self
            .documents
            .find_by_any_employee_name(&names, document_type_id)
            .await?;

        tracing::debug!(
            department = %department_id,
            employees = names.len(),
            document_type_id = ?document_type_id,
            documents = documents.len(),
            "department documents resolved"
        );
        Ok(documents)
    }

    /// Full names of every current employee of the department.
    pub async fn employee_names(&self, department_id: &str) -> Result<Vec<String>> {
        let employees = self.employees.find_by_department(department_id).await?;
        Ok(employees.iter().map(|e| e.full_name()).collect())
    }

    /// Every document type label in storage order, duplicates kept.
    pub async fn list_document_type_names(&self) -> Result<Vec<String>> {
        let types = self.document_types.list_all().await?;
        Ok(types.into_iter().map(|t| t.document_type).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStores;
    use crate::types::DocumentId;

    fn service(stores: &MemoryStores) -> DocumentLookupService {
        DocumentLookupService::new(
            stores.employees.clone(),
            stores.documents.clone(),
            stores.document_types.clone(),
        )
    }

    /// Sales: Jane Doe, Jon Roe. Doc1 (type 2) names Jane, Doc2 (type 5)
    /// names Jon and Amy, Doc3 names only Amy.
    async fn sales_fixture() -> (MemoryStores, [DocumentId; 3]) {
        let stores = MemoryStores::new();
        stores.employees.insert("Sales", "Jane", "Doe").await;
        stores.employees.insert("Sales", "Jon", "Roe").await;
        stores.employees.insert("Legal", "Amy", "Lee").await;
        let d1 = stores.documents.insert("Doc1", Some(2), &["Jane Doe"]).await;
        let d2 = stores
            .documents
            .insert("Doc2", Some(5), &["Jon Roe", "Amy Lee"])
            .await;
        let d3 = stores.documents.insert("Doc3", None, &["Amy Lee"]).await;
        (stores, [d1.id, d2.id, d3.id])
    }

    fn ids(documents: &[Document]) -> Vec<DocumentId> {
        let mut ids: Vec<_> = documents.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn sales_documents_match_any_employee() {
        let (stores, [d1, d2, _]) = sales_fixture().await;
        let docs = service(&stores)
            .list_documents_for_department("Sales")
            .await
            .unwrap();
        assert_eq!(ids(&docs), vec![d1, d2]);
    }

    #[tokio::test]
    async fn type_filter_narrows_to_matching_type() {
        let (stores, [_, d2, _]) = sales_fixture().await;
        let docs = service(&stores)
            .list_documents_for_department_and_type("Sales", Some(5))
            .await
            .unwrap();
        assert_eq!(ids(&docs), vec![d2]);
    }

    #[tokio::test]
    async fn typed_result_is_subset_of_untyped() {
        let (stores, _) = sales_fixture().await;
        let svc = service(&stores);
        let all = ids(&svc.list_documents_for_department("Sales").await.unwrap());
        for t in [2, 5, 7] {
            let typed = svc
                .list_documents_for_department_and_type("Sales", Some(t))
                .await
                .unwrap();
            assert!(typed.iter().all(|d| d.document_type_id == Some(t)));
            assert!(ids(&typed).iter().all(|id| all.contains(id)));
        }
    }

    #[tokio::test]
    async fn absent_type_equals_untyped_lookup() {
        let (stores, _) = sales_fixture().await;
        let svc = service(&stores);
        let untyped = svc.list_documents_for_department("Sales").await.unwrap();
        let none = svc
            .list_documents_for_department_and_type("Sales", None)
            .await
            .unwrap();
        assert_eq!(ids(&untyped), ids(&none));
    }

    #[tokio::test]
    async fn department_without_employees_returns_empty() {
        let (stores, _) = sales_fixture().await;
        let docs = service(&stores)
            .list_documents_for_department("Empty")
            .await
            .unwrap();
        assert!(docs.is_empty());
        assert_eq!(stores.documents.calls(), 0);
    }

    #[tokio::test]
    async fn names_match_verbatim_only() {
        let stores = MemoryStores::new();
        stores.employees.insert("Ops", "amy", "lee").await;
        stores.documents.insert("Doc", None, &["Amy Lee"]).await;
        let docs = service(&stores)
            .list_documents_for_department("Ops")
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn actor_without_department_is_forbidden_without_io() {
        let (stores, _) = sales_fixture().await;
        let principal = Principal::new("guest", vec![], None);
        let err = service(&stores)
            .documents_for_actor(&principal, Some(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DeptDocsError::Forbidden(_)));
        assert_eq!(stores.employees.calls(), 0);
        assert_eq!(stores.documents.calls(), 0);
    }

    #[tokio::test]
    async fn actor_with_department_uses_it() {
        let (stores, [d1, d2, _]) = sales_fixture().await;
        let principal = Principal::new("jdoe", vec![], Some("Sales".into()));
        let docs = service(&stores)
            .documents_for_actor(&principal, None)
            .await
            .unwrap();
        assert_eq!(ids(&docs), vec![d1, d2]);
    }

    #[tokio::test]
    async fn blank_department_id_is_forbidden() {
        let stores = MemoryStores::new();
        let err = service(&stores)
            .list_documents_for_department("")
            .await
            .unwrap_err();
        assert!(matches!(err, DeptDocsError::Forbidden(_)));
        assert_eq!(stores.employees.calls(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_unavailable() {
        let (stores, _) = sales_fixture().await;
        stores.documents.set_unavailable(true);
        let err = service(&stores)
            .list_documents_for_department("Sales")
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn type_names_keep_storage_order_and_duplicates() {
        let stores = MemoryStores::new();
        for label in ["Travel Order", "Office Order", "Travel Order"] {
            stores.document_types.insert(label).await;
        }
        let names = service(&stores).list_document_type_names().await.unwrap();
        assert_eq!(names, vec!["Travel Order", "Office Order", "Travel Order"]);
    }
}
