//! In-memory implementations of every port.
//!
//! Used by unit tests, the server's router tests and local runs without a
//! database. Each store counts the calls made to it and can be switched into
//! an unavailable mode where every call fails with
//! [`DeptDocsError::Unavailable`].

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::activity::UserActivity;
use crate::error::DeptDocsError;
use crate::ports::{
    ActivityStore, DepartmentStore, DocumentStore, DocumentTypeStore, EmployeeStore, Result,
};
use crate::types::*;

#[derive(Debug, Default)]
struct CallCounter {
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl CallCounter {
    fn enter(&self, store: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DeptDocsError::Unavailable(anyhow::anyhow!(
                "{store} store is unavailable"
            )));
        }
        Ok(())
    }
}

macro_rules! counter_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Number of port calls made so far.
            pub fn calls(&self) -> usize {
                self.counter.calls.load(Ordering::SeqCst)
            }

            pub fn set_unavailable(&self, unavailable: bool) {
                self.counter.unavailable.store(unavailable, Ordering::SeqCst);
            }
        }
    };
}

// ── Employees ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    rows: RwLock<Vec<Employee>>,
    next_id: AtomicI64,
    counter: CallCounter,
}

counter_accessors!(MemoryEmployeeStore);

impl MemoryEmployeeStore {
    pub async fn insert(&self, department: &str, first_name: &str, last_name: &str) -> Employee {
        let employee = Employee {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            department: department.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.rows.write().await.push(employee.clone());
        employee
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_department(&self, department_id: &str) -> Result<Vec<Employee>> {
        self.counter.enter("employee")?;
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|e| e.department == department_id)
            .cloned()
            .collect())
    }
}

// ── Documents ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    rows: RwLock<Vec<Document>>,
    next_id: AtomicI64,
    counter: CallCounter,
}

counter_accessors!(MemoryDocumentStore);

impl MemoryDocumentStore {
    /// Seed a row without going through the port (no call is counted).
    pub async fn insert(
        &self,
        title: &str,
        document_type_id: Option<DocumentTypeId>,
        employee_names: &[&str],
    ) -> Document {
        self.push(&NewDocument {
            title: Some(title.to_string()),
            document_type_id,
            employee_names: employee_names.iter().map(|s| s.to_string()).collect(),
            metadata: serde_json::json!({}),
        })
        .await
    }

    async fn push(&self, new: &NewDocument) -> Document {
        let now = Utc::now();
        let document = Document {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: new.title.clone(),
            document_type_id: new.document_type_id,
            employee_names: new.employee_names.clone(),
            metadata: new.metadata.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.rows.write().await.push(document.clone());
        document
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_any_employee_name(
        &self,
        names: &[String],
        document_type_id: Option<DocumentTypeId>,
    ) -> Result<Vec<Document>> {
        self.counter.enter("document")?;
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|d| d.mentions_any(names))
            .filter(|d| document_type_id.map_or(true, |t| d.document_type_id == Some(t)))
            .cloned()
            .collect())
    }

    async fn create(&self, document: &NewDocument) -> Result<Document> {
        self.counter.enter("document")?;
        Ok(self.push(document).await)
    }
}

// ── Document types ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryDocumentTypeStore {
    rows: RwLock<Vec<DocumentType>>,
    next_id: AtomicI64,
    counter: CallCounter,
}

counter_accessors!(MemoryDocumentTypeStore);

impl MemoryDocumentTypeStore {
    pub async fn insert(&self, label: &str) -> DocumentType {
        let document_type = DocumentType {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            document_type: label.to_string(),
        };
        self.rows.write().await.push(document_type.clone());
        document_type
    }
}

#[async_trait]
impl DocumentTypeStore for MemoryDocumentTypeStore {
    async fn list_all(&self) -> Result<Vec<DocumentType>> {
        self.counter.enter("document type")?;
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: DocumentTypeId) -> Result<Option<DocumentType>> {
        self.counter.enter("document type")?;
        Ok(self.rows.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<DocumentType>> {
        self.counter.enter("document type")?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|t| t.document_type.eq_ignore_ascii_case(label))
            .cloned())
    }
}

// ── Departments ───────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryDepartmentStore {
    rows: RwLock<Vec<Department>>,
    next_id: AtomicI64,
    counter: CallCounter,
}

counter_accessors!(MemoryDepartmentStore);

#[async_trait]
impl DepartmentStore for MemoryDepartmentStore {
    async fn create(&self, name: &str) -> Result<Department> {
        self.counter.enter("department")?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|d| d.department == name) {
            return Err(DeptDocsError::ValidationFailed(
                crate::departments::NAME_TAKEN.into(),
            ));
        }
        let now = Utc::now();
        let department = Department {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            department: name.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        rows.push(department.clone());
        Ok(department)
    }

    async fn list(&self) -> Result<Vec<Department>> {
        self.counter.enter("department")?;
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: DepartmentId) -> Result<Option<Department>> {
        self.counter.enter("department")?;
        Ok(self.rows.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn update(&self, id: DepartmentId, name: &str) -> Result<Option<Department>> {
        self.counter.enter("department")?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|d| d.department == name && d.id != id) {
            return Err(DeptDocsError::ValidationFailed(
                crate::departments::NAME_TAKEN.into(),
            ));
        }
        Ok(rows.iter_mut().find(|d| d.id == id).map(|d| {
            d.department = name.to_string();
            d.updated_at = Some(Utc::now());
            d.clone()
        }))
    }

    async fn delete(&self, id: DepartmentId) -> Result<bool> {
        self.counter.enter("department")?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() != before)
    }

    async fn name_taken(&self, name: &str, except: Option<DepartmentId>) -> Result<bool> {
        self.counter.enter("department")?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .any(|d| d.department == name && Some(d.id) != except))
    }
}

// ── Activity ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    rows: RwLock<Vec<UserActivity>>,
    counter: CallCounter,
}

counter_accessors!(MemoryActivityStore);

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn record(&self, activity: &UserActivity) -> Result<()> {
        self.counter.enter("activity")?;
        self.rows.write().await.push(activity.clone());
        Ok(())
    }

    async fn list_for_actor(&self, actor_id: &str) -> Result<Vec<UserActivity>> {
        self.counter.enter("activity")?;
        let mut rows: Vec<UserActivity> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|a| a.actor_id == actor_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}

/// All in-memory stores, mirroring `deptdocs_postgres::PgStores`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    pub employees: Arc<MemoryEmployeeStore>,
    pub documents: Arc<MemoryDocumentStore>,
    pub document_types: Arc<MemoryDocumentTypeStore>,
    pub departments: Arc<MemoryDepartmentStore>,
    pub activities: Arc<MemoryActivityStore>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn document_filter_applies_type_after_names() {
        let store = MemoryDocumentStore::default();
        store.insert("a", Some(1), &["Jane Doe"]).await;
        store.insert("b", Some(2), &["Jane Doe"]).await;
        store.insert("c", Some(1), &["Amy Lee"]).await;

        let names = vec!["Jane Doe".to_string()];
        let all = store.find_by_any_employee_name(&names, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let typed = store
            .find_by_any_employee_name(&names, Some(1))
            .await
            .unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].title.as_deref(), Some("a"));
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn created_documents_are_found_by_name() {
        let store = MemoryDocumentStore::default();
        let created = store
            .create(&NewDocument {
                title: Some("Travel to Tacloban".into()),
                document_type_id: Some(3),
                employee_names: vec!["Jane Doe".into()],
                metadata: serde_json::json!({ "venue": "Tacloban" }),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let found = store
            .find_by_any_employee_name(&["Jane Doe".to_string()], Some(3))
            .await
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    async fn document_type_label_lookup_ignores_case_and_takes_first() {
        let store = MemoryDocumentTypeStore::default();
        let first = store.insert("Travel Order").await;
        store.insert("TRAVEL ORDER").await;
        let found = store.find_by_label("travel order").await.unwrap();
        assert_eq!(found, Some(first));
        assert!(store.find_by_label("Memo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_mode_fails_every_call() {
        let store = MemoryDocumentTypeStore::default();
        store.insert("Travel Order").await;
        store.set_unavailable(true);
        let err = store.list_all().await.unwrap_err();
        assert!(err.is_unavailable());
        store.set_unavailable(false);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn department_update_excludes_itself_from_uniqueness() {
        let store = MemoryDepartmentStore::default();
        let sales = store.create("Sales").await.unwrap();
        store.create("Legal").await.unwrap();

        let same = store.update(sales.id, "Sales").await.unwrap();
        assert_eq!(same.map(|d| d.department), Some("Sales".to_string()));

        let err = store.update(sales.id, "Legal").await.unwrap_err();
        assert!(matches!(err, DeptDocsError::ValidationFailed(_)));

        assert!(store.update(99, "Ops").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn activity_lists_newest_first() {
        use crate::activity::ActivityKind;

        let store = MemoryActivityStore::default();
        for kind in [ActivityKind::Login, ActivityKind::Logout] {
            store
                .record(&UserActivity::now("jdoe", kind))
                .await
                .unwrap();
        }
        store
            .record(&UserActivity::now("other", ActivityKind::Login))
            .await
            .unwrap();

        let rows = store.list_for_actor("jdoe").await.unwrap();
        let kinds: Vec<_> = rows.iter().map(|a| a.activity).collect();
        assert_eq!(kinds, vec![ActivityKind::Logout, ActivityKind::Login]);
    }
}
