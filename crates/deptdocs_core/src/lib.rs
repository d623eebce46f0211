//! deptdocs_core: department-scoped document lookup, document intake,
//! department CRUD and user activity events.
//!
//! Pure domain logic over port traits. Store adapters live in
//! `deptdocs_postgres`; the HTTP surface lives in `deptdocs_server`.

pub mod activity;
pub mod departments;
pub mod error;
pub mod intake;
pub mod lookup;
pub mod memory;
pub mod ports;
pub mod principal;
pub mod types;

pub use activity::{ActivityDispatcher, ActivityEvent, ActivityKind, UserActivity};
pub use departments::DepartmentService;
pub use error::DeptDocsError;
pub use intake::DocumentIntakeService;
pub use lookup::DocumentLookupService;
pub use principal::Principal;
