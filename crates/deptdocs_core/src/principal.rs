use crate::error::DeptDocsError;

/// Message returned whenever a department-scoped operation is attempted by an
/// actor with no department.
pub const NO_DEPARTMENT: &str = "actor does not belong to a department";

/// Role required to add documents.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone)]
pub struct Principal {
    pub actor_id: String,
    pub roles: Vec<String>,
    department: Option<String>,
}

impl Principal {
    /// Construct from validated JWT claims at the server boundary.
    /// Core logic never reads raw tokens.
    pub fn from_jwt_claims(claims: &JwtClaims) -> Result<Self, DeptDocsError> {
        let actor_id = claims
            .sub
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DeptDocsError::Unauthorized("missing sub claim".into()))?;
        Ok(Self::new(
            actor_id,
            claims.roles.clone().unwrap_or_default(),
            claims.department.clone(),
        ))
    }

    /// Construct explicitly for in-process callers and tests.
    /// There is no implicit or thread-local identity anywhere in the codebase.
    pub fn new(
        actor_id: impl Into<String>,
        roles: Vec<String>,
        department: Option<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            roles,
            department: department.filter(|d| !d.trim().is_empty()),
        }
    }

    /// The actor's department, if any. Blank claims count as none.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn require_department(&self) -> Result<&str, DeptDocsError> {
        self.department()
            .ok_or_else(|| DeptDocsError::Forbidden(NO_DEPARTMENT.into()))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<(), DeptDocsError> {
        if self.has_role(role) {
            return Ok(());
        }
        Err(DeptDocsError::Forbidden(format!("{role} role required")))
    }
}

/// JWT claims shape expected from the identity provider.
/// Deserialised by the server JWT middleware.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct JwtClaims {
    pub sub: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
}
