use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeptDocsError {
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

impl DeptDocsError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::ValidationFailed(_) => 422,
            Self::NotFound(_) => 404,
            Self::Unauthorized(_) => 401,
            Self::Unavailable(_) => 503,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_forbidden() {
        assert_eq!(DeptDocsError::Forbidden("x".into()).http_status(), 403);
    }

    #[test]
    fn http_status_validation_failed() {
        assert_eq!(
            DeptDocsError::ValidationFailed("x".into()).http_status(),
            422
        );
    }

    #[test]
    fn http_status_not_found() {
        assert_eq!(DeptDocsError::NotFound("x".into()).http_status(), 404);
    }

    #[test]
    fn http_status_unauthorized() {
        assert_eq!(DeptDocsError::Unauthorized("x".into()).http_status(), 401);
    }

    #[test]
    fn http_status_unavailable() {
        let err = DeptDocsError::Unavailable(anyhow::anyhow!("connection refused"));
        assert_eq!(err.http_status(), 503);
        assert!(err.is_unavailable());
    }

    #[test]
    fn forbidden_displays_bare_message() {
        let e = DeptDocsError::Forbidden("actor does not belong to a department".into());
        assert_eq!(e.to_string(), "actor does not belong to a department");
    }

    #[test]
    fn validation_is_distinct_from_unavailable() {
        let e = DeptDocsError::ValidationFailed("The department field is required.".into());
        assert!(!e.is_unavailable());
        assert_eq!(e.to_string(), "The department field is required.");
    }

    #[test]
    fn display_unavailable() {
        let e = DeptDocsError::Unavailable(anyhow::anyhow!("timeout"));
        assert_eq!(e.to_string(), "store unavailable: timeout");
    }
}
