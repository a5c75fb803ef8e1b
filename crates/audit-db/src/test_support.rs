//! Shared test utilities for audit-db unit tests.

use crate::service::AuditService;

/// Create an in-memory `AuditService`.
pub async fn test_service() -> AuditService {
    AuditService::new_local(":memory:").await.unwrap()
}
