//! Role gates and the soft-failure reporting shared by every service.

use estore_core::{Actor, RoleKind, Session};
use tracing::{error, warn};

use crate::error::{ServiceError, ServiceResult};

/// The bound actor, or `NotLoggedIn`.
pub(crate) fn require_login(session: &Session) -> ServiceResult<&Actor> {
    session.current_actor().ok_or(ServiceError::NotLoggedIn)
}

/// The bound actor if the session's predicate for `role` holds, else
/// `Unauthorized`.
pub(crate) fn require_role(session: &Session, role: RoleKind) -> ServiceResult<&Actor> {
    let allowed = match role {
        RoleKind::Cashier => session.is_cashier(),
        RoleKind::Manager => session.is_manager(),
        RoleKind::Administrator => session.is_administrator(),
    };
    match session.current_actor() {
        Some(actor) if allowed => Ok(actor),
        _ => Err(ServiceError::Unauthorized {
            required: role,
            actual: session.role(),
        }),
    }
}

/// Turns a helper result into the `bool` the public surface reports,
/// logging the reason for a rejection.
pub(crate) fn report<T>(operation: &str, result: ServiceResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(ServiceError::Persistence(e)) => {
            error!(operation, error = %e, "Operation failed to persist");
            false
        }
        Err(e) => {
            warn!(operation, reason = %e, "Operation rejected");
            false
        }
    }
}
