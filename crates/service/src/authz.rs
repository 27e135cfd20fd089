//! Role and ownership checks applied before owner-scoped mutations.
//!
//! Callers load the resource first and report a missing row as not-found;
//! only an existing row is compared against the caller.

use crate::auth::domain::Caller;
use crate::errors::ServiceError;

pub fn ensure_owner(owner_id: i32, caller: &Caller, resource: &str) -> Result<(), ServiceError> {
    if owner_id != caller.id {
        tracing::warn!(caller_id = caller.id, owner_id, resource, "ownership check failed");
        return Err(ServiceError::Authorization(format!("caller does not own this {resource}")));
    }
    Ok(())
}

pub fn require_role(caller: &Caller, role: &str) -> Result<(), ServiceError> {
    if caller.role != role {
        tracing::warn!(caller_id = caller.id, role = %caller.role, required = role, "role check failed");
        return Err(ServiceError::Authorization("Not Authorized".into()));
    }
    Ok(())
}

/// Path ids are positive integers.
pub fn validate_id(id: i32, what: &str) -> Result<i32, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!("{what} must be greater than 0")));
    }
    Ok(id)
}
