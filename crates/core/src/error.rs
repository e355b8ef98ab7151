use crate::types::DbId;

/// Domain error taxonomy shared by the workflow engines and the HTTP layer.
///
/// Every workflow operation returns one of these on failure; none are
/// retried internally. `TransientStore` is the only variant a caller may
/// safely retry wholesale.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Operation not legal in the entity's current state. The message
    /// always names the current state for diagnosability.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store timeout or connection loss. Safe to retry the whole
    /// operation from the caller.
    #[error("Transient store failure: {0}")]
    TransientStore(String),

    /// Document renderer failed; magazine state was left unchanged.
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build the standard `InvalidState` error for an operation that is
    /// not legal in the entity's current status.
    pub fn invalid_state(operation: &str, current: &str) -> Self {
        CoreError::InvalidState(format!(
            "Cannot {operation} while in status '{current}'"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_message_names_current_status() {
        let err = CoreError::invalid_state("submit content", "under_review");
        assert!(err.to_string().contains("under_review"));
        assert!(err.to_string().contains("submit content"));
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Content",
            id: 42,
        };
        assert_eq!(err.to_string(), "Entity not found: Content with id 42");
    }
}
