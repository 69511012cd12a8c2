use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// One message per offending field, as collected by a
    /// [`Validator`](crate::validation::Validator).
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(FieldErrors),
}
