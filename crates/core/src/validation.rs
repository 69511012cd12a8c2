//! Field-level validation accumulator.
//!
//! A [`Validator`] collects independent boolean checks and remembers one
//! message per field. Recording a second failure for the same field replaces
//! the first message, so the last failing check wins.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Field name to failure message. Ordered so rendered responses are stable.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no field has a recorded failure.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `field`, replacing any earlier message.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Record `message` under `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Whether `value` equals any member of `set`.
    pub fn is_in<T: PartialEq>(value: T, set: &[T]) -> bool {
        set.contains(&value)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, turning any recorded failures into
    /// [`CoreError::InvalidFields`].
    pub fn finish(self) -> Result<(), CoreError> {
        if self.valid() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self.errors))
        }
    }
}
