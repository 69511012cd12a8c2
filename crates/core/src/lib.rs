//! Pure domain logic for the FairShare groups service.
//!
//! Nothing in this crate touches the database or HTTP; it holds the shared
//! id/timestamp types, the domain error enum, the field validator, and the
//! closed enumerations that guard query construction.

pub mod error;
pub mod group;
pub mod pagination;
pub mod types;
pub mod validation;
