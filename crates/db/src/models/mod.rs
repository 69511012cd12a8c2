//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for create, full replace, and partial update payloads
//! - The listing filter and its validated form

pub mod group;
