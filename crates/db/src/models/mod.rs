//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//!
//! Status columns are TEXT in the database and decode into the closed
//! enums from `printforge_core::status` via `#[sqlx(try_from = "String")]`.

pub mod address;
pub mod blueprint;
pub mod cart;
pub mod catalog;
pub mod message;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod production_job;
pub mod project;
pub mod project_file;
pub mod user;
