//! Pure domain logic for the print-commerce platform.
//!
//! No I/O lives here: status state machines, the pricing engine, upload
//! content classification, BOM parsing, money conversion, and quota rules
//! are all plain functions over plain data so they can be tested without
//! a database or filesystem.

pub mod bom;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quota;
pub mod status;
pub mod types;
pub mod upload;
