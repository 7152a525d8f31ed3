//! HTTP handlers, grouped by resource.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod manufacturing;
pub mod order;
pub mod product;
pub mod project;
