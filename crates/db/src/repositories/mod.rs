//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement business
//! operations hold a single transaction and commit or roll back as a
//! unit.

pub mod address_repo;
pub mod blueprint_repo;
pub mod cart_repo;
pub mod catalog_repo;
pub mod config_repo;
pub mod file_repo;
pub mod message_repo;
pub mod order_repo;
pub mod payment_method_repo;
pub mod product_repo;
pub mod production_job_repo;
pub mod project_repo;
pub mod user_repo;

pub use address_repo::AddressRepo;
pub use blueprint_repo::BlueprintRepo;
pub use cart_repo::CartRepo;
pub use catalog_repo::CatalogRepo;
pub use config_repo::ConfigRepo;
pub use file_repo::FileRepo;
pub use message_repo::MessageRepo;
pub use order_repo::OrderRepo;
pub use payment_method_repo::PaymentMethodRepo;
pub use product_repo::ProductRepo;
pub use production_job_repo::ProductionJobRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
