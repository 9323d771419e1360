//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept a checked-out `&mut PgConnection` as the first argument. Checking
//! the connection out and returning it is the caller's job (see
//! [`crate::store::PgStore`]).
//!
//! Updates and deletes report the number of affected rows; zero means the
//! identity did not exist.

pub mod client_repo;
pub mod product_repo;
pub mod purchase_repo;
pub mod sale_repo;
pub mod supplier_repo;

pub use client_repo::ClientRepo;
pub use product_repo::ProductRepo;
pub use purchase_repo::PurchaseRepo;
pub use sale_repo::SaleRepo;
pub use supplier_repo::SupplierRepo;
