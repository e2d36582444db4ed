//! Core domain logic for Taxon, a small category catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    Category, CategoryId, CategoryValidationError, CATEGORY_NAME_MAX_CHARS,
};
pub use repo::category_repo::{
    CategoryRepository, RepoError, RepoResult, SqliteCategoryRepository,
};
pub use service::category_service::{CategoryService, CategoryServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
