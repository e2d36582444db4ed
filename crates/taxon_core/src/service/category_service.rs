//! Category use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/rename/delete entry points for core callers.
//! - Map repository-level absence (`Option::None`) to semantic not-found
//!   errors keyed the way the caller asked (by id or by name).
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Mutating calls re-read the affected row, so callers always receive the
//!   persisted state.
//! - The service holds no state of its own between calls.

use crate::model::category::{Category, CategoryId};
use crate::repo::category_repo::{CategoryRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for category use-cases.
#[derive(Debug)]
pub enum CategoryServiceError {
    /// No category exists with the requested id.
    NotFound(CategoryId),
    /// No category exists with the requested name.
    NameNotFound(String),
    /// The requested name is already held by another category.
    DuplicateName(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "category not found: {id}"),
            Self::NameNotFound(name) => write!(f, "category not found: `{name}`"),
            Self::DuplicateName(name) => {
                write!(f, "category name already in use: `{name}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent category state: {details}")
            }
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateName(name) => Self::DuplicateName(name),
            other => Self::Repo(other),
        }
    }
}

/// Category service facade over repository implementations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one category with a generated stable id.
    ///
    /// Fails with [`CategoryServiceError::DuplicateName`] when the name is
    /// already held by an existing category.
    pub fn create_category(
        &self,
        name: impl Into<String>,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::new(name);
        let id = self.repo.create_category(&category)?;
        self.repo
            .get_category(id)?
            .ok_or(CategoryServiceError::InconsistentState(
                "created category not found in read-back",
            ))
    }

    /// Gets one category by stable id.
    pub fn get_category(&self, id: CategoryId) -> Result<Category, CategoryServiceError> {
        self.repo
            .get_category(id)?
            .ok_or(CategoryServiceError::NotFound(id))
    }

    /// Gets one category by its unique name.
    pub fn get_category_by_name(&self, name: &str) -> Result<Category, CategoryServiceError> {
        self.repo
            .get_category_by_name(name)?
            .ok_or_else(|| CategoryServiceError::NameNotFound(name.to_string()))
    }

    /// Lists all categories ordered by name.
    ///
    /// An empty store is a valid empty list, not an error.
    pub fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.repo.list_categories()?)
    }

    /// Renames an existing category, keeping its id immutable.
    ///
    /// Renaming to the category's own current name succeeds. Fails with
    /// [`CategoryServiceError::NotFound`] when the id is absent, and with
    /// [`CategoryServiceError::DuplicateName`] when the new name is held by a
    /// different category.
    pub fn rename_category(
        &self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::with_id(id, name).map_err(RepoError::from)?;
        self.repo.update_category(&category)?;
        self.repo
            .get_category(id)?
            .ok_or(CategoryServiceError::InconsistentState(
                "renamed category not found in read-back",
            ))
    }

    /// Deletes one category by stable id.
    pub fn delete_category(&self, id: CategoryId) -> Result<(), CategoryServiceError> {
        Ok(self.repo.delete_category(id)?)
    }
}
