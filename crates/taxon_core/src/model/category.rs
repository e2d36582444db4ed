//! Category domain model.
//!
//! # Responsibility
//! - Define the canonical category record and its identifier type.
//! - Provide validation used by every persistence write path.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another category.
//! - `name` is non-empty after trimming and bounded in length.
//! - Name uniqueness across categories is enforced by the repository/store,
//!   not by this model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Upper bound for category name length, counted in characters.
pub const CATEGORY_NAME_MAX_CHARS: usize = 255;

/// Stable identifier for a category record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CategoryId = Uuid;

/// Validation failure for category field contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Name exceeds [`CATEGORY_NAME_MAX_CHARS`].
    NameTooLong { max: usize, actual: usize },
    /// Identifier is the nil uuid.
    NilUuid,
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name must not be empty"),
            Self::NameTooLong { max, actual } => write!(
                f,
                "category name length {actual} exceeds maximum of {max} characters"
            ),
            Self::NilUuid => write!(f, "category uuid must not be nil"),
        }
    }
}

impl Error for CategoryValidationError {}

/// Canonical record for a named classification entity.
///
/// The store owns the persisted rows; this struct is the in-flight shape used
/// by repository and service APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable global ID used for lookups and cross-references.
    pub uuid: CategoryId,
    /// Unique display name. May change over the record lifetime.
    pub name: String,
}

impl Category {
    /// Creates a new category with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates a category with a caller-provided stable ID.
    ///
    /// Used by callers where identity already exists externally (imports,
    /// deterministic test fixtures). Rejects the nil uuid; name contracts are
    /// checked later by [`Category::validate`] on write paths.
    pub fn with_id(
        uuid: CategoryId,
        name: impl Into<String>,
    ) -> Result<Self, CategoryValidationError> {
        if uuid.is_nil() {
            return Err(CategoryValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            name: name.into(),
        })
    }

    /// Checks all field contracts for this record.
    ///
    /// # Invariants
    /// - Must be called by repositories before any SQL mutation.
    /// - Read paths use it to reject invalid persisted state instead of
    ///   masking it.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.uuid.is_nil() {
            return Err(CategoryValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        let chars = self.name.chars().count();
        if chars > CATEGORY_NAME_MAX_CHARS {
            return Err(CategoryValidationError::NameTooLong {
                max: CATEGORY_NAME_MAX_CHARS,
                actual: chars,
            });
        }
        Ok(())
    }
}
