//! Outfit data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::UserId;
use super::wardrobe::ItemId;

/// Validation errors for outfit value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutfitValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded the maximum length.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// An outfit must reference at least one wardrobe item.
    NoItems,
}

impl fmt::Display for OutfitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "outfit id must be a valid UUID"),
            Self::EmptyName => write!(f, "outfit name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "outfit name must be at most {max} characters")
            }
            Self::NoItems => write!(f, "an outfit must reference at least one item"),
        }
    }
}

impl std::error::Error for OutfitValidationError {}

/// Stable outfit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(Uuid);

impl OutfitId {
    /// Validate and construct an [`OutfitId`] from string input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, OutfitValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| OutfitValidationError::InvalidId)
    }

    /// Generate a new random [`OutfitId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum allowed length for an outfit name.
pub const OUTFIT_NAME_MAX: usize = 80;

/// Human-readable label for an outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutfitName(String);

impl OutfitName {
    /// Validate and construct an [`OutfitName`].
    pub fn new(name: impl Into<String>) -> Result<Self, OutfitValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, OutfitValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(OutfitValidationError::EmptyName);
        }
        if trimmed.chars().count() > OUTFIT_NAME_MAX {
            return Err(OutfitValidationError::NameTooLong {
                max: OUTFIT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for OutfitName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OutfitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<OutfitName> for String {
    fn from(value: OutfitName) -> Self {
        value.0
    }
}

impl TryFrom<String> for OutfitName {
    type Error = OutfitValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A named, ordered grouping of wardrobe items belonging to one user.
///
/// ## Invariants
/// - `items` is non-empty and its order is significant.
/// - Every referenced item belongs to `owner`; the composing service checks
///   this before an outfit reaches a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    /// Stable outfit identifier.
    pub id: OutfitId,
    /// Owning user.
    pub owner: UserId,
    /// Display label.
    pub name: OutfitName,
    /// Ordered wardrobe item references.
    pub items: Vec<ItemId>,
    /// Optional AI-generated rationale text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Outfit {
    /// Assemble an outfit, rejecting empty item lists.
    pub fn new(
        id: OutfitId,
        owner: UserId,
        name: OutfitName,
        items: Vec<ItemId>,
        rationale: Option<String>,
    ) -> Result<Self, OutfitValidationError> {
        if items.is_empty() {
            return Err(OutfitValidationError::NoItems);
        }
        Ok(Self {
            id,
            owner,
            name,
            items,
            rationale,
        })
    }
}
