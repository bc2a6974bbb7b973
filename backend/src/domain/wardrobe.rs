//! Wardrobe item data model.
//!
//! The category set is a closed enumeration so the category-validation
//! invariant survives serialisation boundaries: an unknown category fails to
//! parse instead of landing in the catalogue as free text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::account::UserId;

/// Fixed set of wardrobe categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shirts, blouses, knitwear, and other upper-body garments.
    Tops,
    /// Trousers, jeans, shorts, and skirts.
    Bottoms,
    /// One-piece garments.
    Dresses,
    /// Swim and beachwear.
    Swimsuits,
    /// Footwear of any kind.
    Shoes,
    /// Jewellery, bags, belts, scarves, and similar.
    Accessories,
    /// Anything that fits no other category.
    Miscellaneous,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Tops,
        Self::Bottoms,
        Self::Dresses,
        Self::Swimsuits,
        Self::Shoes,
        Self::Accessories,
        Self::Miscellaneous,
    ];

    /// Canonical lowercase name used on the wire and in persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dresses",
            Self::Swimsuits => "swimsuits",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
            Self::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the seven categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Validation errors for wardrobe item value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardrobeValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// Description was missing or blank once trimmed.
    EmptyDescription,
    /// Description exceeded the maximum length.
    DescriptionTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Image reference was not an absolute URL.
    InvalidImageUrl,
}

impl fmt::Display for WardrobeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "item id must be a valid UUID"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::InvalidImageUrl => write!(f, "image reference must be an absolute URL"),
        }
    }
}

impl std::error::Error for WardrobeValidationError {}

/// Stable wardrobe item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Validate and construct an [`ItemId`] from string input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, WardrobeValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| WardrobeValidationError::InvalidId)
    }

    /// Generate a new random [`ItemId`].
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

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum allowed length for an item description.
pub const DESCRIPTION_MAX: usize = 500;

/// Free-text description of a wardrobe item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemDescription(String);

impl ItemDescription {
    /// Validate and construct an [`ItemDescription`].
    pub fn new(description: impl Into<String>) -> Result<Self, WardrobeValidationError> {
        Self::from_owned(description.into())
    }

    fn from_owned(description: String) -> Result<Self, WardrobeValidationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(WardrobeValidationError::EmptyDescription);
        }
        if trimmed.chars().count() > DESCRIPTION_MAX {
            return Err(WardrobeValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ItemDescription> for String {
    fn from(value: ItemDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemDescription {
    type Error = WardrobeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Reference to an uploaded image held in external object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(Url);

impl ImageUrl {
    /// Validate and construct an [`ImageUrl`] from string input.
    pub fn parse(url: impl AsRef<str>) -> Result<Self, WardrobeValidationError> {
        Url::parse(url.as_ref())
            .map(Self)
            .map_err(|_| WardrobeValidationError::InvalidImageUrl)
    }

    /// Borrow the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = WardrobeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// A single clothing entry owned by one user.
///
/// ## Invariants
/// - `owner` always references an existing user; persistence enforces this
///   with a foreign key and services check it before mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    /// Stable item identifier.
    pub id: ItemId,
    /// Owning user.
    pub owner: UserId,
    /// One of the seven fixed categories.
    pub category: Category,
    /// Free-text description.
    pub description: ItemDescription,
    /// Optional reference to an uploaded image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tops", Category::Tops)]
    #[case("bottoms", Category::Bottoms)]
    #[case("dresses", Category::Dresses)]
    #[case("swimsuits", Category::Swimsuits)]
    #[case("shoes", Category::Shoes)]
    #[case("accessories", Category::Accessories)]
    #[case("miscellaneous", Category::Miscellaneous)]
    fn category_parses_canonical_names(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(input.parse::<Category>().expect("known category"), expected);
    }

    #[rstest]
    #[case("hats")]
    #[case("Tops")]
    #[case("")]
    fn category_rejects_unknown_names(#[case] input: &str) {
        let err = input.parse::<Category>().expect_err("unknown category");
        assert_eq!(err, UnknownCategory(input.to_owned()));
    }

    #[test]
    fn category_round_trips_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).expect("serialises");
            assert_eq!(json, format!("\"{category}\""));
            let back: Category = serde_json::from_str(&json).expect("deserialises");
            assert_eq!(back, category);
        }
    }

    #[test]
    fn description_trims_and_validates() {
        let description = ItemDescription::new("  red wool jumper  ").expect("valid");
        assert_eq!(description.as_ref(), "red wool jumper");
        assert!(ItemDescription::new("   ").is_err());
        assert!(ItemDescription::new("x".repeat(DESCRIPTION_MAX + 1)).is_err());
    }

    #[rstest]
    #[case("https://cdn.example.com/items/1.jpg", true)]
    #[case("not a url", false)]
    #[case("/relative/path.png", false)]
    fn image_url_requires_absolute_url(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(ImageUrl::parse(input).is_ok(), ok);
    }
}
