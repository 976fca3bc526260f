//! # Item, Bundle, and Listing — The Physical-Goods Data Model
//!
//! An [`Item`] identifies one physical bottle instance: brand, size, how much
//! liquid remains, condition, packaging, and storage provenance. Items are
//! what gets valued; [`Bundle`]s of item references are what gets traded;
//! [`Listing`]s are how items appear in the marketplace pool.
//!
//! ## Invariants
//!
//! - `fill_percentage` and `size_ml` are always jointly used to derive
//!   remaining volume ([`Item::remaining_ml`]); neither is meaningful alone.
//! - A `Bundle` is never empty and never references the same item twice.
//!   Both are rejected at construction, so a persisted proposal cannot
//!   contain a degenerate bundle.
//! - Items are exclusively owned by their listing. A bundle holds `ItemId`
//!   references, never item copies, so description edits made before a swap
//!   locks remain visible to fairness recomputation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::{ItemId, ListingId, UserId};
use crate::temporal::Timestamp;

// ─── Condition ───────────────────────────────────────────────────────

/// The physical condition of a bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    /// Unused, as sold.
    New,
    /// Minimal signs of handling.
    LikeNew,
    /// Normal wear from regular use.
    Good,
    /// Visible wear, damaged label, or worn atomizer.
    Fair,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::New => "NEW",
            Self::LikeNew => "LIKE_NEW",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
        };
        f.write_str(s)
    }
}

// ─── Storage History ─────────────────────────────────────────────────

/// How the bottle has been stored since purchase.
///
/// Heat and light degrade fragrance concentrate; storage provenance is a
/// valuation input, not cosmetic metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageHistory {
    /// Kept in a cool, dark place.
    CoolDark,
    /// Displayed on an open shelf.
    Shelf,
    /// Carried, travelled with, or otherwise heavily handled.
    HeavyUse,
}

impl std::fmt::Display for StorageHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CoolDark => "COOL_DARK",
            Self::Shelf => "SHELF",
            Self::HeavyUse => "HEAVY_USE",
        };
        f.write_str(s)
    }
}

// ─── Item ────────────────────────────────────────────────────────────

/// One physical bottle instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Brand name as entered by the owner (e.g., "Chanel").
    pub brand_name: String,
    /// Bottle size in millilitres. Always positive.
    pub size_ml: u32,
    /// Remaining fill, 0–100. Zero is valid (an empty collectible bottle).
    pub fill_percentage: u8,
    /// Physical condition.
    pub condition: Condition,
    /// Whether the original box is included.
    pub has_box: bool,
    /// Whether the original cap is included.
    pub has_original_cap: bool,
    /// Storage provenance.
    pub storage_history: StorageHistory,
}

impl Item {
    /// Create a validated item with a fresh identifier.
    ///
    /// Packaging defaults to none and storage to `CoolDark`; use the
    /// `with_*` builders to describe the rest.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero-size bottle or a fill
    /// percentage above 100.
    pub fn new(
        brand_name: impl Into<String>,
        size_ml: u32,
        fill_percentage: u8,
        condition: Condition,
    ) -> Result<Self, CoreError> {
        let item = Self {
            id: ItemId::new(),
            brand_name: brand_name.into(),
            size_ml,
            fill_percentage,
            condition,
            has_box: false,
            has_original_cap: false,
            storage_history: StorageHistory::CoolDark,
        };
        item.validate()?;
        Ok(item)
    }

    /// Set whether the original box is included.
    pub fn with_box(mut self, has_box: bool) -> Self {
        self.has_box = has_box;
        self
    }

    /// Set whether the original cap is included.
    pub fn with_original_cap(mut self, has_original_cap: bool) -> Self {
        self.has_original_cap = has_original_cap;
        self
    }

    /// Set the storage provenance.
    pub fn with_storage(mut self, storage_history: StorageHistory) -> Self {
        self.storage_history = storage_history;
        self
    }

    /// Check the structural invariants.
    ///
    /// Items can arrive through deserialization as well as [`Item::new`];
    /// surfaces that accept external items call this before use.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.size_ml == 0 {
            return Err(CoreError::Validation(
                "size_ml must be positive".to_string(),
            ));
        }
        if self.fill_percentage > 100 {
            return Err(CoreError::Validation(format!(
                "fill_percentage must be 0-100, got {}",
                self.fill_percentage
            )));
        }
        if self.brand_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "brand_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Remaining liquid volume in millilitres, derived jointly from size
    /// and fill.
    pub fn remaining_ml(&self) -> u32 {
        self.size_ml * u32::from(self.fill_percentage) / 100
    }
}

// ─── Bundle ──────────────────────────────────────────────────────────

/// An ordered set of item references offered by one participant in a swap.
///
/// Non-empty and duplicate-free by construction. Deserialization goes
/// through the same validation, so a persisted proposal can never hold a
/// degenerate bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ItemId>")]
pub struct Bundle(Vec<ItemId>);

impl Bundle {
    /// Create a bundle from item references.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty list or a repeated item.
    pub fn new(items: Vec<ItemId>) -> Result<Self, CoreError> {
        if items.is_empty() {
            return Err(CoreError::Validation(
                "a bundle must contain at least one item".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if !seen.insert(*item) {
                return Err(CoreError::Validation(format!(
                    "bundle references {item} more than once"
                )));
            }
        }
        Ok(Self(items))
    }

    /// The item references, in offer order.
    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    /// Number of items in the bundle.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: emptiness is rejected at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the bundle references the given item.
    pub fn contains(&self, item: &ItemId) -> bool {
        self.0.contains(item)
    }
}

impl TryFrom<Vec<ItemId>> for Bundle {
    type Error = CoreError;

    fn try_from(items: Vec<ItemId>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = &'a ItemId;
    type IntoIter = std::slice::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─── Listing ─────────────────────────────────────────────────────────

/// The availability state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    /// Open to new proposals.
    Active,
    /// Soft-locked: part of an accepted swap, excluded from new proposals.
    Reserved,
    /// Hard-locked: committed to a locked swap until completion or
    /// dispute resolution.
    Committed,
    /// Withdrawn by the owner.
    Withdrawn,
}

impl ListingStatus {
    /// Whether the listing can appear in new proposals and suggestions.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Reserved => "RESERVED",
            Self::Committed => "COMMITTED",
            Self::Withdrawn => "WITHDRAWN",
        };
        f.write_str(s)
    }
}

/// A marketplace listing: one item offered for trade by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,
    /// The participant who owns the item.
    pub owner_id: UserId,
    /// Display title (e.g., "Bleu de Chanel EDP, 2019 batch").
    pub title: String,
    /// The item on offer.
    pub item: Item,
    /// Availability state, driven by swap lifecycle events.
    pub status: ListingStatus,
    /// When the listing was created.
    pub created_at: Timestamp,
}

impl Listing {
    /// Create an active listing for an item.
    pub fn new(owner_id: UserId, title: impl Into<String>, item: Item) -> Self {
        Self {
            id: ListingId::new(),
            owner_id,
            title: title.into(),
            item,
            status: ListingStatus::Active,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item::new("Chanel", 100, 80, Condition::Good).unwrap()
    }

    // ---- item validation ----

    #[test]
    fn test_new_item_valid() {
        let i = item();
        assert_eq!(i.size_ml, 100);
        assert_eq!(i.fill_percentage, 80);
        assert!(!i.has_box);
        assert_eq!(i.storage_history, StorageHistory::CoolDark);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Item::new("Chanel", 0, 80, Condition::Good).is_err());
    }

    #[test]
    fn test_overfull_rejected() {
        assert!(Item::new("Chanel", 100, 101, Condition::Good).is_err());
    }

    #[test]
    fn test_blank_brand_rejected() {
        assert!(Item::new("  ", 100, 80, Condition::Good).is_err());
    }

    #[test]
    fn test_zero_fill_is_valid() {
        // An empty collectible bottle is a legitimate item.
        let i = Item::new("Chanel", 100, 0, Condition::Fair).unwrap();
        assert_eq!(i.remaining_ml(), 0);
    }

    #[test]
    fn test_remaining_ml_joint_derivation() {
        assert_eq!(item().remaining_ml(), 80);
        let half = Item::new("Dior", 50, 50, Condition::Good).unwrap();
        assert_eq!(half.remaining_ml(), 25);
    }

    #[test]
    fn test_builders() {
        let i = item()
            .with_box(true)
            .with_original_cap(true)
            .with_storage(StorageHistory::Shelf);
        assert!(i.has_box && i.has_original_cap);
        assert_eq!(i.storage_history, StorageHistory::Shelf);
    }

    // ---- bundle ----

    #[test]
    fn test_empty_bundle_rejected() {
        assert!(Bundle::new(vec![]).is_err());
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let id = ItemId::new();
        assert!(Bundle::new(vec![id, id]).is_err());
    }

    #[test]
    fn test_bundle_preserves_order() {
        let a = ItemId::new();
        let b = ItemId::new();
        let bundle = Bundle::new(vec![a, b]).unwrap();
        assert_eq!(bundle.items(), &[a, b]);
        assert!(bundle.contains(&a));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_bundle_deserialization_validates() {
        let parsed: Result<Bundle, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }

    // ---- listing ----

    #[test]
    fn test_new_listing_is_active() {
        let listing = Listing::new(UserId::new(), "Bleu de Chanel", item());
        assert_eq!(listing.status, ListingStatus::Active);
        assert!(listing.status.is_available());
        assert!(!ListingStatus::Reserved.is_available());
    }
}
