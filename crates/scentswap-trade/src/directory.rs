//! # Listing Directory — The Storage Collaborator Seam
//!
//! The swap lifecycle resolves item references through [`ItemDirectory`],
//! a trait owned by the external listing store. The store behind it must
//! guarantee that items referenced by a non-terminal swap are not
//! concurrently deleted; this core only reads through the seam.
//!
//! [`InMemoryListingStore`] is the in-process stand-in used by tests, the
//! API, and the CLI. It also demonstrates the consuming side of the event
//! contract: [`InMemoryListingStore::apply_event`] flips listing
//! availability in response to the lock events the swap store emits.

use std::collections::HashMap;
use std::sync::RwLock;

use scentswap_core::{Item, ItemId, Listing, ListingId, ListingStatus, UserId};

use crate::event::SwapEvent;

/// Read access to the listing collaborator's item records.
pub trait ItemDirectory: Send + Sync {
    /// The item with this id, if it exists.
    fn item(&self, id: &ItemId) -> Option<Item>;

    /// The owner of the item with this id, if it exists.
    fn owner_of(&self, id: &ItemId) -> Option<UserId>;
}

/// An in-memory listing store.
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    listings: RwLock<HashMap<ListingId, Listing>>,
}

impl InMemoryListingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a listing, returning its id.
    pub fn insert(&self, listing: Listing) -> ListingId {
        let id = listing.id;
        self.write().insert(id, listing);
        id
    }

    /// The listing with this id, if any.
    pub fn get(&self, id: &ListingId) -> Option<Listing> {
        self.read().get(id).cloned()
    }

    /// A snapshot of every listing, for the suggestion pool.
    pub fn listings(&self) -> Vec<Listing> {
        self.read().values().cloned().collect()
    }

    /// Apply a swap event to listing availability.
    ///
    /// Soft-lock → `Reserved`, hard-lock → `Committed`, release →
    /// `Active`. Events that do not concern listings are ignored.
    pub fn apply_event(&self, event: &SwapEvent) {
        let (items, status) = match event {
            SwapEvent::ItemsSoftLocked { items, .. } => (items, ListingStatus::Reserved),
            SwapEvent::ItemsHardLocked { items, .. } => (items, ListingStatus::Committed),
            SwapEvent::ItemsReleased { items, .. } => (items, ListingStatus::Active),
            _ => return,
        };
        let mut listings = self.write();
        for listing in listings.values_mut() {
            if items.contains(&listing.item.id) {
                listing.status = status;
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ListingId, Listing>> {
        // A poisoned lock means a reader or writer panicked; the map itself
        // is still the authoritative record, so recover it.
        self.listings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ListingId, Listing>> {
        self.listings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ItemDirectory for InMemoryListingStore {
    // Linear scans: the in-memory stand-in favors obviousness over an
    // item-id index it will never need at test scale.
    fn item(&self, id: &ItemId) -> Option<Item> {
        self.read()
            .values()
            .find(|listing| listing.item.id == *id)
            .map(|listing| listing.item.clone())
    }

    fn owner_of(&self, id: &ItemId) -> Option<UserId> {
        self.read()
            .values()
            .find(|listing| listing.item.id == *id)
            .map(|listing| listing.owner_id)
    }
}
