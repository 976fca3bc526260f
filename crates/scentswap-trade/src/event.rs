//! # Swap Events — The Collaborator Outbox
//!
//! Every externally-relevant state change is emitted as a `SwapEvent` on
//! the store's outbox. The listing collaborator consumes the lock events
//! (`ItemsSoftLocked`, `ItemsHardLocked`, `ItemsReleased`) to flip listing
//! availability; the notification transport consumes the rest. Delivery
//! guarantees are the consumers' concern, not this crate's.
//!
//! Emitting events instead of calling into listing storage keeps the state
//! machine free of a storage dependency.

use serde::{Deserialize, Serialize};

use scentswap_core::{ItemId, MessageId, SwapId, UserId};

use crate::swap::{DisputeOutcome, SwapStatus};

/// A state change emitted by the swap store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapEvent {
    /// A new swap was proposed.
    ProposalCreated {
        /// The new swap.
        swap_id: SwapId,
        /// Who proposed it.
        initiator_id: UserId,
        /// Whose listing it targets.
        recipient_id: UserId,
    },

    /// A swap moved between statuses.
    StatusChanged {
        /// The swap that changed.
        swap_id: SwapId,
        /// Status before.
        from: SwapStatus,
        /// Status after.
        to: SwapStatus,
        /// Version after the write.
        version: u64,
    },

    /// Items entered the soft-locked state (swap accepted): exclude them
    /// from new proposals.
    ItemsSoftLocked {
        /// The accepting swap.
        swap_id: SwapId,
        /// Both bundles' items.
        items: Vec<ItemId>,
    },

    /// Items entered the hard-locked state (swap locked): no edits or
    /// withdrawal until completion or dispute resolution.
    ItemsHardLocked {
        /// The locked swap.
        swap_id: SwapId,
        /// Both bundles' items.
        items: Vec<ItemId>,
    },

    /// Items are free again (cancellation, completion, or dispute
    /// resolution).
    ItemsReleased {
        /// The releasing swap.
        swap_id: SwapId,
        /// Both bundles' items.
        items: Vec<ItemId>,
    },

    /// A message was appended to a swap's log.
    MessageAppended {
        /// The swap messaged on.
        swap_id: SwapId,
        /// The new message.
        message_id: MessageId,
        /// Whether screening flagged it.
        flagged: bool,
    },

    /// A participant opened a dispute.
    DisputeOpened {
        /// The disputed swap.
        swap_id: SwapId,
        /// Who raised it.
        raised_by: UserId,
    },

    /// A mediator recorded a dispute outcome.
    DisputeResolved {
        /// The disputed swap.
        swap_id: SwapId,
        /// The recorded outcome.
        outcome: DisputeOutcome,
    },
}
