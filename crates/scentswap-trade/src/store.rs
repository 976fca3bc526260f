//! # Swap Store — Optimistic Concurrency Over Swap Records
//!
//! All swap mutations flow through this store. Each write is conditioned
//! on the version the caller read immediately before (compare-and-swap):
//! two racing accepts, or an accept racing a cancel, cannot both succeed —
//! the loser gets [`TradeError::Conflict`] and re-reads.
//!
//! The one cross-swap operation — soft-locking items across competing
//! proposals when one is accepted — runs inside the same write section as
//! the acceptance, a short transaction scoped to the affected item set
//! rather than a global lock.
//!
//! Side effects leave through the event outbox ([`SwapStore::drain_events`]);
//! the store never touches listing storage, it only reads items through the
//! [`ItemDirectory`] seam.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use scentswap_core::{Bundle, ItemId, MessageId, SwapId, Timestamp, UserId};
use scentswap_safety::ScreeningEngine;
use scentswap_value::{compare, valuate, FairnessResult, ValuationConfig, ValuedItem};

use crate::directory::ItemDirectory;
use crate::error::TradeError;
use crate::event::SwapEvent;
use crate::message::{MessageSender, SwapMessage};
use crate::swap::{DisputeOutcome, Swap, SwapAction, SwapStatus};

/// The authoritative holder of swap records.
pub struct SwapStore {
    swaps: RwLock<HashMap<SwapId, Swap>>,
    directory: Arc<dyn ItemDirectory>,
    valuation: ValuationConfig,
    screening: ScreeningEngine,
    events: Mutex<Vec<SwapEvent>>,
}

impl SwapStore {
    /// Create a store over the given collaborator seam and engine
    /// configuration.
    pub fn new(
        directory: Arc<dyn ItemDirectory>,
        valuation: ValuationConfig,
        screening: ScreeningEngine,
    ) -> Self {
        Self {
            swaps: RwLock::new(HashMap::new()),
            directory,
            valuation,
            screening,
            events: Mutex::new(Vec::new()),
        }
    }

    // ── Proposal ─────────────────────────────────────────────────────

    /// Propose a swap between two participants.
    ///
    /// Validates that both bundles are non-empty, that every item resolves
    /// through the directory with the claimed owner, and that no item is
    /// already committed to another swap at `Accepted` or beyond. The
    /// fairness snapshot is computed and frozen here. On any failure the
    /// swap is not created and no events are emitted.
    pub fn propose(
        &self,
        initiator_id: UserId,
        recipient_id: UserId,
        initiator_items: Vec<ItemId>,
        recipient_items: Vec<ItemId>,
    ) -> Result<Swap, TradeError> {
        if initiator_id == recipient_id {
            return Err(TradeError::Validation(
                "a swap needs two distinct participants".to_string(),
            ));
        }
        let initiator_bundle = Bundle::new(initiator_items)?;
        let recipient_bundle = Bundle::new(recipient_items)?;

        let initiator_valued = self.valued_bundle(&initiator_bundle, &initiator_id)?;
        let recipient_valued = self.valued_bundle(&recipient_bundle, &recipient_id)?;
        let snapshot = compare(&initiator_valued, &recipient_valued);

        let mut swaps = self.write();
        self.require_items_free(&swaps, &initiator_bundle, &recipient_bundle)?;

        let swap = Swap::new(
            initiator_id,
            recipient_id,
            initiator_bundle,
            recipient_bundle,
            snapshot,
        );
        let result = swap.clone();
        swaps.insert(swap.id, swap);
        drop(swaps);

        info!(swap = %result.id, score = result.fairness_snapshot.score, "swap proposed");
        self.emit(SwapEvent::ProposalCreated {
            swap_id: result.id,
            initiator_id,
            recipient_id,
        });
        Ok(result)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The swap with this id.
    pub fn get(&self, swap_id: &SwapId) -> Result<Swap, TradeError> {
        self.read()
            .get(swap_id)
            .cloned()
            .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))
    }

    /// Fairness for the swap's bundles as the items stand right now.
    ///
    /// Before lock this recomputes from live directory data, so description
    /// edits show up; from lock onward the frozen snapshot is the answer —
    /// the bundles can no longer change.
    pub fn current_fairness(&self, swap_id: &SwapId) -> Result<FairnessResult, TradeError> {
        let (pre_lock, snapshot, initiator_bundle, recipient_bundle, initiator_id, recipient_id) = {
            let swaps = self.read();
            let swap = swaps
                .get(swap_id)
                .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))?;
            (
                swap.status.is_pre_lock(),
                swap.fairness_snapshot.clone(),
                swap.initiator_items.clone(),
                swap.recipient_items.clone(),
                swap.initiator_id,
                swap.recipient_id,
            )
        };
        if !pre_lock {
            return Ok(snapshot);
        }
        let initiator_valued = self.valued_bundle(&initiator_bundle, &initiator_id)?;
        let recipient_valued = self.valued_bundle(&recipient_bundle, &recipient_id)?;
        Ok(compare(&initiator_valued, &recipient_valued))
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply a participant action under compare-and-swap semantics.
    ///
    /// `expected_version` must equal the swap's current version or the call
    /// fails with [`TradeError::Conflict`] and changes nothing. The one
    /// exception is cancelling an already-cancelled swap, which returns the
    /// swap unchanged regardless of version — idempotent cancellation would
    /// otherwise be unreachable, since the cancelling write bumps the
    /// version the second caller read.
    pub fn transition(
        &self,
        swap_id: &SwapId,
        action: SwapAction,
        actor: &UserId,
        expected_version: u64,
    ) -> Result<Swap, TradeError> {
        // Counter-offers need directory reads and valuation; prepare them
        // before taking the write lock.
        let prepared_counter = self.prepare_counter(swap_id, &action)?;
        let action_name = action.name();

        let mut swaps = self.write();
        let mut events = Vec::new();

        let (from, result) = {
            let swap = swaps
                .get_mut(swap_id)
                .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))?;

            if matches!(action, SwapAction::Cancel) && swap.status == SwapStatus::Cancelled {
                return Ok(swap.clone());
            }
            if swap.version != expected_version {
                return Err(TradeError::Conflict {
                    expected: expected_version,
                    current: swap.version,
                });
            }

            let from = swap.status;
            match action {
                SwapAction::Accept => swap.accept(actor)?,
                SwapAction::Counter { .. } => {
                    let (initiator_bundle, recipient_bundle, snapshot) = prepared_counter
                        .ok_or_else(|| {
                            TradeError::Validation("counter-offer was not prepared".to_string())
                        })?;
                    swap.counter(actor, initiator_bundle, recipient_bundle, snapshot)?;
                }
                SwapAction::Cancel => {
                    swap.cancel(actor)?;
                }
                SwapAction::Lock => swap.lock(actor)?,
                SwapAction::MarkShipped { ref tracking_ref } => {
                    swap.mark_shipped(actor, tracking_ref)?;
                }
                SwapAction::ConfirmReceipt => {
                    swap.confirm_receipt(actor)?;
                }
                SwapAction::Dispute { ref reason } => swap.open_dispute(actor, reason)?,
            }

            swap.version += 1;
            (from, swap.clone())
        };

        let to = result.status;
        if to != from {
            events.push(SwapEvent::StatusChanged {
                swap_id: *swap_id,
                from,
                to,
                version: result.version,
            });
            match to {
                SwapStatus::Accepted => events.push(SwapEvent::ItemsSoftLocked {
                    swap_id: *swap_id,
                    items: result.all_items(),
                }),
                SwapStatus::Locked => events.push(SwapEvent::ItemsHardLocked {
                    swap_id: *swap_id,
                    items: result.all_items(),
                }),
                SwapStatus::Cancelled | SwapStatus::Completed => {
                    events.push(SwapEvent::ItemsReleased {
                        swap_id: *swap_id,
                        items: result.all_items(),
                    });
                }
                SwapStatus::Disputed => events.push(SwapEvent::DisputeOpened {
                    swap_id: *swap_id,
                    raised_by: *actor,
                }),
                _ => {}
            }
        }

        // Acceptance displaces competing proposals over the same items —
        // still inside the write section, so no proposal can slip between
        // the acceptance and the sweep.
        if to == SwapStatus::Accepted && from != to {
            self.cancel_competing(&mut swaps, swap_id, &result.all_items(), &mut events);
        }

        drop(swaps);
        info!(
            swap = %swap_id,
            action = action_name,
            from = %from,
            to = %to,
            version = result.version,
            "swap transition"
        );
        for event in events {
            self.emit(event);
        }
        Ok(result)
    }

    /// Record the externally-decided outcome of a dispute. Mediator
    /// surface — not reachable through participant actions.
    pub fn resolve_dispute(
        &self,
        swap_id: &SwapId,
        outcome: DisputeOutcome,
        note: &str,
        expected_version: u64,
    ) -> Result<Swap, TradeError> {
        let result = {
            let mut swaps = self.write();
            let swap = swaps
                .get_mut(swap_id)
                .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))?;
            if swap.version != expected_version {
                return Err(TradeError::Conflict {
                    expected: expected_version,
                    current: swap.version,
                });
            }
            swap.resolve_dispute(outcome, note)?;
            swap.version += 1;
            swap.clone()
        };

        info!(swap = %swap_id, outcome = %outcome, "dispute resolved");
        self.emit(SwapEvent::DisputeResolved {
            swap_id: *swap_id,
            outcome,
        });
        self.emit(SwapEvent::ItemsReleased {
            swap_id: *swap_id,
            items: result.all_items(),
        });
        Ok(result)
    }

    // ── Messages ─────────────────────────────────────────────────────

    /// Append a screened message to a swap's log.
    ///
    /// The message is stored even when screening blocks it — flagged,
    /// never discarded — and a blocking category puts the swap under
    /// review. Only cancelled swaps refuse new messages.
    pub fn append_message(
        &self,
        swap_id: &SwapId,
        sender: MessageSender,
        body: &str,
    ) -> Result<SwapMessage, TradeError> {
        if body.trim().is_empty() {
            return Err(TradeError::Validation(
                "message body must not be empty".to_string(),
            ));
        }
        let screened = self.screening.screen(body);

        let message = {
            let mut swaps = self.write();
            let swap = swaps
                .get_mut(swap_id)
                .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))?;

            if !swap.status.accepts_messages() {
                return Err(TradeError::InvalidTransition {
                    from: swap.status.to_string(),
                    action: "message".to_string(),
                });
            }
            if let MessageSender::Participant { user_id } = sender {
                if swap.role_of(&user_id).is_none() {
                    return Err(TradeError::Authorization(format!(
                        "{user_id} is not a participant in this swap"
                    )));
                }
            }

            let message = SwapMessage {
                id: MessageId::new(),
                sender,
                body: body.to_string(),
                sent_at: Timestamp::now(),
                flagged: !screened.is_safe,
                warnings: screened.warnings,
            };
            swap.messages.push(message.clone());
            if message.flagged {
                swap.flagged_for_review = true;
            }
            swap.version += 1;
            message
        };

        if message.flagged {
            warn!(swap = %swap_id, message = %message.id, "blocked message stored and flagged");
        }
        self.emit(SwapEvent::MessageAppended {
            swap_id: *swap_id,
            message_id: message.id,
            flagged: message.flagged,
        });
        Ok(message)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Drain the outbox. Consumers (notification transport, listing
    /// collaborator) own delivery from here.
    pub fn drain_events(&self) -> Vec<SwapEvent> {
        std::mem::take(&mut *self.events_lock())
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Resolve and value a bundle, checking claimed ownership.
    fn valued_bundle(
        &self,
        bundle: &Bundle,
        claimed_owner: &UserId,
    ) -> Result<Vec<ValuedItem>, TradeError> {
        bundle
            .items()
            .iter()
            .map(|item_id| {
                let item = self.directory.item(item_id).ok_or_else(|| {
                    TradeError::Validation(format!("unknown item {item_id}"))
                })?;
                let owner = self.directory.owner_of(item_id).ok_or_else(|| {
                    TradeError::Validation(format!("unknown item {item_id}"))
                })?;
                if owner != *claimed_owner {
                    return Err(TradeError::Validation(format!(
                        "{item_id} is not owned by {claimed_owner}"
                    )));
                }
                Ok(valuate(&item, &self.valuation))
            })
            .collect()
    }

    /// Reject proposals over items already committed elsewhere.
    ///
    /// Soft/hard locks are the listing collaborator's to enforce against
    /// the wider marketplace; this guard mirrors the same rule against the
    /// swaps this store can see itself.
    fn require_items_free(
        &self,
        swaps: &HashMap<SwapId, Swap>,
        initiator_bundle: &Bundle,
        recipient_bundle: &Bundle,
    ) -> Result<(), TradeError> {
        let proposed: HashSet<ItemId> = initiator_bundle
            .items()
            .iter()
            .chain(recipient_bundle.items())
            .copied()
            .collect();

        for swap in swaps.values() {
            let reserved = match swap.status {
                SwapStatus::Accepted | SwapStatus::Locked | SwapStatus::Shipping => true,
                SwapStatus::Disputed => swap
                    .dispute
                    .as_ref()
                    .is_some_and(|d| d.resolution.is_none()),
                _ => false,
            };
            if !reserved {
                continue;
            }
            if let Some(item) = swap
                .all_items()
                .iter()
                .find(|item| proposed.contains(item))
            {
                return Err(TradeError::Validation(format!(
                    "{item} is reserved by swap {}",
                    swap.id
                )));
            }
        }
        Ok(())
    }

    fn prepare_counter(
        &self,
        swap_id: &SwapId,
        action: &SwapAction,
    ) -> Result<Option<(Bundle, Bundle, FairnessResult)>, TradeError> {
        let SwapAction::Counter {
            initiator_items,
            recipient_items,
        } = action
        else {
            return Ok(None);
        };

        let (initiator_id, recipient_id) = {
            let swaps = self.read();
            let swap = swaps
                .get(swap_id)
                .ok_or_else(|| TradeError::NotFound(swap_id.to_string()))?;
            (swap.initiator_id, swap.recipient_id)
        };

        let initiator_bundle = Bundle::new(initiator_items.clone())?;
        let recipient_bundle = Bundle::new(recipient_items.clone())?;
        let initiator_valued = self.valued_bundle(&initiator_bundle, &initiator_id)?;
        let recipient_valued = self.valued_bundle(&recipient_bundle, &recipient_id)?;
        let snapshot = compare(&initiator_valued, &recipient_valued);
        Ok(Some((initiator_bundle, recipient_bundle, snapshot)))
    }

    /// Cancel `Proposed`/`Negotiating` swaps that share items with a
    /// just-accepted swap. Runs under the caller's write guard.
    fn cancel_competing(
        &self,
        swaps: &mut HashMap<SwapId, Swap>,
        accepted_id: &SwapId,
        accepted_items: &[ItemId],
        events: &mut Vec<SwapEvent>,
    ) {
        let item_set: HashSet<ItemId> = accepted_items.iter().copied().collect();
        let competing: Vec<SwapId> = swaps
            .iter()
            .filter(|(id, other)| {
                **id != *accepted_id
                    && matches!(
                        other.status,
                        SwapStatus::Proposed | SwapStatus::Negotiating
                    )
                    && other.all_items().iter().any(|item| item_set.contains(item))
            })
            .map(|(id, _)| *id)
            .collect();

        for other_id in competing {
            let Some(other) = swaps.get_mut(&other_id) else {
                continue;
            };
            let from = other.status;
            if other
                .cancel_by_system("items reserved by an accepted swap")
                .is_err()
            {
                continue;
            }
            other.version += 1;
            info!(swap = %other_id, displaced_by = %accepted_id, "competing proposal cancelled");
            events.push(SwapEvent::StatusChanged {
                swap_id: other_id,
                from,
                to: SwapStatus::Cancelled,
                version: other.version,
            });
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SwapId, Swap>> {
        // A poisoned lock means some writer panicked mid-call; the map is
        // still the authoritative record, so recover it.
        self.swaps
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SwapId, Swap>> {
        self.swaps
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn events_lock(&self) -> std::sync::MutexGuard<'_, Vec<SwapEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: SwapEvent) {
        self.events_lock().push(event);
    }
}
