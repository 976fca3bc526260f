//! # The Swap Aggregate and Its State Machine
//!
//! A swap is created once, via the store's propose operation, and is
//! immutable in identity thereafter. Only status, bundles (before lock,
//! via counter-offer), shipment evidence, the message log, the dispute
//! record, and the version may mutate.
//!
//! ## States
//!
//! - `Proposed` → initial state, frozen fairness snapshot attached.
//! - `Negotiating` → at least one counter-offer has replaced the bundles.
//! - `Accepted` → recipient agreed; items soft-lock.
//! - `Locked` → both bundles hard-lock; addresses are revealed by the
//!   notification collaborator.
//! - `Shipping` → at least one side has posted their package.
//! - `Completed` → both sides confirmed receipt (terminal unless disputed).
//! - `Cancelled` → walked away before lock (terminal).
//! - `Disputed` → raised from `Shipping` or `Completed`; resolution is
//!   recorded, not computed.
//!
//! ## Completion Is an AND-Join
//!
//! The swap completes only when **both** received timestamps are set.
//! One-sided receipt means the other package is still in flight — or
//! missing, which is exactly what the dispute path is for. Completion
//! implies mutual custody confirmation, never an assumption of it.

use serde::{Deserialize, Serialize};

use scentswap_core::{Bundle, ItemId, SwapId, Timestamp, UserId};
use scentswap_value::FairnessResult;

use crate::error::TradeError;
use crate::message::SwapMessage;

// ─── Status ──────────────────────────────────────────────────────────

/// The lifecycle status of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    /// Proposed by the initiator, awaiting the recipient.
    Proposed,
    /// Bundles under negotiation via counter-offers.
    Negotiating,
    /// Recipient accepted; items are soft-locked.
    Accepted,
    /// Hard-locked; shipping addresses revealed.
    Locked,
    /// At least one package is in flight.
    Shipping,
    /// Both sides confirmed receipt.
    Completed,
    /// Abandoned before lock (terminal).
    Cancelled,
    /// Under dispute, awaiting an external resolution.
    Disputed,
}

impl SwapStatus {
    /// Whether no further transitions are possible.
    ///
    /// `Completed` is deliberately not terminal: a dispute may still be
    /// raised against a completed swap.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the swap can still be cancelled (pre-lock states only).
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Proposed | Self::Negotiating | Self::Accepted)
    }

    /// Whether new messages may be appended. Only cancellation closes the
    /// channel; dispute discussion stays on the audited log.
    pub fn accepts_messages(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether the fairness snapshot may still be recomputed from live
    /// item data.
    pub fn is_pre_lock(&self) -> bool {
        matches!(self, Self::Proposed | Self::Negotiating | Self::Accepted)
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Proposed => "PROPOSED",
            Self::Negotiating => "NEGOTIATING",
            Self::Accepted => "ACCEPTED",
            Self::Locked => "LOCKED",
            Self::Shipping => "SHIPPING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Disputed => "DISPUTED",
        };
        f.write_str(s)
    }
}

// ─── Roles and Actions ───────────────────────────────────────────────

/// Which side of the swap an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The participant who proposed the swap.
    Initiator,
    /// The participant whose listing was targeted.
    Recipient,
}

/// A participant action on a swap, as accepted by the store's transition
/// operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapAction {
    /// Accept the proposal (recipient only).
    Accept,
    /// Replace both bundles with a counter-offer.
    Counter {
        /// The initiator's new bundle.
        initiator_items: Vec<ItemId>,
        /// The recipient's new bundle.
        recipient_items: Vec<ItemId>,
    },
    /// Walk away. Idempotent; releases soft-locks.
    Cancel,
    /// Hard-lock both bundles and move to shipping.
    Lock,
    /// Record that the actor posted their package.
    MarkShipped {
        /// Carrier tracking reference.
        tracking_ref: String,
    },
    /// Record that the actor received the counterpart's package.
    ConfirmReceipt,
    /// Open a dispute with a reason.
    Dispute {
        /// Why the dispute is being raised.
        reason: String,
    },
}

impl SwapAction {
    /// The action's name, for errors and telemetry.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Counter { .. } => "counter",
            Self::Cancel => "cancel",
            Self::Lock => "lock",
            Self::MarkShipped { .. } => "mark_shipped",
            Self::ConfirmReceipt => "confirm_receipt",
            Self::Dispute { .. } => "dispute",
        }
    }
}

// ─── Shipment Evidence ───────────────────────────────────────────────

/// Per-participant shipment evidence, populated as the trade executes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Initiator's carrier tracking reference.
    pub initiator_tracking_ref: Option<String>,
    /// Recipient's carrier tracking reference.
    pub recipient_tracking_ref: Option<String>,
    /// When the initiator posted their package.
    pub initiator_shipped_at: Option<Timestamp>,
    /// When the recipient posted their package.
    pub recipient_shipped_at: Option<Timestamp>,
    /// When the initiator received the recipient's package.
    pub initiator_received_at: Option<Timestamp>,
    /// When the recipient received the initiator's package.
    pub recipient_received_at: Option<Timestamp>,
}

impl ShipmentRecord {
    /// Whether the given side has recorded a shipment.
    pub fn shipped(&self, role: Role) -> bool {
        match role {
            Role::Initiator => self.initiator_shipped_at.is_some(),
            Role::Recipient => self.recipient_shipped_at.is_some(),
        }
    }

    /// Whether the given side has confirmed receipt.
    pub fn received(&self, role: Role) -> bool {
        match role {
            Role::Initiator => self.initiator_received_at.is_some(),
            Role::Recipient => self.recipient_received_at.is_some(),
        }
    }

    /// Whether both sides have confirmed receipt.
    pub fn both_received(&self) -> bool {
        self.initiator_received_at.is_some() && self.recipient_received_at.is_some()
    }
}

// ─── Dispute Record ──────────────────────────────────────────────────

/// The externally-decided outcome of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisputeOutcome {
    /// The trade stands as executed.
    CompletedAsAgreed,
    /// Both packages go back; the trade is unwound.
    ReturnToSenders,
}

impl std::fmt::Display for DisputeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CompletedAsAgreed => "COMPLETED_AS_AGREED",
            Self::ReturnToSenders => "RETURN_TO_SENDERS",
        };
        f.write_str(s)
    }
}

/// A recorded dispute resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeResolution {
    /// The outcome the mediator recorded.
    pub outcome: DisputeOutcome,
    /// The mediator's note.
    pub note: String,
    /// When the resolution was recorded.
    pub resolved_at: Timestamp,
}

/// An open or resolved dispute on a swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeRecord {
    /// Which participant raised the dispute.
    pub raised_by: UserId,
    /// The reason given when it was raised.
    pub reason: String,
    /// When it was raised.
    pub opened_at: Timestamp,
    /// The resolution, once a mediator records one.
    pub resolution: Option<DisputeResolution>,
}

// ─── Transition Audit Log ────────────────────────────────────────────

/// Record of a single status change, for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapTransitionRecord {
    /// Status before.
    pub from_status: SwapStatus,
    /// Status after.
    pub to_status: SwapStatus,
    /// The participant who drove the transition, when one did.
    pub actor: Option<UserId>,
    /// When it happened.
    pub timestamp: Timestamp,
    /// What happened.
    pub note: String,
}

// ─── The Swap ────────────────────────────────────────────────────────

/// A proposed or active trade between two participants.
///
/// Bundles hold item references, not copies: edits to an item's
/// description before lock remain visible to fairness recomputation, and
/// items stay exclusively owned by their listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    /// Unique swap identifier.
    pub id: SwapId,
    /// Who proposed the swap.
    pub initiator_id: UserId,
    /// Whose listing was targeted.
    pub recipient_id: UserId,
    /// The initiator's offered items.
    pub initiator_items: Bundle,
    /// The recipient's offered items.
    pub recipient_items: Bundle,
    /// Current lifecycle status.
    pub status: SwapStatus,
    /// Optimistic-concurrency token, incremented on every write.
    pub version: u64,
    /// Fairness frozen at proposal time (refreshed by counter-offers).
    pub fairness_snapshot: FairnessResult,
    /// Shipment evidence.
    pub shipment: ShipmentRecord,
    /// Append-only message log.
    pub messages: Vec<SwapMessage>,
    /// The dispute, if one was raised.
    pub dispute: Option<DisputeRecord>,
    /// Set when screening flags a blocking message category.
    pub flagged_for_review: bool,
    /// When the swap was proposed.
    pub created_at: Timestamp,
    /// Ordered log of all status changes.
    pub transitions: Vec<SwapTransitionRecord>,
}

impl Swap {
    /// Create a freshly-proposed swap. Store-internal: proposals are made
    /// through [`crate::store::SwapStore::propose`], which validates
    /// bundles and ownership first.
    pub(crate) fn new(
        initiator_id: UserId,
        recipient_id: UserId,
        initiator_items: Bundle,
        recipient_items: Bundle,
        fairness_snapshot: FairnessResult,
    ) -> Self {
        Self {
            id: SwapId::new(),
            initiator_id,
            recipient_id,
            initiator_items,
            recipient_items,
            status: SwapStatus::Proposed,
            version: 1,
            fairness_snapshot,
            shipment: ShipmentRecord::default(),
            messages: Vec::new(),
            dispute: None,
            flagged_for_review: false,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// The role of a user on this swap, if they are a participant.
    pub fn role_of(&self, user: &UserId) -> Option<Role> {
        if *user == self.initiator_id {
            Some(Role::Initiator)
        } else if *user == self.recipient_id {
            Some(Role::Recipient)
        } else {
            None
        }
    }

    /// Every item referenced by either bundle.
    pub fn all_items(&self) -> Vec<ItemId> {
        self.initiator_items
            .items()
            .iter()
            .chain(self.recipient_items.items())
            .copied()
            .collect()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Accept the proposal (PROPOSED/NEGOTIATING → ACCEPTED).
    ///
    /// Recipient only: the initiator accepting their own offer would make
    /// every proposal self-ratifying.
    pub(crate) fn accept(&mut self, actor: &UserId) -> Result<(), TradeError> {
        let role = self.require_participant(actor)?;
        if role != Role::Recipient {
            return Err(TradeError::Authorization(
                "only the recipient can accept a proposal".to_string(),
            ));
        }
        self.require_status(
            &[SwapStatus::Proposed, SwapStatus::Negotiating],
            "accept",
        )?;
        self.do_transition(SwapStatus::Accepted, Some(*actor), "proposal accepted");
        Ok(())
    }

    /// Replace both bundles with a counter-offer
    /// (PROPOSED/NEGOTIATING → NEGOTIATING).
    ///
    /// The caller provides the freshly-computed fairness snapshot for the
    /// new bundles; the old snapshot is superseded, not patched.
    pub(crate) fn counter(
        &mut self,
        actor: &UserId,
        initiator_items: Bundle,
        recipient_items: Bundle,
        fairness_snapshot: FairnessResult,
    ) -> Result<(), TradeError> {
        self.require_participant(actor)?;
        self.require_status(
            &[SwapStatus::Proposed, SwapStatus::Negotiating],
            "counter",
        )?;
        self.initiator_items = initiator_items;
        self.recipient_items = recipient_items;
        self.fairness_snapshot = fairness_snapshot;
        self.do_transition(SwapStatus::Negotiating, Some(*actor), "counter-offer");
        Ok(())
    }

    /// Cancel the swap (pre-lock states → CANCELLED).
    ///
    /// Returns `false` when the swap was already cancelled: cancelling
    /// twice is a no-op, not an error.
    pub(crate) fn cancel(&mut self, actor: &UserId) -> Result<bool, TradeError> {
        self.require_participant(actor)?;
        if self.status == SwapStatus::Cancelled {
            return Ok(false);
        }
        if !self.status.can_cancel() {
            return Err(TradeError::InvalidTransition {
                from: self.status.to_string(),
                action: "cancel".to_string(),
            });
        }
        self.do_transition(SwapStatus::Cancelled, Some(*actor), "cancelled");
        Ok(true)
    }

    /// Cancel driven by the store itself (competing proposal displaced by
    /// an acceptance). Skips the participant check; still honors the
    /// pre-lock guard.
    pub(crate) fn cancel_by_system(&mut self, note: &str) -> Result<(), TradeError> {
        if !self.status.can_cancel() {
            return Err(TradeError::InvalidTransition {
                from: self.status.to_string(),
                action: "cancel".to_string(),
            });
        }
        self.do_transition(SwapStatus::Cancelled, None, note);
        Ok(())
    }

    /// Hard-lock the swap (ACCEPTED → LOCKED). Either participant.
    pub(crate) fn lock(&mut self, actor: &UserId) -> Result<(), TradeError> {
        self.require_participant(actor)?;
        self.require_status(&[SwapStatus::Accepted], "lock")?;
        self.do_transition(SwapStatus::Locked, Some(*actor), "bundles locked");
        Ok(())
    }

    /// Record the actor's shipment (LOCKED/SHIPPING; advances to SHIPPING
    /// on the first one).
    pub(crate) fn mark_shipped(
        &mut self,
        actor: &UserId,
        tracking_ref: &str,
    ) -> Result<(), TradeError> {
        let role = self.require_participant(actor)?;
        self.require_status(&[SwapStatus::Locked, SwapStatus::Shipping], "mark_shipped")?;
        if tracking_ref.trim().is_empty() {
            return Err(TradeError::Validation(
                "a tracking reference is required to record a shipment".to_string(),
            ));
        }
        if self.shipment.shipped(role) {
            return Err(TradeError::Validation(
                "this participant has already recorded a shipment".to_string(),
            ));
        }

        let now = Timestamp::now();
        match role {
            Role::Initiator => {
                self.shipment.initiator_tracking_ref = Some(tracking_ref.to_string());
                self.shipment.initiator_shipped_at = Some(now);
            }
            Role::Recipient => {
                self.shipment.recipient_tracking_ref = Some(tracking_ref.to_string());
                self.shipment.recipient_shipped_at = Some(now);
            }
        }

        if self.status == SwapStatus::Locked {
            self.do_transition(SwapStatus::Shipping, Some(*actor), "first package posted");
        }
        Ok(())
    }

    /// Record that the actor received the counterpart's package
    /// (SHIPPING; completes when both sides have).
    ///
    /// Returns `true` when this confirmation completed the swap.
    pub(crate) fn confirm_receipt(&mut self, actor: &UserId) -> Result<bool, TradeError> {
        let role = self.require_participant(actor)?;
        self.require_status(&[SwapStatus::Shipping], "confirm_receipt")?;
        if self.shipment.received(role) {
            return Err(TradeError::Validation(
                "this participant has already confirmed receipt".to_string(),
            ));
        }

        let now = Timestamp::now();
        match role {
            Role::Initiator => self.shipment.initiator_received_at = Some(now),
            Role::Recipient => self.shipment.recipient_received_at = Some(now),
        }

        if self.shipment.both_received() {
            self.do_transition(
                SwapStatus::Completed,
                Some(*actor),
                "both receipts confirmed",
            );
            return Ok(true);
        }
        Ok(false)
    }

    /// Open a dispute (SHIPPING/COMPLETED → DISPUTED). Requires a reason.
    pub(crate) fn open_dispute(
        &mut self,
        actor: &UserId,
        reason: &str,
    ) -> Result<(), TradeError> {
        self.require_participant(actor)?;
        self.require_status(&[SwapStatus::Shipping, SwapStatus::Completed], "dispute")?;
        if reason.trim().is_empty() {
            return Err(TradeError::Validation(
                "a dispute requires a reason".to_string(),
            ));
        }
        self.dispute = Some(DisputeRecord {
            raised_by: *actor,
            reason: reason.trim().to_string(),
            opened_at: Timestamp::now(),
            resolution: None,
        });
        self.do_transition(SwapStatus::Disputed, Some(*actor), "dispute opened");
        Ok(())
    }

    /// Record the externally-decided outcome of the dispute.
    ///
    /// The lifecycle does not reopen: the status stays `Disputed` with the
    /// resolution attached, and recording a second resolution is rejected.
    pub(crate) fn resolve_dispute(
        &mut self,
        outcome: DisputeOutcome,
        note: &str,
    ) -> Result<(), TradeError> {
        if self.status != SwapStatus::Disputed {
            return Err(TradeError::InvalidTransition {
                from: self.status.to_string(),
                action: "resolve_dispute".to_string(),
            });
        }
        let dispute = self.dispute.as_mut().ok_or_else(|| {
            TradeError::Validation("disputed swap has no dispute record".to_string())
        })?;
        if dispute.resolution.is_some() {
            return Err(TradeError::Validation(
                "dispute is already resolved".to_string(),
            ));
        }
        dispute.resolution = Some(DisputeResolution {
            outcome,
            note: note.to_string(),
            resolved_at: Timestamp::now(),
        });
        Ok(())
    }

    // ── Guards ───────────────────────────────────────────────────────

    fn require_participant(&self, actor: &UserId) -> Result<Role, TradeError> {
        self.role_of(actor).ok_or_else(|| {
            TradeError::Authorization(format!("{actor} is not a participant in this swap"))
        })
    }

    fn require_status(
        &self,
        allowed: &[SwapStatus],
        action: &str,
    ) -> Result<(), TradeError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(TradeError::InvalidTransition {
                from: self.status.to_string(),
                action: action.to_string(),
            })
        }
    }

    /// Record a status change in the audit log.
    fn do_transition(&mut self, to: SwapStatus, actor: Option<UserId>, note: &str) {
        self.transitions.push(SwapTransitionRecord {
            from_status: self.status,
            to_status: to,
            actor,
            timestamp: Timestamp::now(),
            note: note.to_string(),
        });
        self.status = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scentswap_value::{compare, valuate, ValuationConfig};

    use scentswap_core::{Condition, Item};

    fn participants() -> (UserId, UserId) {
        (UserId::new(), UserId::new())
    }

    fn swap() -> (Swap, UserId, UserId) {
        let (initiator, recipient) = participants();
        let cfg = ValuationConfig::default();
        let mine = Item::new("Chanel", 100, 80, Condition::Good).unwrap();
        let theirs = Item::new("Dior", 100, 90, Condition::Good).unwrap();
        let snapshot = compare(&[valuate(&mine, &cfg)], &[valuate(&theirs, &cfg)]);
        let s = Swap::new(
            initiator,
            recipient,
            Bundle::new(vec![mine.id]).unwrap(),
            Bundle::new(vec![theirs.id]).unwrap(),
            snapshot,
        );
        (s, initiator, recipient)
    }

    fn shipped_swap() -> (Swap, UserId, UserId) {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();
        s.mark_shipped(&initiator, "TRK-I-1").unwrap();
        s.mark_shipped(&recipient, "TRK-R-1").unwrap();
        (s, initiator, recipient)
    }

    // ── proposal and acceptance ──────────────────────────────────────

    #[test]
    fn test_new_swap_is_proposed_at_version_one() {
        let (s, ..) = swap();
        assert_eq!(s.status, SwapStatus::Proposed);
        assert_eq!(s.version, 1);
        assert!(s.transitions.is_empty());
    }

    #[test]
    fn test_recipient_can_accept() {
        let (mut s, _, recipient) = swap();
        s.accept(&recipient).unwrap();
        assert_eq!(s.status, SwapStatus::Accepted);
        assert_eq!(s.transitions.len(), 1);
    }

    #[test]
    fn test_initiator_cannot_accept_own_proposal() {
        let (mut s, initiator, _) = swap();
        let err = s.accept(&initiator).unwrap_err();
        assert!(matches!(err, TradeError::Authorization(_)));
        assert_eq!(s.status, SwapStatus::Proposed);
    }

    #[test]
    fn test_stranger_cannot_act() {
        let (mut s, ..) = swap();
        let err = s.accept(&UserId::new()).unwrap_err();
        assert!(matches!(err, TradeError::Authorization(_)));
    }

    #[test]
    fn test_accept_from_locked_is_invalid() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();
        let err = s.accept(&recipient).unwrap_err();
        assert!(matches!(err, TradeError::InvalidTransition { .. }));
    }

    // ── negotiation ──────────────────────────────────────────────────

    #[test]
    fn test_counter_moves_to_negotiating_and_replaces_snapshot() {
        let (mut s, _initiator, recipient) = swap();
        let old_snapshot = s.fairness_snapshot.clone();
        let cfg = ValuationConfig::default();
        let sweetener = Item::new("Le Labo", 50, 100, Condition::New).unwrap();
        let theirs = Item::new("Dior", 100, 90, Condition::Good).unwrap();
        let snapshot = compare(&[valuate(&sweetener, &cfg)], &[valuate(&theirs, &cfg)]);

        s.counter(
            &recipient,
            Bundle::new(vec![sweetener.id]).unwrap(),
            Bundle::new(vec![theirs.id]).unwrap(),
            snapshot,
        )
        .unwrap();
        assert_eq!(s.status, SwapStatus::Negotiating);
        assert_ne!(s.fairness_snapshot, old_snapshot);

        // A counter-offer can itself be accepted.
        s.accept(&recipient).unwrap();
        assert_eq!(s.status, SwapStatus::Accepted);
    }

    // ── cancellation ─────────────────────────────────────────────────

    #[test]
    fn test_cancel_is_idempotent() {
        let (mut s, initiator, _) = swap();
        assert!(s.cancel(&initiator).unwrap());
        assert_eq!(s.status, SwapStatus::Cancelled);
        // Second cancel: no-op, not an error.
        assert!(!s.cancel(&initiator).unwrap());
        assert_eq!(s.transitions.len(), 1);
    }

    #[test]
    fn test_cancel_after_lock_is_invalid() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();
        let err = s.cancel(&initiator).unwrap_err();
        assert!(matches!(err, TradeError::InvalidTransition { .. }));
    }

    #[test]
    fn test_cancel_from_accepted_is_allowed() {
        let (mut s, _, recipient) = swap();
        s.accept(&recipient).unwrap();
        assert!(s.cancel(&recipient).unwrap());
    }

    // ── locking and shipping ─────────────────────────────────────────

    #[test]
    fn test_lock_requires_accepted() {
        let (mut s, initiator, _) = swap();
        let err = s.lock(&initiator).unwrap_err();
        assert!(matches!(err, TradeError::InvalidTransition { .. }));
    }

    #[test]
    fn test_first_shipment_advances_to_shipping() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();

        s.mark_shipped(&initiator, "TRK-1").unwrap();
        assert_eq!(s.status, SwapStatus::Shipping);
        assert!(s.shipment.shipped(Role::Initiator));
        assert!(!s.shipment.shipped(Role::Recipient));

        // Second shipment stays in Shipping.
        s.mark_shipped(&recipient, "TRK-2").unwrap();
        assert_eq!(s.status, SwapStatus::Shipping);
    }

    #[test]
    fn test_shipment_requires_tracking_ref() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();
        let err = s.mark_shipped(&initiator, "   ").unwrap_err();
        assert!(matches!(err, TradeError::Validation(_)));
    }

    #[test]
    fn test_double_shipment_by_one_side_rejected() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        s.lock(&initiator).unwrap();
        s.mark_shipped(&initiator, "TRK-1").unwrap();
        let err = s.mark_shipped(&initiator, "TRK-1b").unwrap_err();
        assert!(matches!(err, TradeError::Validation(_)));
    }

    // ── completion: the AND-join ─────────────────────────────────────

    #[test]
    fn test_one_receipt_does_not_complete() {
        let (mut s, initiator, _) = shipped_swap();
        let completed = s.confirm_receipt(&initiator).unwrap();
        assert!(!completed);
        assert_eq!(s.status, SwapStatus::Shipping);
    }

    #[test]
    fn test_both_receipts_complete() {
        let (mut s, initiator, recipient) = shipped_swap();
        s.confirm_receipt(&initiator).unwrap();
        let completed = s.confirm_receipt(&recipient).unwrap();
        assert!(completed);
        assert_eq!(s.status, SwapStatus::Completed);
        assert!(s.shipment.both_received());
    }

    #[test]
    fn test_completed_implies_both_timestamps() {
        // Walk every legal route to Completed and check the AND-join held.
        let (mut s, initiator, recipient) = shipped_swap();
        s.confirm_receipt(&recipient).unwrap();
        s.confirm_receipt(&initiator).unwrap();
        assert_eq!(s.status, SwapStatus::Completed);
        assert!(s.shipment.initiator_received_at.is_some());
        assert!(s.shipment.recipient_received_at.is_some());
    }

    #[test]
    fn test_double_receipt_by_one_side_rejected() {
        let (mut s, initiator, _) = shipped_swap();
        s.confirm_receipt(&initiator).unwrap();
        let err = s.confirm_receipt(&initiator).unwrap_err();
        assert!(matches!(err, TradeError::Validation(_)));
    }

    #[test]
    fn test_receipt_before_shipping_is_invalid() {
        let (mut s, initiator, recipient) = swap();
        s.accept(&recipient).unwrap();
        let err = s.confirm_receipt(&initiator).unwrap_err();
        assert!(matches!(err, TradeError::InvalidTransition { .. }));
    }

    // ── disputes ─────────────────────────────────────────────────────

    #[test]
    fn test_dispute_from_shipping() {
        let (mut s, initiator, _) = shipped_swap();
        s.open_dispute(&initiator, "box arrived empty").unwrap();
        assert_eq!(s.status, SwapStatus::Disputed);
        let dispute = s.dispute.as_ref().unwrap();
        assert_eq!(dispute.raised_by, initiator);
        assert_eq!(dispute.reason, "box arrived empty");
    }

    #[test]
    fn test_dispute_from_completed() {
        let (mut s, initiator, recipient) = shipped_swap();
        s.confirm_receipt(&initiator).unwrap();
        s.confirm_receipt(&recipient).unwrap();
        s.open_dispute(&recipient, "bottle is a counterfeit").unwrap();
        assert_eq!(s.status, SwapStatus::Disputed);
    }

    #[test]
    fn test_dispute_requires_reason() {
        let (mut s, initiator, _) = shipped_swap();
        let err = s.open_dispute(&initiator, "  ").unwrap_err();
        assert!(matches!(err, TradeError::Validation(_)));
        assert_eq!(s.status, SwapStatus::Shipping);
    }

    #[test]
    fn test_dispute_before_shipping_is_invalid() {
        let (mut s, initiator, _) = swap();
        let err = s.open_dispute(&initiator, "changed my mind").unwrap_err();
        assert!(matches!(err, TradeError::InvalidTransition { .. }));
    }

    #[test]
    fn test_resolution_recorded_once() {
        let (mut s, initiator, _) = shipped_swap();
        s.open_dispute(&initiator, "box arrived empty").unwrap();
        s.resolve_dispute(DisputeOutcome::ReturnToSenders, "carrier confirmed damage")
            .unwrap();
        assert_eq!(s.status, SwapStatus::Disputed);
        assert!(s.dispute.as_ref().unwrap().resolution.is_some());

        let err = s
            .resolve_dispute(DisputeOutcome::CompletedAsAgreed, "second thoughts")
            .unwrap_err();
        assert!(matches!(err, TradeError::Validation(_)));
    }

    // ── audit log ────────────────────────────────────────────────────

    #[test]
    fn test_transition_log_records_the_full_path() {
        let (mut s, initiator, recipient) = shipped_swap();
        s.confirm_receipt(&initiator).unwrap();
        s.confirm_receipt(&recipient).unwrap();

        let path: Vec<SwapStatus> = s.transitions.iter().map(|t| t.to_status).collect();
        assert_eq!(
            path,
            vec![
                SwapStatus::Accepted,
                SwapStatus::Locked,
                SwapStatus::Shipping,
                SwapStatus::Completed,
            ]
        );
        assert_eq!(s.transitions[0].from_status, SwapStatus::Proposed);
    }
}
