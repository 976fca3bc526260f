//! # Fairness Comparator
//!
//! Scores two valued bundles against each other: a 0–100 balance score,
//! a status band, and an explanation of the imbalance written for the
//! negotiating user.
//!
//! ## Guarantees
//!
//! - The score is symmetric under argument order: `compare(a, b).score ==
//!   compare(b, a).score`.
//! - The assessment text is deliberately *not* symmetric — it names which
//!   specific side is over-offering, since that is the information a
//!   negotiating user needs.
//! - A balanced trade gets no suggestions. Remediation text appears only
//!   below the `Good` band, to avoid noise on trades that are already fine.

use serde::{Deserialize, Serialize};

use scentswap_core::Money;

use crate::valuation::ValuedItem;

// ─── Status Bands ────────────────────────────────────────────────────

/// The fairness band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FairnessStatus {
    /// Score ≥ 95.
    Excellent,
    /// Score ≥ 85.
    Good,
    /// Score ≥ 70.
    Acceptable,
    /// Score ≥ 50.
    Imbalanced,
    /// Score < 50.
    Unfair,
}

impl FairnessStatus {
    /// Map a 0–100 score to its band.
    pub fn from_score(score: u8) -> Self {
        match score {
            95..=100 => Self::Excellent,
            85..=94 => Self::Good,
            70..=84 => Self::Acceptable,
            50..=69 => Self::Imbalanced,
            _ => Self::Unfair,
        }
    }

    /// Whether remediation suggestions should be generated for this band.
    pub fn wants_suggestions(&self) -> bool {
        matches!(self, Self::Acceptable | Self::Imbalanced | Self::Unfair)
    }
}

impl std::fmt::Display for FairnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Acceptable => "ACCEPTABLE",
            Self::Imbalanced => "IMBALANCED",
            Self::Unfair => "UNFAIR",
        };
        f.write_str(s)
    }
}

// ─── Result ──────────────────────────────────────────────────────────

/// The outcome of comparing two bundles.
///
/// Recomputable at any time from the current bundles; a swap freezes one
/// of these at proposal time as its negotiation baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessResult {
    /// Balance score, 0–100; 100 means equal value.
    pub score: u8,
    /// The band the score falls into.
    pub status: FairnessStatus,
    /// Total adjusted value of the initiator's bundle.
    pub initiator_total: Money,
    /// Total adjusted value of the recipient's bundle.
    pub recipient_total: Money,
    /// Absolute difference between the totals.
    pub difference: Money,
    /// Human-readable description naming the over-offering side.
    pub assessment: String,
    /// Remediation suggestions; empty at `Good` and above.
    pub suggestions: Vec<String>,
}

// ─── Comparison ──────────────────────────────────────────────────────

/// Compare two valued bundles.
///
/// Two zero-value bundles score 100 — degenerate but valid (two empty
/// decants is a balanced trade).
pub fn compare(initiator_items: &[ValuedItem], recipient_items: &[ValuedItem]) -> FairnessResult {
    let initiator_total: Money = initiator_items.iter().map(|v| v.adjusted_value).sum();
    let recipient_total: Money = recipient_items.iter().map(|v| v.adjusted_value).sum();
    let difference = initiator_total.abs_diff(recipient_total);

    let score = balance_score(initiator_total, recipient_total);
    let status = FairnessStatus::from_score(score);

    let (assessment, suggestions) =
        narrate(status, initiator_total, recipient_total, difference);

    FairnessResult {
        score,
        status,
        initiator_total,
        recipient_total,
        difference,
        assessment,
        suggestions,
    }
}

/// `round_half_up((min / max) × 100)`, with 100 for two zero totals.
fn balance_score(a: Money, b: Money) -> u8 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if high.is_zero() {
        return 100;
    }
    let ratio = low.cents() as f64 / high.cents() as f64;
    (ratio * 100.0 + 0.5).floor() as u8
}

fn narrate(
    status: FairnessStatus,
    initiator_total: Money,
    recipient_total: Money,
    difference: Money,
) -> (String, Vec<String>) {
    if difference.is_zero() {
        let assessment = format!(
            "Both bundles are valued at {initiator_total} — an evenly balanced trade."
        );
        return (assessment, Vec::new());
    }

    // The side names are fixed to the caller's argument order; swapping the
    // arguments must swap the narrative direction.
    let (over, over_total, under, under_total) = if initiator_total > recipient_total {
        ("initiator", initiator_total, "recipient", recipient_total)
    } else {
        ("recipient", recipient_total, "initiator", initiator_total)
    };

    let assessment = format!(
        "The {over}'s bundle ({over_total} against {under_total}) is \
         over-offering by {difference}; the {under} side is under-offering."
    );

    let suggestions = if status.wants_suggestions() {
        vec![
            format!(
                "Add an item worth about {difference} to the {under}'s bundle to balance the trade."
            ),
            format!(
                "Or remove roughly {difference} of value from the {over}'s bundle."
            ),
        ]
    } else {
        Vec::new()
    };

    (assessment, suggestions)
}
