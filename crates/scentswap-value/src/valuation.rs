//! # Valuation Calculator
//!
//! Converts a physical-item description into a monetary estimate:
//! a per-ml base rate from the brand tier table, times the bottle size,
//! times a chain of multiplicative factors (fill level, condition, storage,
//! packaging, and optional market signals), rounded half-up to cents once
//! at the end.
//!
//! The result carries the full factor map. Callers — the negotiation UI,
//! dispute review — must be able to show *why* a number was produced, not
//! just the number.
//!
//! ## Determinism
//!
//! `valuate` is a pure function: the same item and configuration produce a
//! bit-identical [`ValuedItem`] on every call. There is no I/O, no clock,
//! and no shared state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scentswap_core::{Item, Money};

use crate::config::{BrandTier, ValuationConfig};

// Factor-map keys, stable across releases: dispute review stores these
// strings alongside the numbers.
pub const FACTOR_FILL: &str = "fill_level";
pub const FACTOR_CONDITION: &str = "condition";
pub const FACTOR_STORAGE: &str = "storage";
pub const FACTOR_PACKAGING: &str = "packaging";
pub const FACTOR_RARITY: &str = "rarity";
pub const FACTOR_DEMAND: &str = "demand";
pub const FACTOR_AUTHENTICITY: &str = "authenticity";

/// Direct-multiplier signals are clamped to this range before use.
const SIGNAL_CLAMP: (f64, f64) = (0.5, 3.0);

// ─── Market Signal ───────────────────────────────────────────────────

/// Optional market inputs to a valuation.
///
/// All fields default to "no adjustment". The authenticity confidence comes
/// from the external photo classifier; a missing or failed classifier
/// result contributes factor 1.00 and never blocks valuation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSignal {
    /// Rarity multiplier (e.g., discontinued batch). Clamped to [0.5, 3.0].
    pub rarity: Option<f64>,
    /// Demand multiplier from market activity. Clamped to [0.5, 3.0].
    pub demand: Option<f64>,
    /// Classifier confidence in [0, 1] that the bottle is authentic.
    pub authenticity_confidence: Option<f64>,
}

impl MarketSignal {
    fn rarity_factor(&self) -> f64 {
        clamp_signal(self.rarity)
    }

    fn demand_factor(&self) -> f64 {
        clamp_signal(self.demand)
    }

    /// Map classifier confidence to a trust factor in [0.85, 1.0].
    ///
    /// Low confidence discounts the estimate; it never blocks it. Absent
    /// confidence means no adjustment.
    fn trust_factor(&self) -> f64 {
        match self.authenticity_confidence {
            Some(confidence) => 0.85 + 0.15 * confidence.clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

fn clamp_signal(signal: Option<f64>) -> f64 {
    match signal {
        Some(value) if value.is_finite() => value.clamp(SIGNAL_CLAMP.0, SIGNAL_CLAMP.1),
        _ => 1.0,
    }
}

// ─── Valued Item ─────────────────────────────────────────────────────

/// An item together with its monetary estimate and the factors behind it.
///
/// Immutable once computed: when the source item changes, a fresh valuation
/// must be recomputed, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedItem {
    /// The item that was valued.
    pub item: Item,
    /// The tier the brand resolved to.
    pub tier: BrandTier,
    /// Per-ml rate × size, before factors.
    pub base_value: Money,
    /// Base value × all factors, rounded half-up to cents.
    pub adjusted_value: Money,
    /// Every applied factor by name, including the defaulted ones.
    pub factors: BTreeMap<String, f64>,
}

// ─── Valuation ───────────────────────────────────────────────────────

/// Value an item with no market signal.
pub fn valuate(item: &Item, config: &ValuationConfig) -> ValuedItem {
    valuate_with_signal(item, &MarketSignal::default(), config)
}

/// Value an item with an optional market signal.
///
/// A zero fill yields an adjusted value of $0.00, which is valid — an empty
/// collectible bottle — and not an error.
pub fn valuate_with_signal(
    item: &Item,
    signal: &MarketSignal,
    config: &ValuationConfig,
) -> ValuedItem {
    let tier = config.tier_for_brand(&item.brand_name);
    let rate = config.tier_rates.rate(tier);
    let base_value = Money::from_cents(rate.cents() * i64::from(item.size_ml));

    let fill = f64::from(item.fill_percentage) / 100.0;
    let condition = config.condition.factor(item.condition);
    let storage = config.storage.factor(item.storage_history);
    let packaging = config
        .packaging
        .factor(item.has_box, item.has_original_cap);
    let rarity = signal.rarity_factor();
    let demand = signal.demand_factor();
    let authenticity = signal.trust_factor();

    let mut factors = BTreeMap::new();
    factors.insert(FACTOR_FILL.to_string(), fill);
    factors.insert(FACTOR_CONDITION.to_string(), condition);
    factors.insert(FACTOR_STORAGE.to_string(), storage);
    factors.insert(FACTOR_PACKAGING.to_string(), packaging);
    factors.insert(FACTOR_RARITY.to_string(), rarity);
    factors.insert(FACTOR_DEMAND.to_string(), demand);
    factors.insert(FACTOR_AUTHENTICITY.to_string(), authenticity);

    let product = fill * condition * storage * packaging * rarity * demand * authenticity;
    let adjusted_value = base_value.scale(product);

    ValuedItem {
        item: item.clone(),
        tier,
        base_value,
        adjusted_value,
        factors,
    }
}
