//! # Valuation Configuration — Injected Rate and Multiplier Tables
//!
//! All pricing knowledge lives here as passed-in data: brand tier rates,
//! the brand → tier map, and the condition/storage/packaging multiplier
//! tables. The valuation engine itself contains no pricing literals, so the
//! tables can be updated, audited, and tested without touching the
//! calculation logic.
//!
//! The `Default` implementation carries the documented placeholder table.
//! These rates are operator configuration, not settled business logic —
//! deployments load their own tables from YAML through the CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scentswap_core::{Condition, Money, StorageHistory};

// ─── Brand Tier ──────────────────────────────────────────────────────

/// The pricing tier a brand belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BrandTier {
    /// Mass-market and celebrity lines.
    Budget,
    /// Department-store designer houses.
    Designer,
    /// Independent niche houses.
    Niche,
    /// High-luxury and exclusive lines.
    Luxury,
}

impl std::fmt::Display for BrandTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Budget => "BUDGET",
            Self::Designer => "DESIGNER",
            Self::Niche => "NICHE",
            Self::Luxury => "LUXURY",
        };
        f.write_str(s)
    }
}

// ─── Rate Table ──────────────────────────────────────────────────────

/// Per-millilitre base rates for each brand tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRates {
    /// Rate for [`BrandTier::Budget`].
    pub budget: Money,
    /// Rate for [`BrandTier::Designer`].
    pub designer: Money,
    /// Rate for [`BrandTier::Niche`].
    pub niche: Money,
    /// Rate for [`BrandTier::Luxury`].
    pub luxury: Money,
}

impl TierRates {
    /// The per-ml rate for a tier.
    pub fn rate(&self, tier: BrandTier) -> Money {
        match tier {
            BrandTier::Budget => self.budget,
            BrandTier::Designer => self.designer,
            BrandTier::Niche => self.niche,
            BrandTier::Luxury => self.luxury,
        }
    }
}

impl Default for TierRates {
    fn default() -> Self {
        Self {
            budget: Money::from_cents(80),
            designer: Money::from_cents(250),
            niche: Money::from_cents(400),
            luxury: Money::from_cents(600),
        }
    }
}

// ─── Multiplier Tables ───────────────────────────────────────────────

/// Condition multipliers applied to the base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionMultipliers {
    /// Multiplier for [`Condition::New`].
    pub new: f64,
    /// Multiplier for [`Condition::LikeNew`].
    pub like_new: f64,
    /// Multiplier for [`Condition::Good`].
    pub good: f64,
    /// Multiplier for [`Condition::Fair`].
    pub fair: f64,
}

impl ConditionMultipliers {
    /// The multiplier for a condition.
    pub fn factor(&self, condition: Condition) -> f64 {
        match condition {
            Condition::New => self.new,
            Condition::LikeNew => self.like_new,
            Condition::Good => self.good,
            Condition::Fair => self.fair,
        }
    }
}

impl Default for ConditionMultipliers {
    fn default() -> Self {
        Self {
            new: 1.00,
            like_new: 0.95,
            good: 0.85,
            fair: 0.70,
        }
    }
}

/// Storage-provenance multipliers.
///
/// Heat and light degrade concentrate; a travelled bottle is worth less
/// than one kept in a drawer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageMultipliers {
    /// Multiplier for [`StorageHistory::CoolDark`].
    pub cool_dark: f64,
    /// Multiplier for [`StorageHistory::Shelf`].
    pub shelf: f64,
    /// Multiplier for [`StorageHistory::HeavyUse`].
    pub heavy_use: f64,
}

impl StorageMultipliers {
    /// The multiplier for a storage history.
    pub fn factor(&self, storage: StorageHistory) -> f64 {
        match storage {
            StorageHistory::CoolDark => self.cool_dark,
            StorageHistory::Shelf => self.shelf,
            StorageHistory::HeavyUse => self.heavy_use,
        }
    }
}

impl Default for StorageMultipliers {
    fn default() -> Self {
        Self {
            cool_dark: 1.00,
            shelf: 0.97,
            heavy_use: 0.90,
        }
    }
}

/// Packaging-completeness multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackagingMultipliers {
    /// Original box and cap both present.
    pub full_presentation: f64,
    /// Box present, cap missing.
    pub box_only: f64,
    /// Cap present, box missing.
    pub cap_only: f64,
    /// Neither present.
    pub incomplete: f64,
}

impl PackagingMultipliers {
    /// The multiplier for a packaging combination.
    pub fn factor(&self, has_box: bool, has_original_cap: bool) -> f64 {
        match (has_box, has_original_cap) {
            (true, true) => self.full_presentation,
            (true, false) => self.box_only,
            (false, true) => self.cap_only,
            (false, false) => self.incomplete,
        }
    }
}

impl Default for PackagingMultipliers {
    fn default() -> Self {
        Self {
            full_presentation: 1.05,
            box_only: 1.03,
            cap_only: 1.02,
            incomplete: 1.00,
        }
    }
}

// ─── Valuation Config ────────────────────────────────────────────────

/// The complete injected configuration for the valuation engine.
///
/// Unknown brands resolve to `fallback_tier` — never to zero and never to
/// an error, since an unrecognized brand is a normal user-entry case, not
/// a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Per-ml rates by tier.
    pub tier_rates: TierRates,
    /// Lowercased brand name → tier.
    pub brand_tiers: BTreeMap<String, BrandTier>,
    /// Tier assumed for brands absent from the map.
    pub fallback_tier: BrandTier,
    /// Condition multiplier table.
    pub condition: ConditionMultipliers,
    /// Storage multiplier table.
    pub storage: StorageMultipliers,
    /// Packaging multiplier table.
    pub packaging: PackagingMultipliers,
}

impl ValuationConfig {
    /// Resolve the tier for a brand name (case-insensitive, trimmed).
    pub fn tier_for_brand(&self, brand: &str) -> BrandTier {
        self.brand_tiers
            .get(&brand.trim().to_lowercase())
            .copied()
            .unwrap_or(self.fallback_tier)
    }

    /// The per-ml rate for a brand name.
    pub fn rate_for_brand(&self, brand: &str) -> Money {
        self.tier_rates.rate(self.tier_for_brand(brand))
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        let mut brand_tiers = BTreeMap::new();
        for brand in ["zara", "axe", "adidas", "avon"] {
            brand_tiers.insert(brand.to_string(), BrandTier::Budget);
        }
        for brand in [
            "chanel",
            "dior",
            "versace",
            "armani",
            "yves saint laurent",
            "givenchy",
            "gucci",
            "burberry",
            "prada",
            "lancome",
        ] {
            brand_tiers.insert(brand.to_string(), BrandTier::Designer);
        }
        for brand in [
            "le labo",
            "byredo",
            "diptyque",
            "serge lutens",
            "penhaligon's",
            "etat libre d'orange",
        ] {
            brand_tiers.insert(brand.to_string(), BrandTier::Niche);
        }
        for brand in [
            "creed",
            "roja parfums",
            "amouage",
            "clive christian",
            "xerjoff",
        ] {
            brand_tiers.insert(brand.to_string(), BrandTier::Luxury);
        }

        Self {
            tier_rates: TierRates::default(),
            brand_tiers,
            fallback_tier: BrandTier::Designer,
            condition: ConditionMultipliers::default(),
            storage: StorageMultipliers::default(),
            packaging: PackagingMultipliers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_brand_resolves_tier() {
        let cfg = ValuationConfig::default();
        assert_eq!(cfg.tier_for_brand("Chanel"), BrandTier::Designer);
        assert_eq!(cfg.tier_for_brand("creed"), BrandTier::Luxury);
        assert_eq!(cfg.tier_for_brand("  Le Labo "), BrandTier::Niche);
    }

    #[test]
    fn test_unknown_brand_falls_back_to_designer() {
        let cfg = ValuationConfig::default();
        assert_eq!(cfg.tier_for_brand("Garage Parfumerie"), BrandTier::Designer);
        assert_eq!(cfg.rate_for_brand("Garage Parfumerie"), Money::from_cents(250));
    }

    #[test]
    fn test_default_rates() {
        let rates = TierRates::default();
        assert_eq!(rates.rate(BrandTier::Budget), Money::from_cents(80));
        assert_eq!(rates.rate(BrandTier::Designer), Money::from_cents(250));
        assert_eq!(rates.rate(BrandTier::Niche), Money::from_cents(400));
        assert_eq!(rates.rate(BrandTier::Luxury), Money::from_cents(600));
    }

    #[test]
    fn test_packaging_combinations() {
        let p = PackagingMultipliers::default();
        assert_eq!(p.factor(true, true), 1.05);
        assert_eq!(p.factor(true, false), 1.03);
        assert_eq!(p.factor(false, true), 1.02);
        assert_eq!(p.factor(false, false), 1.00);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        // Operators may override just the rate table; everything else
        // keeps its default.
        let cfg: ValuationConfig = serde_yaml::from_str(
            "tier_rates:\n  budget: 100\n  designer: 300\n  niche: 500\n  luxury: 800\n",
        )
        .unwrap();
        assert_eq!(cfg.tier_rates.designer, Money::from_cents(300));
        assert_eq!(cfg.condition, ConditionMultipliers::default());
        assert_eq!(cfg.fallback_tier, BrandTier::Designer);
    }
}
