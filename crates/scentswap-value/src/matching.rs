//! # Match Suggestion Engine
//!
//! Ranks candidate listings against a user's holdings and wish signals.
//! Scoring is additive over a small set of rules, each of which contributes
//! a human-readable reason string when it fires, so the UI can say *why* a
//! listing was suggested rather than presenting an opaque ranking.
//!
//! ## Guarantees
//!
//! Suggestion generation is read-only: it never mutates candidate or
//! requester state, and is safely cacheable per
//! ([`bundle_fingerprint`] of the holdings, pool snapshot).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use scentswap_core::{Item, Listing, ListingId, Money, UserId};

use crate::config::ValuationConfig;
use crate::valuation::valuate;

// ─── Configuration ───────────────────────────────────────────────────

/// Tunable parameters for the suggestion scorer.
///
/// The floor keeps the list high-signal: a candidate that matches nothing
/// scores the bare baseline and is discarded. These are design parameters,
/// not hard law — deployments tune them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Score every candidate starts with.
    pub baseline: i32,
    /// Bonus when a wish signal matches the listing title or brand.
    pub wish_bonus: i32,
    /// Bonus when the candidate's value sits near the requester's average
    /// holding value.
    pub value_affinity_bonus: i32,
    /// Candidates below this score are discarded.
    pub floor: i32,
    /// Maximum number of suggestions returned.
    pub max_suggestions: usize,
    /// Half-width of the value-affinity window, as a fraction of the
    /// requester's average holding value.
    pub value_window: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            baseline: 50,
            wish_bonus: 30,
            value_affinity_bonus: 15,
            floor: 60,
            max_suggestions: 10,
            value_window: 0.30,
        }
    }
}

// ─── Suggestion ──────────────────────────────────────────────────────

/// One ranked trade suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// The suggested listing.
    pub listing_id: ListingId,
    /// Who owns it.
    pub owner_id: UserId,
    /// Listing title, for display.
    pub title: String,
    /// Combined desirability score.
    pub score: i32,
    /// The candidate item's estimated value.
    pub estimated_value: Money,
    /// Which rules fired, in firing order.
    pub reasons: Vec<String>,
}

// ─── Suggestion Generation ───────────────────────────────────────────

/// Rank the pool's available listings for a requester.
///
/// Listings owned by the requester and listings that are not `Active` are
/// skipped. With no holdings there is no average value, so the
/// value-affinity rule never fires; wish matches can still surface
/// candidates.
pub fn suggest(
    requester: &UserId,
    holdings: &[Item],
    pool: &[Listing],
    wish_signals: &[String],
    valuation: &ValuationConfig,
    config: &MatchConfig,
) -> Vec<MatchSuggestion> {
    let average_holding = average_value(holdings, valuation);

    let mut suggestions: Vec<MatchSuggestion> = pool
        .iter()
        .filter(|listing| listing.owner_id != *requester)
        .filter(|listing| listing.status.is_available())
        .filter_map(|listing| score_candidate(listing, wish_signals, average_holding, valuation, config))
        .collect();

    // Deterministic order: score first, title as the tie-break so equal
    // scores don't reshuffle between calls.
    suggestions.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.listing_id.as_uuid().cmp(b.listing_id.as_uuid()))
    });
    suggestions.truncate(config.max_suggestions);
    suggestions
}

fn score_candidate(
    listing: &Listing,
    wish_signals: &[String],
    average_holding: Option<Money>,
    valuation: &ValuationConfig,
    config: &MatchConfig,
) -> Option<MatchSuggestion> {
    let valued = valuate(&listing.item, valuation);
    let mut score = config.baseline;
    let mut reasons = Vec::new();

    if let Some(wish) = matching_wish(listing, wish_signals) {
        score += config.wish_bonus;
        reasons.push(format!("matches your wish for \"{wish}\""));
    }

    if let Some(average) = average_holding {
        let window = (average.cents() as f64 * config.value_window).abs() as i64;
        if valued.adjusted_value.abs_diff(average).cents() <= window {
            score += config.value_affinity_bonus;
            reasons.push(format!(
                "estimated value {} is close to your average holding value {}",
                valued.adjusted_value, average
            ));
        }
    }

    if score < config.floor {
        return None;
    }

    Some(MatchSuggestion {
        listing_id: listing.id,
        owner_id: listing.owner_id,
        title: listing.title.clone(),
        score,
        estimated_value: valued.adjusted_value,
        reasons,
    })
}

/// The first wish signal that substring-matches the listing title or the
/// item brand, case-insensitively. Blank signals never match.
fn matching_wish<'a>(listing: &Listing, wish_signals: &'a [String]) -> Option<&'a str> {
    let title = listing.title.to_lowercase();
    let brand = listing.item.brand_name.to_lowercase();
    wish_signals
        .iter()
        .map(|wish| wish.trim())
        .filter(|wish| !wish.is_empty())
        .find(|wish| {
            let needle = wish.to_lowercase();
            title.contains(&needle) || brand.contains(&needle)
        })
}

/// Mean adjusted value of the requester's holdings, if any.
fn average_value(holdings: &[Item], valuation: &ValuationConfig) -> Option<Money> {
    if holdings.is_empty() {
        return None;
    }
    let total: Money = holdings
        .iter()
        .map(|item| valuate(item, valuation).adjusted_value)
        .sum();
    Some(Money::from_cents(total.cents() / holdings.len() as i64))
}

// ─── Cache Key ───────────────────────────────────────────────────────

/// A SHA-256 hex fingerprint over the holding set, order-independent.
///
/// Together with a pool snapshot identifier this keys a suggestion cache:
/// same holdings + same pool → same suggestions.
pub fn bundle_fingerprint(items: &[Item]) -> String {
    let mut ids: Vec<String> = items
        .iter()
        .map(|item| item.id.as_uuid().to_string())
        .collect();
    ids.sort();

    let mut hasher = Sha256::new();
    for id in &ids {
        hasher.update(id.as_bytes());
        hasher.update(b"\n");
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scentswap_core::{Condition, ListingStatus};

    fn cfg() -> (ValuationConfig, MatchConfig) {
        (ValuationConfig::default(), MatchConfig::default())
    }

    fn listing(owner: UserId, title: &str, brand: &str, size: u32, fill: u8) -> Listing {
        let item = Item::new(brand, size, fill, Condition::Good).unwrap();
        Listing::new(owner, title, item)
    }

    // Holdings averaging $212.50: Chanel 100ml full Good = 250×0.85.
    fn holdings() -> Vec<Item> {
        vec![Item::new("Chanel", 100, 100, Condition::Good).unwrap()]
    }

    // ---- rule firing ----

    #[test]
    fn test_wish_match_on_brand() {
        let (vcfg, mcfg) = cfg();
        let requester = UserId::new();
        let pool = vec![listing(UserId::new(), "Santal 33", "Le Labo", 50, 100)];

        let out = suggest(
            &requester,
            &[],
            &pool,
            &["le labo".to_string()],
            &vcfg,
            &mcfg,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 80);
        assert!(out[0].reasons[0].contains("le labo"));
    }

    #[test]
    fn test_wish_match_on_title_case_insensitive() {
        let (vcfg, mcfg) = cfg();
        let pool = vec![listing(UserId::new(), "Vintage TOBACCO Vanille", "Tom Ford", 50, 90)];

        let out = suggest(
            &UserId::new(),
            &[],
            &pool,
            &["Tobacco".to_string()],
            &vcfg,
            &mcfg,
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_value_affinity_fires_within_window() {
        let (vcfg, mcfg) = cfg();
        // Holding average $212.50; candidate Dior 100ml full Good = $212.50.
        let pool = vec![listing(UserId::new(), "Sauvage", "Dior", 100, 100)];

        let out = suggest(&UserId::new(), &holdings(), &pool, &[], &vcfg, &mcfg);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 65);
        assert!(out[0].reasons[0].contains("average holding value"));
    }

    #[test]
    fn test_value_affinity_skipped_outside_window() {
        let (vcfg, mcfg) = cfg();
        // Candidate Creed 250ml full New = $1500, far above the $212.50 average.
        let pool = vec![listing(UserId::new(), "Aventus", "Creed", 250, 100)];

        let out = suggest(&UserId::new(), &holdings(), &pool, &[], &vcfg, &mcfg);
        assert!(out.is_empty());
    }

    // ---- filtering ----

    #[test]
    fn test_baseline_alone_is_below_floor() {
        let (vcfg, mcfg) = cfg();
        let pool = vec![listing(UserId::new(), "Random Scent", "Nobody", 50, 50)];

        let out = suggest(&UserId::new(), &[], &pool, &[], &vcfg, &mcfg);
        assert!(out.is_empty());
    }

    #[test]
    fn test_own_listings_are_skipped() {
        let (vcfg, mcfg) = cfg();
        let requester = UserId::new();
        let pool = vec![listing(requester, "Santal 33", "Le Labo", 50, 100)];

        let out = suggest(
            &requester,
            &[],
            &pool,
            &["le labo".to_string()],
            &vcfg,
            &mcfg,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_unavailable_listings_are_skipped() {
        let (vcfg, mcfg) = cfg();
        let mut reserved = listing(UserId::new(), "Santal 33", "Le Labo", 50, 100);
        reserved.status = ListingStatus::Reserved;

        let out = suggest(
            &UserId::new(),
            &[],
            &[reserved],
            &["le labo".to_string()],
            &vcfg,
            &mcfg,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_blank_wish_never_matches() {
        let (vcfg, mcfg) = cfg();
        let pool = vec![listing(UserId::new(), "Santal 33", "Le Labo", 50, 100)];

        let out = suggest(&UserId::new(), &[], &pool, &["  ".to_string()], &vcfg, &mcfg);
        assert!(out.is_empty());
    }

    // ---- ordering and capping ----

    #[test]
    fn test_sorted_by_score_then_capped() {
        let (vcfg, mcfg) = cfg();
        let other = UserId::new();
        let mut pool = Vec::new();
        // 12 wish matches; two also land the value-affinity bonus.
        for i in 0..12 {
            let size = if i < 2 { 100 } else { 30 };
            pool.push(listing(other, &format!("Sauvage batch {i:02}"), "Dior", size, 100));
        }

        let out = suggest(
            &UserId::new(),
            &holdings(),
            &pool,
            &["sauvage".to_string()],
            &vcfg,
            &mcfg,
        );
        assert_eq!(out.len(), 10);
        assert_eq!(out[0].score, 95);
        assert_eq!(out[1].score, 95);
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_does_not_mutate_inputs() {
        let (vcfg, mcfg) = cfg();
        let pool = vec![listing(UserId::new(), "Santal 33", "Le Labo", 50, 100)];
        let before = pool.clone();
        let _ = suggest(
            &UserId::new(),
            &[],
            &pool,
            &["le labo".to_string()],
            &vcfg,
            &mcfg,
        );
        assert_eq!(pool, before);
    }

    // ---- fingerprint ----

    #[test]
    fn test_fingerprint_is_order_independent() {
        let a = Item::new("Chanel", 100, 80, Condition::Good).unwrap();
        let b = Item::new("Dior", 50, 90, Condition::New).unwrap();
        let forward = bundle_fingerprint(&[a.clone(), b.clone()]);
        let reverse = bundle_fingerprint(&[b, a]);
        assert_eq!(forward, reverse);
        assert_eq!(forward.len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_for_different_bundles() {
        let a = Item::new("Chanel", 100, 80, Condition::Good).unwrap();
        let b = Item::new("Dior", 50, 90, Condition::New).unwrap();
        assert_ne!(bundle_fingerprint(&[a]), bundle_fingerprint(&[b]));
    }
}
