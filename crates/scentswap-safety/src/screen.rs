//! # Message Screening Engine
//!
//! Three pattern classes over lowercased message text: banking details and
//! cash-equivalent instruments block; off-platform contact only warns.
//! `BankDetails` takes precedence over `SuspiciousPayment` when both match.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Categories ──────────────────────────────────────────────────────

/// The policy category a blocked message falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockedCategory {
    /// Bank account numbers or explicit banking keywords.
    BankDetails,
    /// Cash-equivalent instruments: money orders, gift cards, crypto,
    /// payment apps.
    SuspiciousPayment,
    /// Off-platform contact suggestion. Never blocking on its own.
    OffPlatformRedirect,
}

impl std::fmt::Display for BlockedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BankDetails => "BANK_DETAILS",
            Self::SuspiciousPayment => "SUSPICIOUS_PAYMENT",
            Self::OffPlatformRedirect => "OFF_PLATFORM_REDIRECT",
        };
        f.write_str(s)
    }
}

// ─── Result ──────────────────────────────────────────────────────────

/// The outcome of screening one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Whether the message passed without a blocking category.
    pub is_safe: bool,
    /// One entry per pattern class that matched, blocking or not.
    pub warnings: Vec<String>,
    /// The blocking category, if any. Off-platform redirection appears in
    /// `warnings` but never here.
    pub blocked_category: Option<BlockedCategory>,
}

// ─── Configuration ───────────────────────────────────────────────────

/// Injected keyword tables for the screening engine.
///
/// Keywords are matched case-insensitively as substrings of the message.
/// Structural patterns (digit runs, IBAN, e-mail, phone) are fixed — they
/// describe shapes, not vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Banking vocabulary → `BankDetails`.
    pub banking_keywords: Vec<String>,
    /// Cash-equivalent vocabulary → `SuspiciousPayment`.
    pub payment_keywords: Vec<String>,
    /// Off-platform contact vocabulary → warning.
    pub contact_keywords: Vec<String>,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            banking_keywords: to_strings(&[
                "account number",
                "routing number",
                "sort code",
                "iban",
                "swift code",
                "bank transfer",
                "wire transfer",
            ]),
            payment_keywords: to_strings(&[
                "money order",
                "gift card",
                "bitcoin",
                "btc",
                "ethereum",
                "crypto",
                "cryptocurrency",
                "western union",
                "moneygram",
                "venmo",
                "cash app",
                "cashapp",
                "zelle",
                "paypal",
            ]),
            contact_keywords: to_strings(&[
                "whatsapp",
                "telegram",
                "instagram",
                "snapchat",
                "text me",
                "call me",
                "dm me",
                "email me",
                "off the app",
                "off platform",
            ]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Error constructing a screening engine.
#[derive(Error, Debug)]
pub enum ScreeningError {
    /// A structural pattern failed to compile.
    #[error("invalid screening pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A message screening engine with compiled structural patterns.
#[derive(Debug)]
pub struct ScreeningEngine {
    config: ScreeningConfig,
    account_digits: Regex,
    iban_shape: Regex,
    email_shape: Regex,
    phone_shape: Regex,
}

impl ScreeningEngine {
    /// Compile the structural patterns over the given keyword tables.
    pub fn new(config: ScreeningConfig) -> Result<Self, ScreeningError> {
        Ok(Self {
            config,
            // Eight or more consecutive digits: too long for a zip code or
            // a bottle size, the right length for an account number.
            account_digits: Regex::new(r"\d{8,}")?,
            iban_shape: Regex::new(r"\b[a-z]{2}\d{2}[a-z0-9]{10,30}\b")?,
            email_shape: Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}")?,
            // Seven-plus digits with optional separators, led by an
            // optional country code.
            phone_shape: Regex::new(r"\+?\d[\d\s().-]{6,}\d")?,
        })
    }

    /// Screen one message.
    pub fn screen(&self, message: &str) -> ScreenResult {
        let text = message.to_lowercase();

        let mut warnings = Vec::new();
        let mut blocked_category = None;

        let banking = self.matches_keywords(&text, &self.config.banking_keywords)
            || self.account_digits.is_match(&text)
            || self.iban_shape.is_match(&text);
        if banking {
            warnings.push(
                "message appears to contain bank account details, which are not \
                 allowed in swap messages"
                    .to_string(),
            );
            blocked_category = Some(BlockedCategory::BankDetails);
        }

        let payment = self.matches_keywords(&text, &self.config.payment_keywords);
        if payment {
            warnings.push(
                "message suggests a cash-equivalent payment; swaps on this \
                 platform settle in goods only"
                    .to_string(),
            );
            // Bank details take precedence when both classes match.
            blocked_category.get_or_insert(BlockedCategory::SuspiciousPayment);
        }

        let contact = self.matches_keywords(&text, &self.config.contact_keywords)
            || self.email_shape.is_match(&text)
            || self.phone_shape.is_match(&text);
        if contact && !banking {
            warnings.push(
                "message suggests moving the conversation off-platform; trades \
                 arranged outside the app are not protected"
                    .to_string(),
            );
        }

        ScreenResult {
            is_safe: blocked_category.is_none(),
            warnings,
            blocked_category,
        }
    }

    fn matches_keywords(&self, text: &str, keywords: &[String]) -> bool {
        keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|k| text.contains(&k.to_lowercase()))
    }
}
