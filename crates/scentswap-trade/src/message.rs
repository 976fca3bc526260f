//! # In-Swap Messages
//!
//! The message log is append-only and survives everything, including
//! screening: a blocked message is stored flagged, never discarded, so the
//! full conversation is available to dispute review. Mediator messages are
//! tagged as such rather than impersonating a participant.

use serde::{Deserialize, Serialize};

use scentswap_core::{MessageId, Timestamp, UserId};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageSender {
    /// One of the two swap participants.
    Participant {
        /// The participant.
        user_id: UserId,
    },
    /// Platform mediation (dispute handling, moderation notices).
    Mediator,
}

/// One entry in a swap's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who sent it.
    pub sender: MessageSender,
    /// The message text, stored verbatim even when flagged.
    pub body: String,
    /// When it was appended.
    pub sent_at: Timestamp,
    /// Whether screening found a blocking category.
    pub flagged: bool,
    /// Screening warnings, blocking or not.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serialization_shapes() {
        let participant = MessageSender::Participant {
            user_id: UserId::new(),
        };
        let json = serde_json::to_value(&participant).unwrap();
        assert_eq!(json["kind"], "participant");

        let mediator = serde_json::to_value(&MessageSender::Mediator).unwrap();
        assert_eq!(mediator["kind"], "mediator");
    }
}
