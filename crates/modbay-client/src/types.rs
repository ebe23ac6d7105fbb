//! Request and response types for the Modbay API.
//!
//! These types mirror the server's API contract. Optional fields are
//! omitted from request bodies entirely when absent, never sent as `null`.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Conversations
// ─────────────────────────────────────────────────────────────────────────────

/// Summary of an unread conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation ID.
    pub conversation_id: u64,
    /// Conversation title.
    pub title: String,
    /// Number of replies in the conversation.
    pub reply_count: u32,
}

/// Request to start a new conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContent {
    /// IDs of the members to open the conversation with. Must be non-empty.
    pub recipient_ids: Vec<u64>,
    /// Conversation title.
    pub title: String,
    /// Opening message body.
    pub message: String,
}

impl ConversationContent {
    /// Create a conversation request.
    pub fn new(
        recipient_ids: impl Into<Vec<u64>>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_ids: recipient_ids.into(),
            title: title.into(),
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a reply to send into a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
    /// Message body.
    pub message: String,
}

impl MessageContent {
    /// Create a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A reply within a conversation.
///
/// The server returns replies newest-first; callers presenting a chat log
/// oldest-first should reverse the sequence themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReply {
    /// Message ID.
    pub message_id: u64,
    /// ID of the member who wrote the reply.
    pub author_id: u64,
    /// Message body.
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Licenses
// ─────────────────────────────────────────────────────────────────────────────

/// A license on a resource.
///
/// Absent optional fields are left out of the wire body entirely. The same
/// shape serves as the read payload and as the body for issuing or modifying
/// a license.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseContent {
    /// ID of the purchasing member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchaser_id: Option<u64>,
    /// Whether the license never expires.
    pub permanent: bool,
    /// Whether the license is currently active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Validity start (Unix epoch seconds). Only meaningful for
    /// non-permanent licenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<u64>,
    /// Validity end (Unix epoch seconds). Only meaningful for
    /// non-permanent licenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<u64>,
}

impl LicenseContent {
    /// A license that never expires.
    pub fn permanent() -> Self {
        Self {
            permanent: true,
            ..Self::default()
        }
    }

    /// A license valid between two instants (Unix epoch seconds).
    pub fn temporary(start_date: u64, end_date: u64) -> Self {
        Self {
            permanent: false,
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    /// Set the purchasing member.
    pub fn with_purchaser(mut self, purchaser_id: u64) -> Self {
        self.purchaser_id = Some(purchaser_id);
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Updates
// ─────────────────────────────────────────────────────────────────────────────

/// An entry in a resource's update feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    /// Update ID.
    pub update_id: u32,
    /// Update title.
    pub title: String,
    /// Update body.
    pub message: String,
    /// Publication time (Unix epoch seconds).
    pub update_date: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Health probe payload: the server's status string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthStatus(String);

impl HealthStatus {
    /// The raw status string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the server reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.0.eq_ignore_ascii_case("ok")
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
