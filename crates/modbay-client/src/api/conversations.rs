//! Conversations API.

use crate::client::ModbayClient;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::types::{ConversationContent, ConversationSummary};

/// Conversations API client.
pub struct ConversationsApi {
    client: ModbayClient,
}

impl ConversationsApi {
    pub(crate) fn new(client: ModbayClient) -> Self {
        Self { client }
    }

    /// List the member's unread conversations.
    ///
    /// An empty sequence is a valid success (nothing unread), not an error.
    pub async fn unread(&self) -> Result<Envelope<Vec<ConversationSummary>>> {
        self.client.get_or_default("conversations").await
    }

    /// Start a new conversation, returning its ID on success.
    ///
    /// The recipient list must be non-empty; an empty list is rejected
    /// before any request is sent. The returned ID is only meaningful on a
    /// success envelope — branch on the envelope, not on the ID value.
    pub async fn start(&self, content: &ConversationContent) -> Result<Envelope<u64>> {
        if content.recipient_ids.is_empty() {
            return Err(Error::InvalidRequest(
                "conversation requires at least one recipient".to_string(),
            ));
        }
        self.client.post("conversations", content).await
    }
}
