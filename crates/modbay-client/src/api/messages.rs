//! Messages API.

use crate::client::ModbayClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{MessageContent, MessageReply};

/// Messages API client.
pub struct MessagesApi {
    client: ModbayClient,
}

impl MessagesApi {
    pub(crate) fn new(client: ModbayClient) -> Self {
        Self { client }
    }

    /// List unread replies in a conversation.
    ///
    /// The server may send `null` data for a conversation with nothing
    /// unread; that parses as an empty sequence. Replies arrive
    /// newest-first.
    pub async fn unread_replies(&self, conversation_id: u64) -> Result<Envelope<Vec<MessageReply>>> {
        self.client
            .get_or_default(&format!("conversations/{}/replies", conversation_id))
            .await
    }

    /// Send a reply into a conversation.
    pub async fn reply(
        &self,
        conversation_id: u64,
        content: &MessageContent,
    ) -> Result<Envelope<()>> {
        self.client
            .post_or_default(&format!("conversations/{}/replies", conversation_id), content)
            .await
    }
}
