//! Updates API.

use crate::client::ModbayClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::Update;

/// Query parameters for listing updates.
#[derive(Debug, Default, serde::Serialize)]
pub struct ListUpdatesQuery {
    /// Page of the feed to fetch. The feed is newest-first and the first
    /// page is 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Updates API client.
pub struct UpdatesApi {
    client: ModbayClient,
}

impl UpdatesApi {
    pub(crate) fn new(client: ModbayClient) -> Self {
        Self { client }
    }

    /// List the first page of a resource's update feed.
    pub async fn list(&self, resource_id: u64) -> Result<Envelope<Vec<Update>>> {
        self.list_with_query(resource_id, ListUpdatesQuery::default())
            .await
    }

    /// List a resource's update feed with query parameters.
    pub async fn list_with_query(
        &self,
        resource_id: u64,
        query: ListUpdatesQuery,
    ) -> Result<Envelope<Vec<Update>>> {
        self.client
            .get_with_query_or_default(&format!("resources/{}/updates", resource_id), &query)
            .await
    }

    /// List one page of a resource's update feed.
    pub async fn page(&self, resource_id: u64, page: u32) -> Result<Envelope<Vec<Update>>> {
        self.list_with_query(resource_id, ListUpdatesQuery { page: Some(page) })
            .await
    }
}
