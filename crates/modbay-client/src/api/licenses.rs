//! Licenses API.

use crate::client::ModbayClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::LicenseContent;

/// Licenses API client.
pub struct LicensesApi {
    client: ModbayClient,
}

impl LicensesApi {
    pub(crate) fn new(client: ModbayClient) -> Self {
        Self { client }
    }

    /// Fetch the calling member's license for a resource.
    ///
    /// The member is identified by the credential the client was built
    /// with; only the resource is named explicitly.
    pub async fn member(&self, resource_id: u64) -> Result<Envelope<LicenseContent>> {
        self.client
            .get(&format!("resources/{}/licenses/member", resource_id))
            .await
    }

    /// Issue a license on a resource, returning the new license ID on
    /// success.
    pub async fn issue(
        &self,
        resource_id: u64,
        license: &LicenseContent,
    ) -> Result<Envelope<u64>> {
        self.client
            .post(&format!("resources/{}/licenses", resource_id), license)
            .await
    }

    /// Modify an existing license on a resource.
    pub async fn modify(
        &self,
        resource_id: u64,
        license_id: u64,
        license: &LicenseContent,
    ) -> Result<Envelope<()>> {
        self.client
            .patch_or_default(
                &format!("resources/{}/licenses/{}", resource_id, license_id),
                license,
            )
            .await
    }
}
