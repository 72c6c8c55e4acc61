//! Dispatch hall listing and seizing.

use dispatch_core::DistributionId;
use dispatch_orders::dispatch::{
    HallOrder, HallOrderDetail, HallQuery, SeizeCheck, SeizeEligibility, SeizeReceipt,
    SeizeRequest,
};
use dispatch_orders::paging::Page;

use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::ApiEnvelope;
use crate::error::{ClientError, ClientResult};

impl DispatchClient {
    pub async fn hall(&self, query: &HallQuery) -> ClientResult<ApiEnvelope<Page<HallOrder>>> {
        query.validate()?;
        self.post_json(endpoints::HALL_PAGE, query).await
    }

    pub async fn hall_detail(
        &self,
        id: DistributionId,
    ) -> ClientResult<ApiEnvelope<HallOrderDetail>> {
        self.post_json(endpoints::HALL_DETAIL, &SeizeRequest { id })
            .await
    }

    /// Advisory eligibility check; only [`seize`](Self::seize) claims.
    pub async fn check_seize(&self, id: DistributionId) -> ClientResult<ApiEnvelope<SeizeCheck>> {
        self.post_json(endpoints::SEIZE_CHECK, &SeizeRequest { id })
            .await
    }

    /// [`check_seize`](Self::check_seize) folded into a tagged outcome.
    ///
    /// A rejection carried on the envelope itself is read the same way as one
    /// carried in the inner result.
    pub async fn seize_eligibility(&self, id: DistributionId) -> ClientResult<SeizeEligibility> {
        match self.check_seize(id).await?.ensure_success() {
            Ok(envelope) => Ok(envelope.into_result()?.eligibility()),
            Err(ClientError::Api { code, message }) => Ok(SeizeCheck { code, message }.eligibility()),
            Err(other) => Err(other),
        }
    }

    /// Claim an order. Not idempotent: a second seize of the same order is
    /// rejected with the already-taken code.
    pub async fn seize(&self, id: DistributionId) -> ClientResult<ApiEnvelope<SeizeReceipt>> {
        tracing::info!(distribution_id = %id, "seizing order");
        self.post_json(endpoints::SEIZE, &SeizeRequest { id }).await
    }
}
