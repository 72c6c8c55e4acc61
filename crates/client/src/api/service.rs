//! Service points and the capability report.

use dispatch_orders::service::{CapabilityReport, ServicePoints};

use crate::api::NO_QUERY;
use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::ApiEnvelope;
use crate::error::ClientResult;

impl DispatchClient {
    pub async fn service_points(&self) -> ClientResult<ApiEnvelope<ServicePoints>> {
        self.post_query(endpoints::SERVICE_POINTS, NO_QUERY).await
    }

    pub async fn service_capability(&self) -> ClientResult<ApiEnvelope<CapabilityReport>> {
        self.get_json(endpoints::SERVICE_CAPABILITY, NO_QUERY).await
    }
}
