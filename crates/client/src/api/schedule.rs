//! Grab-time schedule and the order-taking switch.

use dispatch_orders::schedule::{GrabTimeEntry, GrabTimeUpdate, TakingState, TakingStateUpdate};

use crate::api::NO_QUERY;
use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::{ApiEnvelope, MutationAck};
use crate::error::ClientResult;

impl DispatchClient {
    pub async fn grab_times(&self) -> ClientResult<ApiEnvelope<Vec<GrabTimeEntry>>> {
        self.post_query(endpoints::GRAB_TIMES, NO_QUERY).await
    }

    /// Replace the whole weekly schedule.
    pub async fn set_grab_times(
        &self,
        update: &GrabTimeUpdate,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        update.validate()?;
        self.post_json(endpoints::SET_GRAB_TIMES, update).await
    }

    pub async fn set_taking_state(
        &self,
        state: TakingState,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        self.post_json(endpoints::TAKING_STATE, &TakingStateUpdate { state_xx: state })
            .await
    }
}
