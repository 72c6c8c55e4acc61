//! Dictionary and type lists.

use dispatch_orders::dictionary::{DictEntry, DictKind, Dictionary, OrderTypeFilter, OrderTypeNode};

use crate::api::NO_QUERY;
use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::ApiEnvelope;
use crate::error::ClientResult;

impl DispatchClient {
    pub async fn dict_entries(&self, kind: &DictKind) -> ClientResult<ApiEnvelope<Vec<DictEntry>>> {
        match kind {
            DictKind::System { code } => {
                self.get_json(endpoints::SYSTEM_DICT, &[("code", code.as_str())])
                    .await
            }
            DictKind::DesignTypes { kind } => {
                self.get_json(endpoints::DESIGN_TYPES, &[("type", kind.as_str())])
                    .await
            }
            DictKind::DesignerTypes => self.get_json(endpoints::DESIGNER_TYPES, NO_QUERY).await,
            DictKind::Software => self.get_json(endpoints::SOFTWARE, NO_QUERY).await,
            DictKind::Platforms => self.get_json(endpoints::PLATFORMS, NO_QUERY).await,
            DictKind::ProductTypes => self.get_json(endpoints::PRODUCT_TYPES, NO_QUERY).await,
        }
    }

    pub async fn order_types(
        &self,
        filter: OrderTypeFilter,
    ) -> ClientResult<ApiEnvelope<Vec<OrderTypeNode>>> {
        self.post_query(endpoints::ORDER_TYPES, &filter).await
    }

    /// Fetch the order-type tree and the platform list and index both.
    pub async fn load_dictionary(&self) -> ClientResult<Dictionary> {
        let (types, platforms) = tokio::try_join!(
            self.order_types(OrderTypeFilter::default()),
            self.dict_entries(&DictKind::Platforms),
        )?;
        let types = types.into_optional()?.unwrap_or_default();
        let platforms = platforms.into_optional()?.unwrap_or_default();
        tracing::debug!(
            order_types = types.len(),
            platforms = platforms.len(),
            "dictionary loaded"
        );
        Ok(Dictionary::new()
            .with_order_types(&types)
            .with_platforms(&platforms))
    }
}
