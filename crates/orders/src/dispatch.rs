//! The dispatch hall: open orders a designer may seize.

use serde::{Deserialize, Serialize};

use dispatch_core::codes;
use dispatch_core::time::deserialize_opt;
use dispatch_core::{DistributionId, DomainResult, Entity, Flag, OrderId, ServerTime, UserId};

use crate::images::ImageList;
use crate::paging::PageRequest;
use crate::state::DesignState;

/// Body of `orderDistribution/pageNimble`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_price: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_time: Option<bool>,
}

impl HallQuery {
    pub fn new(req: PageRequest) -> Self {
        Self {
            page: req.page,
            page_size: req.page_size,
            ..Self::default()
        }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn order_type(mut self, id: i64) -> Self {
        self.order_type_id = Some(id);
        self
    }

    pub fn product_type(mut self, id: i64) -> Self {
        self.product_type_id = Some(id);
        self
    }

    pub fn sort_by_price(mut self) -> Self {
        self.sort_price = Some(true);
        self
    }

    pub fn sort_by_time(mut self) -> Self {
        self.sort_time = Some(true);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
        .validate()
    }
}

/// One card in the hall listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallOrder {
    pub id: DistributionId,
    #[serde(default)]
    pub plat_name: Option<String>,
    #[serde(default)]
    pub order_type_id: Option<i64>,
    #[serde(default)]
    pub order_type_name: Option<String>,
    #[serde(default)]
    pub is_distribute: Flag,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub first_draft_time: Option<ServerTime>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub final_time: Option<ServerTime>,
    #[serde(default)]
    pub demand_illustrate: Option<String>,
    #[serde(default)]
    pub refer_picture: ImageList,
    #[serde(default)]
    pub refer_website: Option<String>,
    /// Customer-service contact who published the order.
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
    #[serde(default)]
    pub task_amount: f64,
    #[serde(default)]
    pub is_emergent: Flag,
}

impl Entity for HallOrder {
    type Id = DistributionId;

    fn id(&self) -> DistributionId {
        self.id
    }
}

/// Result of `orderDistribution/detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallOrderDetail {
    pub id: DistributionId,
    pub order_id: OrderId,
    pub order_number: String,
    pub design_state: DesignState,
    #[serde(default)]
    pub distribution_state: Option<i64>,
    #[serde(default)]
    pub order_type_id: Option<i64>,
    #[serde(default)]
    pub order_type_name: Option<String>,
    #[serde(default)]
    pub plat_type_name: Option<String>,
    #[serde(default, rename = "productTyepId", alias = "productTypeId")]
    pub product_type_id: Option<i64>,
    #[serde(default)]
    pub product_type_name: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub first_draft_time: Option<ServerTime>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub final_time: Option<ServerTime>,
    #[serde(default)]
    pub demand_illustrate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
    #[serde(default)]
    pub admin_id: Option<UserId>,
    #[serde(default)]
    pub admin_name: Option<String>,
    /// The requesting designer already tried to seize this order.
    #[serde(default)]
    pub is_seize: Flag,
    /// The requesting designer's seize succeeded.
    #[serde(default)]
    pub is_success: Flag,
    #[serde(default)]
    pub is_emergent: Flag,
    #[serde(default)]
    pub task_amount: f64,
    #[serde(default)]
    pub refer_website: Option<String>,
    #[serde(default)]
    pub refer_picture: ImageList,
}

impl HallOrderDetail {
    /// Whether the hall still offers this order to the requesting designer.
    pub fn is_seizable(&self) -> bool {
        self.design_state.is_open_for_seize() && !self.is_success.is_set()
    }
}

impl Entity for HallOrderDetail {
    type Id = DistributionId;

    fn id(&self) -> DistributionId {
        self.id
    }
}

/// Body of `seizeOrderCheck`, `seizeOrder` and `detail`: the hall record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeizeRequest {
    pub id: DistributionId,
}

/// Inner result of `seizeOrderCheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeizeCheck {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Advisory answer to "may I seize this order?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeizeEligibility {
    Eligible,
    AlreadyTaken,
    NotEligible { code: i32, message: String },
}

impl SeizeCheck {
    pub fn eligibility(&self) -> SeizeEligibility {
        match self.code {
            codes::SUCCESS => SeizeEligibility::Eligible,
            codes::ORDER_ALREADY_TAKEN => SeizeEligibility::AlreadyTaken,
            code => SeizeEligibility::NotEligible {
                code,
                message: self.message.clone(),
            },
        }
    }
}

impl SeizeEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, SeizeEligibility::Eligible)
    }
}

/// Receipt text returned by a successful `seizeOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeizeReceipt(pub String);

impl SeizeReceipt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Page;

    fn detail_json(state: i64, is_success: i64) -> serde_json::Value {
        let mut json = serde_json::json!({
            "id": 30,
            "orderId": 3,
            "orderTypeId": 2,
            "orderTypeName": "Detail page",
            "platTypeName": "Tmall",
            "productTyepId": 6,
            "productTypeName": "Apparel",
            "platformName": "Tmall",
            "finalTime": "2025-08-14 18:00:00",
            "firstDraftTime": "2025-08-12 18:00:00",
            "demandIllustrate": "summer banner"
        });
        let state_fields = serde_json::json!({
            "distributionState": 1,
            "designState": state,
            "createTime": "2025-08-11 15:07:31",
            "adminId": 2,
            "adminName": "ops-li",
            "adminTx": "",
            "orderNumber": "DS000003",
            "isSeize": is_success,
            "isSuccess": is_success,
            "isEmergent": 0,
            "taskAmount": 80,
            "referWebsite": "",
            "referPicture": "https://oss/r1.png"
        });
        if let (Some(fields), serde_json::Value::Object(rest)) = (json.as_object_mut(), state_fields) {
            fields.extend(rest);
        }
        json
    }

    #[test]
    fn detail_reads_misspelt_product_type() {
        let detail: HallOrderDetail = serde_json::from_value(detail_json(2, 0)).unwrap();
        assert_eq!(detail.product_type_id, Some(6));
        assert_eq!(detail.refer_picture.len(), 1);
        assert!(detail.is_seizable());

        let taken: HallOrderDetail = serde_json::from_value(detail_json(5, 1)).unwrap();
        assert!(!taken.is_seizable());
    }

    #[test]
    fn seize_check_maps_to_eligibility() {
        let ok = SeizeCheck { code: 200, message: String::new() };
        assert!(ok.eligibility().is_eligible());

        let taken = SeizeCheck { code: codes::ORDER_ALREADY_TAKEN, message: "taken".into() };
        assert_eq!(taken.eligibility(), SeizeEligibility::AlreadyTaken);

        let grade = SeizeCheck { code: 4002, message: "grade too low".into() };
        assert_eq!(
            grade.eligibility(),
            SeizeEligibility::NotEligible { code: 4002, message: "grade too low".into() }
        );
    }

    #[test]
    fn hall_query_and_page() {
        let query = HallQuery::new(PageRequest::default()).order_type(2).sort_by_price();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 1, "pageSize": 10, "orderTypeId": 2, "sortPrice": true})
        );

        let page: Page<HallOrder> = serde_json::from_value(serde_json::json!({
            "items": [{"id": 30, "orderTypeId": 2, "taskAmount": 80, "isEmergent": 1, "createTime": ""}],
            "total": 11,
            "page": 1,
            "pageSize": 10
        }))
        .unwrap();
        assert!(page.has_next_page());
        assert!(page.items[0].is_emergent.is_set());
        assert!(page.items[0].create_time.is_none());
    }

    #[test]
    fn seize_request_is_bare_id() {
        let json = serde_json::to_value(SeizeRequest { id: DistributionId::from_raw(30) }).unwrap();
        assert_eq!(json, serde_json::json!({"id": 30}));
        let receipt: SeizeReceipt = serde_json::from_str("\"seized DS000003\"").unwrap();
        assert_eq!(receipt.as_str(), "seized DS000003");
    }
}
