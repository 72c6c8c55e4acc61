use serde::{Deserialize, Serialize};

use dispatch_core::time::deserialize_opt;
use dispatch_core::{DistributionId, DomainError, DomainResult, Entity, Flag, OrderId, ServerTime, UserId};

use crate::draft::DraftKind;
use crate::images::ImageList;
use crate::paging::Page;
use crate::state::{DesignState, SettlementState};

/// Order snapshot as listed by `userOrder/myOderPage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(default)]
    pub distribution_id: Option<DistributionId>,
    pub order_number: String,
    pub design_state: DesignState,
    #[serde(default)]
    pub design_state_name: Option<String>,

    #[serde(default)]
    pub demand_illustrate: Option<String>,
    #[serde(default, alias = "orderTypeID")]
    pub order_type_id: Option<i64>,
    #[serde(default)]
    pub order_type_name: Option<String>,
    #[serde(default)]
    pub plat_type_id: Option<i64>,
    #[serde(default)]
    pub plat_type_name: Option<String>,
    #[serde(default)]
    pub documentary_customer_name: Option<String>,
    #[serde(default)]
    pub wang_wang: Option<String>,

    // Money
    #[serde(default)]
    pub order_amount: f64,
    #[serde(default)]
    pub dividend_ratio: f64,
    #[serde(default)]
    pub dividend_amount: f64,
    #[serde(default)]
    pub is_broker: Flag,
    #[serde(default)]
    broker_dividend_ratio: Option<f64>,
    #[serde(default)]
    broker_dividend_amount: Option<f64>,
    #[serde(default)]
    broker_user_id: Option<UserId>,
    #[serde(default)]
    broker_real_name: Option<String>,

    // Timeline
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub order_add_time: Option<ServerTime>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub distribution_create_time: Option<ServerTime>,
    /// First-draft deadline.
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub first_draft_time: Option<ServerTime>,
    /// First draft actually delivered.
    #[serde(default, rename = "cg_Wc_Time", deserialize_with = "deserialize_opt")]
    pub first_draft_done_time: Option<ServerTime>,
    /// Final-draft deadline.
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub final_time: Option<ServerTime>,
    /// Final draft actually delivered.
    #[serde(default, rename = "zg_Wc_Time", deserialize_with = "deserialize_opt")]
    pub final_done_time: Option<ServerTime>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub order_complete_time: Option<ServerTime>,
    #[serde(default, rename = "cg_YQ")]
    pub first_draft_overdue: Option<String>,
    #[serde(default, rename = "zg_YQ")]
    pub final_overdue: Option<String>,

    // States and flags
    #[serde(default)]
    pub settlement_state: SettlementState,
    #[serde(default)]
    pub order_complete_state: Option<i64>,
    #[serde(default)]
    pub trade_state: Option<i64>,
    #[serde(default)]
    pub trade_state_name: Option<String>,
    #[serde(default)]
    pub is_reassignment: Flag,
    #[serde(default)]
    pub is_emergent: Flag,
    #[serde(default)]
    pub abnormal_state: Flag,
    #[serde(default)]
    pub first_draft_upload_state: Flag,
    #[serde(default)]
    pub final_upload_state: Flag,
    #[serde(default)]
    pub complete_need_approve: Flag,
    #[serde(default)]
    pub repeat_first_draft: Flag,
    #[serde(default)]
    pub repeat_final_draft: Flag,
    #[serde(default)]
    pub is_demand: Flag,
    #[serde(default)]
    pub final_disclaimer: Flag,
    /// Reassignment requested by the designer.
    #[serde(default)]
    pub is_sq_gp: Flag,
    #[serde(default)]
    is_td_mz: Option<Flag>,
    #[serde(default)]
    is_cg_mz: Option<Flag>,
    #[serde(default)]
    is_zg_mz: Option<Flag>,
    #[serde(default)]
    is_gp_mz: Option<Flag>,
}

/// Broker's cut of an order, only present for brokered orders.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerShare {
    pub ratio: f64,
    pub amount: f64,
    pub user_id: Option<UserId>,
    pub real_name: Option<String>,
}

/// Which disclaimer kinds the designer may still file for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisclaimerEligibility {
    pub first_draft: bool,
    pub final_draft: bool,
    pub reassignment: bool,
    pub return_order: bool,
}

impl OrderSummary {
    pub fn broker_share(&self) -> Option<BrokerShare> {
        if !self.is_broker.is_set() {
            return None;
        }
        Some(BrokerShare {
            ratio: self.broker_dividend_ratio.unwrap_or_default(),
            amount: self.broker_dividend_amount.unwrap_or_default(),
            user_id: self.broker_user_id,
            real_name: self.broker_real_name.clone(),
        })
    }

    pub fn disclaimer_eligibility(&self) -> DisclaimerEligibility {
        let set = |flag: Option<Flag>| flag.is_some_and(Flag::is_set);
        DisclaimerEligibility {
            first_draft: set(self.is_cg_mz),
            final_draft: set(self.is_zg_mz),
            reassignment: set(self.is_gp_mz),
            return_order: set(self.is_td_mz),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settlement_state == SettlementState::Settled
    }

    /// Whether the order's current state accepts an upload of `kind`.
    ///
    /// The server enforces this too; the check lets callers skip a round trip.
    pub fn ensure_accepts_draft(&self, kind: DraftKind) -> DomainResult<DesignState> {
        match kind {
            DraftKind::First => self.design_state.after_first_draft(),
            DraftKind::Final => self.design_state.after_final_draft(),
        }
    }

    /// Internal consistency of one snapshot.
    pub fn check_invariants(&self) -> DomainResult<()> {
        self.settlement_state
            .ensure_consistent_with(self.design_state)?;
        if !self.is_broker.is_set()
            && (self.broker_dividend_amount.is_some_and(|a| a != 0.0)
                || self.broker_dividend_ratio.is_some_and(|r| r != 0.0))
        {
            return Err(DomainError::invariant(format!(
                "order {} carries a broker dividend without isBroker",
                self.order_number
            )));
        }
        Ok(())
    }

    /// `cg_YQ` carries the overdue text; blank means on time.
    pub fn is_first_draft_overdue(&self) -> bool {
        is_overdue(&self.first_draft_overdue)
    }

    pub fn is_final_overdue(&self) -> bool {
        is_overdue(&self.final_overdue)
    }

    /// Label used for presentation, preferring the server's own name.
    pub fn state_label(&self) -> String {
        self.design_state_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.design_state.label().to_string())
    }
}

fn is_overdue(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

impl Entity for OrderSummary {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Full order record from `userOrder/orderDetail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub summary: OrderSummary,
    #[serde(default)]
    pub refer_website: Option<String>,
    #[serde(default)]
    pub refer_picture: ImageList,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub order_download_time: Option<ServerTime>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub dispatch_customer_name: Option<String>,
    #[serde(default, rename = "productTypeID")]
    pub product_type_id: Option<i64>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub industry_type_id: Option<i64>,
    #[serde(default)]
    pub industry_type_name: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub task_amount: f64,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Penalty for a late or rejected first draft.
    #[serde(default)]
    pub first_punish: f64,
    /// Penalty for a late or rejected final draft.
    #[serde(default)]
    pub final_punish: f64,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub next_annotate_time: Option<ServerTime>,
}

impl OrderDetail {
    pub fn design_state(&self) -> DesignState {
        self.summary.design_state
    }

    /// Whether `viewer` is the designer the order is assigned to.
    pub fn is_assigned_to(&self, viewer: UserId) -> bool {
        self.user_id == Some(viewer)
    }
}

impl Entity for OrderDetail {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.summary.id
    }
}

/// Body of `userOrder/orderDetail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailRequest {
    pub order_id: OrderId,
}

/// Result of `userOrder/myOderPage`: the page plus two side counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    #[serde(rename = "Data")]
    pub data: Page<OrderSummary>,
    /// Orders currently in transit for the requesting designer.
    #[serde(rename = "zt_num", default)]
    pub in_transit_count: u64,
    /// Orders flagged abnormal for the requesting designer.
    #[serde(rename = "yc_num", default)]
    pub abnormal_count: u64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal summary JSON with the fields every snapshot carries.
    pub fn summary_json(id: i64, design_state: i64) -> serde_json::Value {
        use serde_json::json;

        let parts = [
            json!({
                "id": id,
                "distributionId": id * 10,
                "distributionCreateTime": null,
                "orderNumber": format!("DS{id:06}"),
                "orderTypeId": 3,
                "orderTypeName": "Main image",
                "platTypeId": null,
                "platTypeName": null,
                "orderAddTime": "2025-08-11 15:07:31",
                "documentaryCustomerName": "Lin",
                "wangWang": "shop-lin",
                "orderAmount": 120.5
            }),
            json!({
                "brokerDividendRatio": null,
                "brokerDividendAmount": null,
                "dividendRatio": 0.6,
                "dividendAmount": 72.3,
                "designState": design_state,
                "designStateName": null,
                "settlementState": 0,
                "orderCompleteState": 0,
                "orderCompleteTime": null,
                "isReassignment": 0,
                "abnormalState": 0,
                "tradeState": 1
            }),
            json!({
                "cg_YQ": "",
                "cg_Wc_Time": null,
                "firstDraftTime": "2025-08-12 18:00:00",
                "zg_YQ": "",
                "zg_Wc_Time": null,
                "finalTime": "2025-08-14 18:00:00",
                "qx_fh": 0,
                "firstDraftUploadState": 0,
                "finalUploadState": 0,
                "completeNeedApprove": 0,
                "js_time": 0,
                "isSqGp": 0
            }),
            json!({
                "isTdMz": null,
                "isCgMz": 1,
                "isZgMz": null,
                "isJzZgMz": 0,
                "isGpMz": null,
                "repeatFirstDraft": 0,
                "repeatFinalDraft": 0,
                "isDraftDetial": 0,
                "isDemand": 0,
                "isEmergent": 1
            }),
            json!({
                "isBroker": 0,
                "brokerUserId": null,
                "brokerAutoincrementUserId": null,
                "brokerRealName": null,
                "finalDisclaimer": 0
            }),
        ];

        let mut merged = serde_json::Map::new();
        for part in parts {
            if let serde_json::Value::Object(fields) = part {
                merged.extend(fields);
            }
        }
        serde_json::Value::Object(merged)
    }

    pub fn summary(id: i64, state: DesignState) -> OrderSummary {
        serde_json::from_value(summary_json(id, state.code())).unwrap()
    }
}
