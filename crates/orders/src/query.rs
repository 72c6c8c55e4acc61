//! Filter criteria for the designer's order list.

use chrono::NaiveDate;
use serde::Serialize;

use dispatch_core::time::serialize_opt_date;
use dispatch_core::{DomainError, DomainResult, Flag};

use crate::order::OrderSummary;
use crate::paging::PageRequest;
use crate::state::{SettlementState, StateBucket};

/// Body of `userOrder/myOderPage`.
///
/// Every filter is optional; an omitted filter is left out of the request and
/// matches all orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_date")]
    pub start_time: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_date")]
    pub end_time: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_state: Option<StateBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_state: Option<SettlementState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reassignment: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abnormal_state: Option<Flag>,
    #[serde(rename = "isCG_YQ", skip_serializing_if = "Option::is_none")]
    pub first_draft_overdue: Option<Flag>,
    #[serde(rename = "isZG_YQ", skip_serializing_if = "Option::is_none")]
    pub final_overdue: Option<Flag>,
}

impl OrderQuery {
    pub fn new(req: PageRequest) -> Self {
        Self {
            page: req.page,
            page_size: req.page_size,
            ..Self::default()
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    pub fn bucket(mut self, bucket: StateBucket) -> Self {
        self.design_state = Some(bucket);
        self
    }

    pub fn settlement(mut self, state: SettlementState) -> Self {
        self.settlement_state = Some(state);
        self
    }

    pub fn reassigned(mut self, flag: bool) -> Self {
        self.is_reassignment = Some(flag.into());
        self
    }

    pub fn abnormal(mut self, flag: bool) -> Self {
        self.abnormal_state = Some(flag.into());
        self
    }

    pub fn first_draft_overdue(mut self, flag: bool) -> Self {
        self.first_draft_overdue = Some(flag.into());
        self
    }

    pub fn final_overdue(mut self, flag: bool) -> Self {
        self.final_overdue = Some(flag.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.page_request().validate()?;
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(DomainError::validation(
                    "startTime",
                    format!("{start} is after endTime {end}"),
                ));
            }
        }
        Ok(())
    }

    /// Whether `order` passes every filter that is set.
    pub fn matches(&self, order: &OrderSummary) -> bool {
        let day = order.order_add_time.map(|t| t.as_naive().date());
        if let Some(start) = self.start_time {
            if day.is_none_or(|d| d < start) {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if day.is_none_or(|d| d > end) {
                return false;
            }
        }
        if let Some(number) = non_blank(&self.order_number) {
            if order.order_number != number {
                return false;
            }
        }
        if let Some(keyword) = non_blank(&self.keyword) {
            let haystacks = [
                Some(order.order_number.as_str()),
                order.demand_illustrate.as_deref(),
                order.documentary_customer_name.as_deref(),
                order.wang_wang.as_deref(),
            ];
            if !haystacks.into_iter().flatten().any(|h| h.contains(keyword)) {
                return false;
            }
        }
        if let Some(bucket) = self.design_state {
            if !bucket.contains(order.design_state) {
                return false;
            }
        }
        if self
            .settlement_state
            .is_some_and(|s| s != order.settlement_state)
        {
            return false;
        }
        if self.is_reassignment.is_some_and(|f| f != order.is_reassignment) {
            return false;
        }
        if self.abnormal_state.is_some_and(|f| f != order.abnormal_state) {
            return false;
        }
        if self
            .first_draft_overdue
            .is_some_and(|f| f.is_set() != order.is_first_draft_overdue())
        {
            return false;
        }
        if self
            .final_overdue
            .is_some_and(|f| f.is_set() != order.is_final_overdue())
        {
            return false;
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::fixtures::summary;
    use crate::state::DesignState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn omitted_filters_are_not_serialized() {
        let query = OrderQuery::new(PageRequest::default());
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"page": 1, "pageSize": 10}));
    }

    #[test]
    fn set_filters_use_wire_names() {
        let query = OrderQuery::new(PageRequest::new(2, 20).unwrap())
            .between(date(2025, 8, 1), date(2025, 8, 31))
            .bucket(StateBucket::InTransit)
            .abnormal(true)
            .first_draft_overdue(false);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["startTime"], "2025-08-01");
        assert_eq!(json["endTime"], "2025-08-31");
        assert_eq!(json["designState"], 6);
        assert_eq!(json["abnormalState"], 1);
        assert_eq!(json["isCG_YQ"], 0);
        assert!(json.get("isZG_YQ").is_none());
    }

    #[test]
    fn validate_rejects_bad_paging_and_reversed_range() {
        let mut query = OrderQuery::new(PageRequest::default());
        query.page = 0;
        assert_eq!(query.validate().unwrap_err().field(), Some("page"));

        let query = OrderQuery::new(PageRequest::default()).between(date(2025, 9, 2), date(2025, 9, 1));
        assert_eq!(query.validate().unwrap_err().field(), Some("startTime"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = OrderQuery::new(PageRequest::default());
        for state in DesignState::ALL {
            assert!(query.matches(&summary(1, state)));
        }
    }

    #[test]
    fn filters_combine() {
        let order = summary(12, DesignState::RevisionInProgress);
        let hit = OrderQuery::new(PageRequest::default())
            .bucket(StateBucket::InTransit)
            .keyword("lin")
            .between(date(2025, 8, 11), date(2025, 8, 11));
        assert!(hit.matches(&order));

        let miss = hit.clone().bucket(StateBucket::Completed);
        assert!(!miss.matches(&order));

        let miss = OrderQuery::new(PageRequest::default()).order_number("DS999999");
        assert!(!miss.matches(&order));

        let miss = OrderQuery::new(PageRequest::default()).between(date(2025, 8, 12), date(2025, 8, 20));
        assert!(!miss.matches(&order));
    }

    #[test]
    fn overdue_filters_follow_the_overdue_text() {
        let on_time = summary(1, DesignState::FirstDraftInProgress);
        let mut late = summary(2, DesignState::RevisionInProgress);
        late.first_draft_overdue = Some("2 days".into());

        let both = OrderQuery::new(PageRequest::default())
            .first_draft_overdue(true)
            .final_overdue(true);
        assert!(!both.matches(&on_time));
        assert!(!both.matches(&late));

        let first = OrderQuery::new(PageRequest::default()).first_draft_overdue(true);
        assert!(first.matches(&late));
        assert!(!first.matches(&on_time));

        let not_final = OrderQuery::new(PageRequest::default()).final_overdue(false);
        assert!(not_final.matches(&on_time));
        late.final_overdue = Some(" 1 day ".into());
        assert!(!not_final.matches(&late));
    }
}
