//! Service points and the capability report behind a designer's grade.
//!
//! Both are read-only. The portal computes the score from the rates below and
//! uses the resulting grade to decide seize eligibility.

use serde::{Deserialize, Serialize};

use dispatch_core::time::deserialize_opt;
use dispatch_core::{Flag, ServerTime, UserId};

/// One scored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMetric {
    AcceptSuccess,
    Reassignment,
    Return,
    FirstDraftOnTime,
    FinalDraftOnTime,
    AveragePrice,
    Activity,
    GoodComment,
}

impl ServiceMetric {
    pub fn label(self) -> &'static str {
        match self {
            ServiceMetric::AcceptSuccess => "accept success rate",
            ServiceMetric::Reassignment => "reassignment rate",
            ServiceMetric::Return => "return rate",
            ServiceMetric::FirstDraftOnTime => "first draft on time",
            ServiceMetric::FinalDraftOnTime => "final draft on time",
            ServiceMetric::AveragePrice => "average price",
            ServiceMetric::Activity => "activity",
            ServiceMetric::GoodComment => "good comments",
        }
    }
}

/// Raw value of a metric next to the points it earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricScore {
    pub metric: ServiceMetric,
    pub value: f64,
    pub points: f64,
}

/// Result of `pUserInfo/getServicePointsInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePoints {
    pub user_id: UserId,
    #[serde(default)]
    pub service_points: f64,

    #[serde(default, rename = "jd_Cg_Rate")]
    pub accept_success_rate: f64,
    #[serde(default, rename = "gp_Rate")]
    pub reassignment_rate: f64,
    #[serde(default, rename = "td_Rate")]
    pub return_rate: f64,
    #[serde(default, rename = "cg_Zs_Rate")]
    pub first_draft_on_time_rate: f64,
    #[serde(default, rename = "zg_Zs_Rate")]
    pub final_draft_on_time_rate: f64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub good_comment_score: f64,
    #[serde(default)]
    pub active_score: f64,

    #[serde(default, rename = "wj_Number")]
    pub completed_count: u64,
    #[serde(default, rename = "jd_Number")]
    pub accepted_count: u64,
    #[serde(default, rename = "qd_Number")]
    pub seized_count: u64,
    #[serde(default, rename = "zt_Number")]
    pub in_transit_count: u64,
    #[serde(default, rename = "td_Number")]
    pub returned_count: u64,
    #[serde(default, rename = "yc_Number")]
    pub abnormal_count: u64,
    #[serde(default, rename = "gp_Number")]
    pub reassigned_count: u64,
    #[serde(default, rename = "js_Number")]
    pub settled_count: u64,

    #[serde(default, rename = "jd_Cg_Rate_Point")]
    pub accept_success_points: f64,
    #[serde(default, rename = "gp_Rate_Point")]
    pub reassignment_points: f64,
    #[serde(default, rename = "td_Rate_Point")]
    pub return_points: f64,
    #[serde(default, rename = "cg_Zs_Rate_Point")]
    pub first_draft_on_time_points: f64,
    #[serde(default, rename = "zg_Zs_Rate_Point")]
    pub final_draft_on_time_points: f64,
    #[serde(default, rename = "avgPrice_Point")]
    pub avg_price_points: f64,
    #[serde(default, rename = "activeScore_Point")]
    pub active_points: f64,
    #[serde(default, rename = "goodCommentScore_Point")]
    pub good_comment_points: f64,
}

impl ServicePoints {
    pub fn breakdown(&self) -> Vec<MetricScore> {
        let score = |metric, value, points| MetricScore { metric, value, points };
        vec![
            score(ServiceMetric::AcceptSuccess, self.accept_success_rate, self.accept_success_points),
            score(ServiceMetric::Reassignment, self.reassignment_rate, self.reassignment_points),
            score(ServiceMetric::Return, self.return_rate, self.return_points),
            score(
                ServiceMetric::FirstDraftOnTime,
                self.first_draft_on_time_rate,
                self.first_draft_on_time_points,
            ),
            score(
                ServiceMetric::FinalDraftOnTime,
                self.final_draft_on_time_rate,
                self.final_draft_on_time_points,
            ),
            score(ServiceMetric::AveragePrice, self.avg_price, self.avg_price_points),
            score(ServiceMetric::Activity, self.active_score, self.active_points),
            score(ServiceMetric::GoodComment, self.good_comment_score, self.good_comment_points),
        ]
    }

    /// Metric contributing the fewest points; ties keep the earlier one.
    pub fn weakest(&self) -> Option<MetricScore> {
        self.breakdown()
            .into_iter()
            .reduce(|low, next| if next.points < low.points { next } else { low })
    }
}

/// Grade the designer currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub user_grade_name: String,
    /// Commission ratio for this grade. The wire name is `salaryRat`.
    #[serde(rename = "salaryRat", default)]
    pub salary_rate: f64,
    pub user_type_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrade {
    pub user_type_id: i64,
    pub user_grade_name: String,
}

/// Result of `pUserInfo/serviceCapability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityReport {
    #[serde(default)]
    pub is_vip: Flag,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub start_vip_time: Option<ServerTime>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub end_vip_time: Option<ServerTime>,
    #[serde(default)]
    pub is_recharge_vip: Flag,
    #[serde(default)]
    pub common_salary_rate: f64,
    #[serde(default)]
    pub service_points: f64,
    #[serde(default, rename = "jd_Cg_Rate")]
    pub accept_success_rate: f64,
    #[serde(default, rename = "td_Rate")]
    pub return_rate: f64,
    #[serde(default, rename = "gp_Rate")]
    pub reassignment_rate: f64,
    #[serde(default, rename = "cg_Zs_Rate")]
    pub first_draft_on_time_rate: f64,
    #[serde(default, rename = "zg_Zs_Rate")]
    pub final_draft_on_time_rate: f64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub active_score: f64,
    #[serde(default)]
    pub good_comment_score: f64,
    #[serde(default)]
    pub bad_score: f64,
    #[serde(default)]
    pub user_grade_info: Option<GradeInfo>,
    #[serde(default)]
    pub user_grades: Vec<UserGrade>,
}

impl CapabilityReport {
    /// VIP membership covering `at`. Open-ended bounds count as unbounded.
    pub fn is_vip_at(&self, at: ServerTime) -> bool {
        self.is_vip.is_set()
            && self.start_vip_time.is_none_or(|start| start <= at)
            && self.end_vip_time.is_none_or(|end| at <= end)
    }

    /// Commission ratio that applies: the grade's own, else the common one.
    pub fn effective_salary_rate(&self) -> f64 {
        self.user_grade_info
            .as_ref()
            .map(|grade| grade.salary_rate)
            .unwrap_or(self.common_salary_rate)
    }

    pub fn grade_name(&self) -> Option<&str> {
        self.user_grade_info
            .as_ref()
            .map(|grade| grade.user_grade_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> ServicePoints {
        serde_json::from_value(serde_json::json!({
            "userId": 8,
            "servicePoints": 86.5,
            "jd_Cg_Rate": 0.92,
            "gp_Rate": 0.05,
            "td_Rate": 0.02,
            "cg_Zs_Rate": 0.97,
            "zg_Zs_Rate": 0.9,
            "avgPrice": 140,
            "wj_Number": 120,
            "qd_Number": 150,
            "jd_Cg_Rate_Point": 18,
            "gp_Rate_Point": 9,
            "td_Rate_Point": 10,
            "cg_Zs_Rate_Point": 19,
            "zg_Zs_Rate_Point": 4,
            "avgPrice_Point": 12
        }))
        .unwrap()
    }

    #[test]
    fn reads_scores_and_counters() {
        let p = points();
        assert_eq!(p.user_id, UserId::new(8).unwrap());
        assert_eq!(p.service_points, 86.5);
        assert_eq!(p.completed_count, 120);
        assert_eq!(p.seized_count, 150);
        assert_eq!(p.good_comment_score, 0.0);
        assert_eq!(p.breakdown().len(), 8);
    }

    #[test]
    fn weakest_metric_has_fewest_points() {
        let p = points();
        let weakest = p.weakest().unwrap();
        // activity and good comments carry 0 points; activity comes first
        assert_eq!(weakest.metric, ServiceMetric::Activity);
        assert_eq!(weakest.points, 0.0);
    }

    #[test]
    fn capability_report_prefers_grade_rate() {
        let report: CapabilityReport = serde_json::from_value(serde_json::json!({
            "isVip": 1,
            "startVipTime": "2025-01-01 00:00:00",
            "endVipTime": "",
            "isRechargeVip": 0,
            "commonSalaryRate": 0.5,
            "servicePoints": 86.5,
            "userGradeInfo": {"userGradeName": "Senior", "salaryRat": 0.65, "userTypeId": 3},
            "userGrades": [
                {"userTypeId": 2, "userGradeName": "Junior"},
                {"userTypeId": 3, "userGradeName": "Senior"}
            ]
        }))
        .unwrap();
        assert_eq!(report.effective_salary_rate(), 0.65);
        assert_eq!(report.grade_name(), Some("Senior"));
        assert!(report.end_vip_time.is_none());

        let inside = ServerTime::parse("2025-08-11 15:07:31").unwrap();
        let before = ServerTime::parse("2024-12-31 23:59:59").unwrap();
        assert!(report.is_vip_at(inside));
        assert!(!report.is_vip_at(before));
    }

    #[test]
    fn report_without_grade_uses_common_rate() {
        let report: CapabilityReport =
            serde_json::from_value(serde_json::json!({"isVip": 0, "commonSalaryRate": 0.5})).unwrap();
        assert_eq!(report.effective_salary_rate(), 0.5);
        assert!(!report.is_vip_at(ServerTime::parse("2025-08-11 15:07:31").unwrap()));
        assert!(report.user_grades.is_empty());
    }
}
