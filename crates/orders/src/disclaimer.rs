//! Disclaimer (exemption) requests and their review history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dispatch_core::error::require_non_blank;
use dispatch_core::time::{deserialize_opt, serialize_opt_date};
use dispatch_core::{
    DistributionId, DomainError, DomainResult, Entity, Flag, OrderId, RecordId, ServerTime, UserId,
};

use crate::draft::DraftKind;
use crate::images::ImageList;
use crate::paging::PageRequest;

/// Stage a disclaimer is filed against. Travels as its label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DisclaimerStage {
    FirstDraft,
    FinalDraft,
    Reassignment,
    ReturnOrder,
}

impl DisclaimerStage {
    pub const ALL: [DisclaimerStage; 4] = [
        DisclaimerStage::FirstDraft,
        DisclaimerStage::FinalDraft,
        DisclaimerStage::Reassignment,
        DisclaimerStage::ReturnOrder,
    ];

    pub fn wire_label(self) -> &'static str {
        match self {
            DisclaimerStage::FirstDraft => "初稿免责",
            DisclaimerStage::FinalDraft => "终稿免责",
            DisclaimerStage::Reassignment => "改派免责",
            DisclaimerStage::ReturnOrder => "退单免责",
        }
    }
}

impl From<DraftKind> for DisclaimerStage {
    fn from(kind: DraftKind) -> Self {
        match kind {
            DraftKind::First => DisclaimerStage::FirstDraft,
            DraftKind::Final => DisclaimerStage::FinalDraft,
        }
    }
}

impl From<DisclaimerStage> for &'static str {
    fn from(stage: DisclaimerStage) -> Self {
        stage.wire_label()
    }
}

impl TryFrom<String> for DisclaimerStage {
    type Error = DomainError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.wire_label() == label)
            .ok_or_else(|| DomainError::validation("disclaimerType", format!("unknown stage {label:?}")))
    }
}

impl core::fmt::Display for DisclaimerStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// Review state of a disclaimer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DisclaimerStatus {
    Unprocessed = 0,
    Processed = 1,
    Rejected = 2,
}

impl DisclaimerStatus {
    pub fn is_reviewed(self) -> bool {
        self != DisclaimerStatus::Unprocessed
    }

    fn wire_name(self) -> &'static str {
        match self {
            DisclaimerStatus::Unprocessed => "未处理",
            DisclaimerStatus::Processed => "已处理",
            DisclaimerStatus::Rejected => "已拒绝",
        }
    }

    /// Map the display name the history endpoint returns.
    pub fn from_name(name: &str) -> DomainResult<Self> {
        let name = name.trim();
        [Self::Unprocessed, Self::Processed, Self::Rejected]
            .into_iter()
            .find(|s| s.wire_name() == name)
            .ok_or_else(|| DomainError::validation("isStateName", format!("unknown status {name:?}")))
    }
}

impl TryFrom<i64> for DisclaimerStatus {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unprocessed),
            1 => Ok(Self::Processed),
            2 => Ok(Self::Rejected),
            other => Err(DomainError::unknown_code("disclaimer status", other)),
        }
    }
}

impl From<DisclaimerStatus> for i64 {
    fn from(status: DisclaimerStatus) -> Self {
        status as i64
    }
}

/// Body of `applyFirstDraftDisclaimer` and `applyFinalDraftDisclaimer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDisclaimer {
    pub order_id: OrderId,
    pub disclaimer_reason: String,
    pub disclaimer_description: String,
    pub proof_images: ImageList,
}

impl DraftDisclaimer {
    pub fn new(
        order_id: OrderId,
        reason: impl Into<String>,
        description: impl Into<String>,
        proof_images: ImageList,
    ) -> Self {
        Self {
            order_id,
            disclaimer_reason: reason.into(),
            disclaimer_description: description.into(),
            proof_images,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("disclaimerReason", &self.disclaimer_reason)
    }
}

/// Body of `userOrder/disclaimer`, the general exemption form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionRequest {
    pub order_id: OrderId,
    pub distribution_id: DistributionId,
    pub user_id: UserId,
    pub disclaimer_type: DisclaimerStage,
    pub disclaimer_reason: String,
    #[serde(rename = "disclaimerRmark")]
    pub disclaimer_remark: String,
    pub image_path: ImageList,
    pub explain_reason: String,
}

impl ExemptionRequest {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("disclaimerReason", &self.disclaimer_reason)?;
        require_non_blank("explainReason", &self.explain_reason)
    }
}

/// One row of `userOrder/orderDisclaimerPage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclaimerRecord {
    pub id: RecordId,
    pub order_number: String,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
    #[serde(default)]
    pub is_vip: Flag,
    pub disclaimer_type: DisclaimerStage,
    #[serde(default)]
    pub disclaimer_reason: String,
    #[serde(default, rename = "disclaimerRmark")]
    pub disclaimer_remark: Option<String>,
    #[serde(default)]
    pub reply_content: Option<String>,
    #[serde(default)]
    pub reviewed_name: Option<String>,
    pub is_state_name: String,
    #[serde(default)]
    pub is_explain: Flag,
    #[serde(default)]
    pub is_can_explain: Flag,
}

impl DisclaimerRecord {
    pub fn status(&self) -> DomainResult<DisclaimerStatus> {
        DisclaimerStatus::from_name(&self.is_state_name)
    }

    /// Reviewer's reply, only meaningful once the request was reviewed.
    pub fn explanation(&self) -> Option<&str> {
        let reviewed = self.status().is_ok_and(DisclaimerStatus::is_reviewed);
        self.reply_content
            .as_deref()
            .filter(|reply| reviewed && !reply.trim().is_empty())
    }

    pub fn check_invariants(&self) -> DomainResult<()> {
        let status = self.status()?;
        let has_reply = self
            .reply_content
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
        if has_reply && !status.is_reviewed() {
            return Err(DomainError::invariant(format!(
                "disclaimer {} carries a reply before review",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for DisclaimerRecord {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Body of `userOrder/orderDisclaimerPage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclaimerQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_state: Option<DisclaimerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_date")]
    pub begin_time: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_date")]
    pub end_time: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer_type: Option<DisclaimerStage>,
}

impl DisclaimerQuery {
    pub fn new(req: PageRequest) -> Self {
        Self {
            page: req.page,
            page_size: req.page_size,
            ..Self::default()
        }
    }

    pub fn status(mut self, status: DisclaimerStatus) -> Self {
        self.is_state = Some(status);
        self
    }

    pub fn stage(mut self, stage: DisclaimerStage) -> Self {
        self.disclaimer_type = Some(stage);
        self
    }

    pub fn order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    pub fn between(mut self, begin: NaiveDate, end: NaiveDate) -> Self {
        self.begin_time = Some(begin);
        self.end_time = Some(end);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
        .validate()?;
        if let (Some(begin), Some(end)) = (self.begin_time, self.end_time) {
            if begin > end {
                return Err(DomainError::validation(
                    "beginTime",
                    format!("{begin} is after endTime {end}"),
                ));
            }
        }
        Ok(())
    }
}
