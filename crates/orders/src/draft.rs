//! Draft uploads and the append-only draft history.

use serde::{Deserialize, Serialize};

use dispatch_core::error::require_non_blank;
use dispatch_core::time::deserialize_opt;
use dispatch_core::{
    DistributionId, DomainError, DomainResult, Entity, Flag, OrderId, RecordId, ServerTime, UserId,
};

use crate::images::ImageList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftKind {
    First,
    Final,
}

impl DraftKind {
    pub fn label(self) -> &'static str {
        match self {
            DraftKind::First => "first draft",
            DraftKind::Final => "final draft",
        }
    }
}

fn require_paths(field: &'static str, paths: &[String]) -> DomainResult<()> {
    if paths.is_empty() {
        return Err(DomainError::validation(field, "at least one path is required"));
    }
    if paths.iter().any(|p| p.trim().is_empty()) {
        return Err(DomainError::validation(field, "paths must not be empty"));
    }
    Ok(())
}

/// Body of `userOrder/firstDraftUpload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstDraftUpload {
    pub id: OrderId,
    pub img_paths: Vec<String>,
}

impl FirstDraftUpload {
    pub fn new(id: OrderId, img_paths: Vec<String>) -> Self {
        Self { id, img_paths }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_paths("imgPaths", &self.img_paths)
    }
}

/// Body of `userOrder/finalDraftUpload`.
///
/// The wire spells the detail-image fields `detialPaths`/`detialsPaths`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalDraftUpload {
    pub id: OrderId,
    pub img_paths: Vec<String>,
    /// Detail images.
    #[serde(rename = "detialPaths", default)]
    pub detail_paths: Vec<String>,
    /// Sliced detail images.
    #[serde(rename = "detialsPaths", default)]
    pub detail_slice_paths: Vec<String>,
    /// Packaged source files.
    pub zip_path: String,
}

impl FinalDraftUpload {
    pub fn validate(&self) -> DomainResult<()> {
        require_paths("imgPaths", &self.img_paths)?;
        require_non_blank("zipPath", &self.zip_path)?;
        if self
            .detail_paths
            .iter()
            .chain(&self.detail_slice_paths)
            .any(|p| p.trim().is_empty())
        {
            return Err(DomainError::validation("detialPaths", "paths must not be empty"));
        }
        Ok(())
    }
}

/// Request body of the draft history endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftHistoryRequest {
    pub id: OrderId,
}

/// One uploaded draft. Entries are never edited once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftHistoryEntry {
    pub id: RecordId,
    pub order_id: OrderId,
    #[serde(default)]
    pub distribution_id: Option<DistributionId>,
    #[serde(default)]
    pub reassignment_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
    #[serde(default)]
    pub create_user_id: Option<UserId>,
    #[serde(default)]
    pub create_user_name: Option<String>,

    #[serde(default)]
    pub first_draft_image_path: ImageList,
    #[serde(default)]
    pub first_draft_file_path: Option<String>,
    #[serde(default)]
    pub final_image_path: ImageList,
    #[serde(default, rename = "finalDetialPath")]
    pub final_detail_path: ImageList,
    #[serde(default, rename = "finalDetialsPath")]
    pub final_detail_slice_path: ImageList,
    #[serde(default)]
    pub final_file_path: Option<String>,

    #[serde(default)]
    pub is_head: Flag,
    #[serde(default)]
    pub is_responsible: Flag,
    #[serde(default)]
    pub is_disclaimer: Flag,
    #[serde(default)]
    pub fine_money: f64,
    #[serde(default)]
    pub reward_money: f64,
}

impl DraftHistoryEntry {
    pub fn kind(&self) -> DraftKind {
        let has_final = !self.final_image_path.is_empty()
            || self
                .final_file_path
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty());
        if has_final {
            DraftKind::Final
        } else {
            DraftKind::First
        }
    }

    /// Reward minus fine for this upload.
    pub fn net_amount(&self) -> f64 {
        self.reward_money - self.fine_money
    }
}

impl Entity for DraftHistoryEntry {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Check that `later` extends `earlier` without rewriting it.
pub fn ensure_append_only(
    earlier: &[DraftHistoryEntry],
    later: &[DraftHistoryEntry],
) -> DomainResult<()> {
    if later.len() < earlier.len() {
        return Err(DomainError::invariant(format!(
            "draft history shrank from {} to {} entries",
            earlier.len(),
            later.len()
        )));
    }
    if let Some((before, after)) = earlier.iter().zip(later).find(|(a, b)| a != b) {
        return Err(DomainError::invariant(format!(
            "draft history entry {} was rewritten (now {})",
            before.id, after.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, fine: f64, reward: f64) -> DraftHistoryEntry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "createTime": "2025-08-12 10:00:00",
            "updateTime": null,
            "createUserId": 7,
            "createUserName": "designer",
            "isDelete": false,
            "orderId": 3,
            "distributionId": 30,
            "reassignmentId": 0,
            "firstDraftImagePath": "https://oss/first-1.png",
            "firstDraftFilePath": null,
            "isHead": 1,
            "isResponsible": 0,
            "isDisclaimer": 0,
            "fineMoney": fine,
            "rewardMoney": reward
        }))
        .unwrap()
    }

    fn final_upload(zip: &str) -> FinalDraftUpload {
        FinalDraftUpload {
            id: OrderId::from_raw(3),
            img_paths: vec!["https://oss/final.png".into()],
            detail_paths: vec!["https://oss/detail.png".into()],
            detail_slice_paths: vec![],
            zip_path: zip.into(),
        }
    }

    #[test]
    fn final_upload_requires_zip_path() {
        let err = final_upload("").validate().unwrap_err();
        assert_eq!(err.field(), Some("zipPath"));
        let err = final_upload("   ").validate().unwrap_err();
        assert_eq!(err.field(), Some("zipPath"));
        final_upload("https://oss/source.zip").validate().unwrap();
    }

    #[test]
    fn final_upload_uses_wire_spelling() {
        let json = serde_json::to_value(final_upload("https://oss/source.zip")).unwrap();
        assert_eq!(json["detialPaths"][0], "https://oss/detail.png");
        assert!(json["detialsPaths"].as_array().unwrap().is_empty());
        assert_eq!(json["zipPath"], "https://oss/source.zip");
    }

    #[test]
    fn first_upload_requires_an_image() {
        let upload = FirstDraftUpload::new(OrderId::from_raw(1), vec![]);
        assert_eq!(upload.validate().unwrap_err().field(), Some("imgPaths"));
        let upload = FirstDraftUpload::new(OrderId::from_raw(1), vec![" ".into()]);
        assert!(upload.validate().is_err());
    }

    #[test]
    fn history_entry_kind_and_amounts() {
        let first = entry(1, 5.0, 0.0);
        assert_eq!(first.kind(), DraftKind::First);
        assert_eq!(first.net_amount(), -5.0);
        assert_eq!(first.first_draft_image_path.len(), 1);

        let mut last = entry(2, 0.0, 8.0);
        last.final_file_path = Some("https://oss/source.zip".into());
        assert_eq!(last.kind(), DraftKind::Final);
    }

    #[test]
    fn append_only_history() {
        let a = entry(1, 0.0, 0.0);
        let b = entry(2, 0.0, 0.0);
        ensure_append_only(&[a.clone()], &[a.clone(), b.clone()]).unwrap();
        assert!(ensure_append_only(&[a.clone(), b.clone()], &[a.clone()]).is_err());

        let mut rewritten = a.clone();
        rewritten.fine_money = 50.0;
        assert!(ensure_append_only(&[a], &[rewritten, b]).is_err());
    }
}
