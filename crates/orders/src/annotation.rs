//! Notes attached to an order by its designer or by platform staff.

use serde::{Deserialize, Serialize};

use dispatch_core::error::require_non_blank;
use dispatch_core::time::deserialize_opt;
use dispatch_core::{AnnotationId, DomainResult, Entity, Flag, OrderId, ServerTime, UserId};

use crate::images::ImageList;
use crate::paging::PageRequest;

/// One annotation as listed by `userOrder/getOrderAnnotations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    pub order_id: OrderId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub admin_user_name: Option<String>,
    pub annotations_type: String,
    #[serde(default)]
    pub annotations_reason: String,
    #[serde(default)]
    pub image_path: ImageList,
    /// Written by platform staff rather than the designer.
    #[serde(default)]
    pub is_plat: Flag,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
    /// Computed by the server relative to the requesting identity.
    #[serde(default)]
    pub is_me: Flag,
}

impl Annotation {
    pub fn is_mine(&self) -> bool {
        self.is_me.is_set()
    }

    pub fn is_from_platform(&self) -> bool {
        self.is_plat.is_set()
    }

    /// Display name of whoever wrote the note.
    pub fn author(&self) -> Option<&str> {
        let name = if self.is_from_platform() {
            self.admin_user_name.as_deref().or(self.user_name.as_deref())
        } else {
            self.user_name.as_deref()
        };
        name.filter(|n| !n.trim().is_empty())
    }
}

impl Entity for Annotation {
    type Id = AnnotationId;

    fn id(&self) -> AnnotationId {
        self.id
    }
}

/// Body of `userOrder/addAnnotations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnotation {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub annotations_type: String,
    pub annotations_reason: String,
    pub image_path: ImageList,
    pub is_plat: Flag,
}

impl NewAnnotation {
    /// A designer-authored note without images.
    pub fn new(
        user_id: UserId,
        order_id: OrderId,
        annotations_type: impl Into<String>,
        annotations_reason: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            order_id,
            annotations_type: annotations_type.into(),
            annotations_reason: annotations_reason.into(),
            image_path: ImageList::default(),
            is_plat: Flag::OFF,
        }
    }

    pub fn with_images(mut self, images: ImageList) -> Self {
        self.image_path = images;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("annotationsType", &self.annotations_type)?;
        require_non_blank("annotationsReason", &self.annotations_reason)
    }
}

/// Body of `userOrder/getOrderAnnotations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationQuery {
    pub order_id: OrderId,
    pub page: u32,
    pub page_size: u32,
}

impl AnnotationQuery {
    pub fn new(order_id: OrderId, req: PageRequest) -> Self {
        Self {
            order_id,
            page: req.page,
            page_size: req.page_size,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Page;

    fn annotation_json(id: i64, is_plat: i64, is_me: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "orderId": 3,
            "userId": 501,
            "userName": "designer-a",
            "adminUserName": "ops-li",
            "annotationsType": "revision",
            "annotationsReason": "logo too small",
            "imagePath": "https://oss/n1.png,https://oss/n2.png",
            "isPlat": is_plat,
            "avatar": "",
            "createTime": "2025-08-12 09:30:00",
            "isMe": is_me
        })
    }

    #[test]
    fn decodes_page_without_derived_fields() {
        let json = serde_json::json!({
            "items": [annotation_json(1, 0, 1), annotation_json(2, 1, 0)],
            "total": 2,
            "page": 1,
            "pageSize": 10
        });
        let page: Page<Annotation> = serde_json::from_value(json).unwrap();
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next_page());

        let mine = &page.items[0];
        assert!(mine.is_mine());
        assert_eq!(mine.author(), Some("designer-a"));
        assert_eq!(mine.image_path.len(), 2);

        let staff = &page.items[1];
        assert!(!staff.is_mine());
        assert_eq!(staff.author(), Some("ops-li"));
    }

    #[test]
    fn new_annotation_serializes_wire_shape() {
        let note = NewAnnotation::new(
            UserId::from_raw(501),
            OrderId::from_raw(3),
            "question",
            "which font?",
        )
        .with_images(ImageList::parse("https://oss/q.png"));
        note.validate().unwrap();

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": 501,
                "orderId": 3,
                "annotationsType": "question",
                "annotationsReason": "which font?",
                "imagePath": "https://oss/q.png",
                "isPlat": 0
            })
        );
    }

    #[test]
    fn blank_annotation_is_rejected() {
        let note = NewAnnotation::new(UserId::from_raw(1), OrderId::from_raw(1), "note", "  ");
        assert_eq!(note.validate().unwrap_err().field(), Some("annotationsReason"));
    }

    #[test]
    fn query_checks_paging() {
        let query = AnnotationQuery::new(OrderId::from_raw(3), PageRequest::default());
        query.validate().unwrap();
        let json = serde_json::to_value(query).unwrap();
        assert_eq!(json, serde_json::json!({"orderId": 3, "page": 1, "pageSize": 10}));

        let bad = AnnotationQuery { page_size: 0, ..query };
        assert!(bad.validate().is_err());
    }
}
