//! Order list, detail, drafts, annotations and disclaimers.

use dispatch_core::OrderId;
use dispatch_orders::annotation::{Annotation, AnnotationQuery, NewAnnotation};
use dispatch_orders::disclaimer::{DisclaimerQuery, DisclaimerRecord, DraftDisclaimer, ExemptionRequest};
use dispatch_orders::draft::{
    DraftHistoryEntry, DraftHistoryRequest, DraftKind, FinalDraftUpload, FirstDraftUpload,
};
use dispatch_orders::order::{OrderDetail, OrderDetailRequest, OrderPage};
use dispatch_orders::paging::Page;
use dispatch_orders::query::OrderQuery;

use crate::client::DispatchClient;
use crate::endpoints;
use crate::envelope::{ApiEnvelope, MutationAck};
use crate::error::ClientResult;

impl DispatchClient {
    /// The requesting designer's orders, filtered and paged.
    pub async fn list_orders(&self, query: &OrderQuery) -> ClientResult<ApiEnvelope<OrderPage>> {
        query.validate()?;
        self.post_json(endpoints::ORDER_PAGE, query).await
    }

    pub async fn order_detail(&self, order_id: OrderId) -> ClientResult<ApiEnvelope<OrderDetail>> {
        self.post_json(endpoints::ORDER_DETAIL, &OrderDetailRequest { order_id })
            .await
    }

    pub async fn annotations(
        &self,
        query: &AnnotationQuery,
    ) -> ClientResult<ApiEnvelope<Page<Annotation>>> {
        query.validate()?;
        self.post_json(endpoints::ORDER_ANNOTATIONS, query).await
    }

    pub async fn add_annotation(
        &self,
        note: &NewAnnotation,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        note.validate()?;
        self.post_json(endpoints::ADD_ANNOTATION, note).await
    }

    /// Uploaded drafts of one kind, oldest first.
    pub async fn draft_history(
        &self,
        kind: DraftKind,
        id: OrderId,
    ) -> ClientResult<ApiEnvelope<Vec<DraftHistoryEntry>>> {
        let path = match kind {
            DraftKind::First => endpoints::FIRST_DRAFT_HISTORY,
            DraftKind::Final => endpoints::FINAL_DRAFT_HISTORY,
        };
        self.post_json(path, &DraftHistoryRequest { id }).await
    }

    pub async fn upload_first_draft(
        &self,
        upload: &FirstDraftUpload,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        upload.validate()?;
        self.post_json(endpoints::FIRST_DRAFT_UPLOAD, upload).await
    }

    /// Rejected locally when `zipPath` or the images are missing.
    pub async fn upload_final_draft(
        &self,
        upload: &FinalDraftUpload,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        upload.validate()?;
        self.post_json(endpoints::FINAL_DRAFT_UPLOAD, upload).await
    }

    /// File a first- or final-draft disclaimer. Re-submission is not
    /// deduplicated locally.
    pub async fn apply_draft_disclaimer(
        &self,
        kind: DraftKind,
        body: &DraftDisclaimer,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        body.validate()?;
        let path = match kind {
            DraftKind::First => endpoints::FIRST_DRAFT_DISCLAIMER,
            DraftKind::Final => endpoints::FINAL_DRAFT_DISCLAIMER,
        };
        self.post_json(path, body).await
    }

    pub async fn apply_exemption(
        &self,
        request: &ExemptionRequest,
    ) -> ClientResult<ApiEnvelope<MutationAck>> {
        request.validate()?;
        self.post_json(endpoints::EXEMPTION, request).await
    }

    pub async fn disclaimers(
        &self,
        query: &DisclaimerQuery,
    ) -> ClientResult<ApiEnvelope<Page<DisclaimerRecord>>> {
        query.validate()?;
        self.post_json(endpoints::DISCLAIMER_PAGE, query).await
    }
}
