//! Order dispatch contracts.
//!
//! Typed request bodies and response shapes for the designer portal, plus the
//! client-side rules that keep them honest: design-state transitions, paging
//! arithmetic, local validation of outbound requests, dictionary lookups and
//! the service-point report behind seize eligibility.
//! No IO happens here.

pub mod annotation;
pub mod dictionary;
pub mod disclaimer;
pub mod dispatch;
pub mod draft;
pub mod images;
pub mod order;
pub mod paging;
pub mod query;
pub mod schedule;
pub mod service;
pub mod state;

pub use annotation::{Annotation, AnnotationQuery, NewAnnotation};
pub use dictionary::{DictEntry, DictKind, Dictionary, OrderTypeFilter, OrderTypeNode};
pub use disclaimer::{
    DisclaimerQuery, DisclaimerRecord, DisclaimerStage, DisclaimerStatus, DraftDisclaimer,
    ExemptionRequest,
};
pub use dispatch::{
    HallOrder, HallOrderDetail, HallQuery, SeizeCheck, SeizeEligibility, SeizeReceipt,
    SeizeRequest,
};
pub use draft::{DraftHistoryEntry, DraftHistoryRequest, DraftKind, FinalDraftUpload, FirstDraftUpload};
pub use images::ImageList;
pub use order::{
    BrokerShare, DisclaimerEligibility, OrderDetail, OrderDetailRequest, OrderPage, OrderSummary,
};
pub use paging::{Page, PageRequest};
pub use query::OrderQuery;
pub use schedule::{
    GrabTimeEntry, GrabTimeUpdate, GrabWindow, TakingState, TakingStateUpdate, TimeSlot,
};
pub use service::{CapabilityReport, GradeInfo, MetricScore, ServiceMetric, ServicePoints, UserGrade};
pub use state::{DesignState, SettlementState, StateBucket, Timeline};
