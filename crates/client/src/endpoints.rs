//! Endpoint paths, relative to `<base>/api/`.

// Orders
pub const ORDER_PAGE: &str = "userOrder/myOderPage";
pub const ORDER_DETAIL: &str = "userOrder/orderDetail";
pub const ORDER_ANNOTATIONS: &str = "userOrder/getOrderAnnotations";
pub const ADD_ANNOTATION: &str = "userOrder/addAnnotations";
pub const FIRST_DRAFT_HISTORY: &str = "userOrder/firstHistoryList";
pub const FINAL_DRAFT_HISTORY: &str = "userOrder/finalHistoryList";
pub const FIRST_DRAFT_UPLOAD: &str = "userOrder/firstDraftUpload";
pub const FINAL_DRAFT_UPLOAD: &str = "userOrder/finalDraftUpload";
pub const FIRST_DRAFT_DISCLAIMER: &str = "userOrder/applyFirstDraftDisclaimer";
pub const FINAL_DRAFT_DISCLAIMER: &str = "userOrder/applyFinalDraftDisclaimer";
pub const EXEMPTION: &str = "userOrder/disclaimer";
pub const DISCLAIMER_PAGE: &str = "userOrder/orderDisclaimerPage";

// Dispatch hall
pub const HALL_PAGE: &str = "orderDistribution/pageNimble";
pub const HALL_DETAIL: &str = "orderDistribution/detail";
pub const SEIZE_CHECK: &str = "orderDistribution/seizeOrderCheck";
pub const SEIZE: &str = "orderDistribution/seizeOrder";

// Dictionaries
pub const SYSTEM_DICT: &str = "sysDictType/dataList";
pub const DESIGNER_TYPES: &str = "pcUser/getDesignTypeList";
pub const SOFTWARE: &str = "pcUser/softList";
pub const PLATFORMS: &str = "pcUser/platformTypeList";
pub const PRODUCT_TYPES: &str = "pcUser/getProductTypeList";
pub const DESIGN_TYPES: &str = "pcUser/designTypeList";
pub const ORDER_TYPES: &str = "dicData/orderTypes";

// Grab-time schedule
pub const GRAB_TIMES: &str = "pUserInfo/userQueryTimes";
pub const SET_GRAB_TIMES: &str = "pUserInfo/setUserTimes";
pub const TAKING_STATE: &str = "pUserInfo/updateStatexx";

// Assets
pub const UPLOAD_FILE: &str = "ossFile/uploadFile";

// Service points
pub const SERVICE_POINTS: &str = "pUserInfo/getServicePointsInfo";
pub const SERVICE_CAPABILITY: &str = "pUserInfo/serviceCapability";
