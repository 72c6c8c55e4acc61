//! Application-level response codes carried inside the response envelope.
//!
//! These are independent of the HTTP status: the portal answers `200 OK` for
//! rejected business operations and reports the outcome here.

/// Operation succeeded.
pub const SUCCESS: i32 = 200;

// Generic failures
pub const BAD_REQUEST: i32 = 400;
pub const UNAUTHORIZED: i32 = 401;
pub const NOT_FOUND: i32 = 404;
pub const INTERNAL_ERROR: i32 = 500;

// Order dispatch (4xxx)
/// The order was already claimed by another designer.
pub const ORDER_ALREADY_TAKEN: i32 = 4001;
/// The requesting designer may not seize this order (grade, schedule, quota).
pub const SEIZE_NOT_ELIGIBLE: i32 = 4002;
/// The order's design state does not accept a draft upload.
pub const DRAFT_NOT_ACCEPTED: i32 = 4003;
/// A disclaimer for the same stage is still waiting for review.
pub const DUPLICATE_DISCLAIMER: i32 = 4004;

/// Envelope `type` for successful responses.
pub const TYPE_SUCCESS: &str = "success";
/// Envelope `type` for rejected responses.
pub const TYPE_ERROR: &str = "error";

pub fn is_success(code: i32) -> bool {
    code == SUCCESS
}
