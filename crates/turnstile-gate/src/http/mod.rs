//! HTTP surface: health probe and authorization checks.

pub mod handlers;

pub use handlers::{ApiError, CanReq, Decision, IsAReq};
