//! HTTP handlers for the guide service.

pub mod guide;
pub mod health;
pub mod metrics;

pub use guide::{guide_self_test, tourist_info_with_count, tourist_info_with_query};
pub use health::{health_check, readiness_check};
