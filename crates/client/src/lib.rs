//! Tickerboard Client Crate
//!
//! Consumer side of the dashboard gateway:
//!
//! - [`DashboardClient`] - Typed access to every gateway endpoint
//! - [`retry_rate_limited`] - Bounded, fixed-delay retry of throttled requests
//! - [`load_company_view`] - Price series (retried) plus overview (best effort)
//! - [`PriceSummary`] - The header figures derived from a price series
//!
//! Only rate limiting is ever retried. Every other failure is returned to the
//! caller immediately.

pub mod client;
pub mod errors;
pub mod retry;
pub mod summary;
pub mod view;

pub use client::{DashboardClient, HealthReport, DEFAULT_BASE_URL};
pub use errors::ClientError;
pub use retry::{retry_rate_limited, RetryPolicy};
pub use summary::{format_volume, PriceSummary};
pub use view::{load_company_view, CompanyView};
