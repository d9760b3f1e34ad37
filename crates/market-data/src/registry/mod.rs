//! Upstream dispatch orchestration.
//!
//! This module provides the request queue that every upstream call passes
//! through, guaranteeing a single call in flight and a fixed minimum spacing
//! between dispatches.

mod request_queue;

pub use request_queue::{RequestQueue, DEFAULT_DISPATCH_SPACING};
