//! # Middleware Module
//!
//! Ordered, nestable request/response interception with onion semantics: the
//! first middleware in the list is the outermost wrapper, the terminal route
//! handler is the innermost call, and each middleware decides whether and when
//! to delegate to the remainder of the chain through [`Next`].
//!
//! The chain is composed fresh for every dispatched request from the
//! dispatcher's current middleware list, so replacing the list wholesale
//! between request cycles takes effect immediately.
//!
//! Two built-ins cover the usual cross-cutting concerns: [`TracingMiddleware`]
//! (per-request span with status/latency) and [`MetricsMiddleware`]
//! (lock-free request count and mean latency). Everything else is application
//! territory via [`Middleware`] impls or [`from_fn`].

mod core;
mod metrics;
mod tracing;

pub use core::{from_fn, Middleware, Next};
pub use metrics::MetricsMiddleware;
pub use tracing::TracingMiddleware;
