//! # Dispatcher Module
//!
//! The top of the dispatch core: owns the route table, the ordered middleware
//! list, and the installed error-handling strategy, and drives one request at
//! a time through "resolve route → compose pipeline → execute" inside a
//! single failure boundary.
//!
//! The core is synchronous and has no intrinsic threading; it is invoked once
//! per inbound request on whatever execution context the transport chooses.
//! Callers never observe a dispatch-layer error directly: they always receive
//! a [`Response`](crate::server::Response), with status and body determined by
//! the installed [`ErrorHandler`](crate::error::ErrorHandler) or the hard
//! default mapping.

mod core;

pub use core::Dispatcher;
