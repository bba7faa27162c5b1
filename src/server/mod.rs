//! Request/Response value types carried between the router, the middleware
//! pipeline, and the error-handling strategy.
//!
//! These are the data half of the dispatch core: per-request instances created
//! when the transport hands over a parsed request, discarded once the response
//! is written back. Nothing here touches sockets.

pub mod request;
pub mod response;

pub use request::{parse_query_params, Request};
pub use response::Response;
