//! # picoroute
//!
//! **picoroute** is the request-dispatch core of a small embedded HTTP server
//! library: it turns an incoming parsed request into a response and never
//! touches a socket.
//!
//! ## Architecture
//!
//! Three cooperating pieces, plus the data they carry:
//!
//! - **[`router`]** - compiles registered `{name}` path patterns into regex
//!   matchers, resolves method/path pairs in registration order, extracts
//!   named parameters
//! - **[`middleware`]** - composes an ordered middleware list around the
//!   terminal route handler with onion semantics (first listed is outermost,
//!   pre-`next` code runs outside-in, post-`next` code runs inside-out)
//! - **[`dispatcher`]** - drives "resolve route → compose pipeline → execute"
//!   inside a single failure boundary and hands any escaping error to the
//!   installed [`error`] strategy
//! - **[`server`]** - the `Request`/`Response` value types exchanged with the
//!   host transport
//!
//! The transport layer (accept loop, TCP/TLS, raw HTTP parsing) is an
//! external collaborator: it hands this core an already-parsed
//! [`Request`](server::Request) and writes the produced
//! [`Response`](server::Response) back to the wire.
//!
//! ## Quick start
//!
//! ```
//! use http::{Method, StatusCode};
//! use picoroute::{Dispatcher, Request, Response};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.get("/pets/{id}", |req| {
//!     let id = req.route_param("id").unwrap_or("unknown");
//!     Ok(Response::ok(format!("pet {id}")))
//! });
//!
//! let mut request = Request::new(Method::GET, "/pets/42", Default::default(), Vec::new());
//! let response = dispatcher.dispatch(&mut request);
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(response.body, b"pet 42");
//! ```
//!
//! ## Concurrency model
//!
//! The core is synchronous: no operation suspends, and each request builds
//! and runs its own chain instance. Populate routes and middleware during
//! setup (`&mut self`), then share the dispatcher (`&self`, e.g. behind
//! `Arc`) across transport threads; handlers, middleware, and error handlers
//! are all `Send + Sync`.

pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;

pub use dispatcher::Dispatcher;
pub use error::{default_response, DefaultErrorHandler, ErrorHandler, ServerError};
pub use middleware::{Middleware, Next};
pub use router::{Handler, Route, Router};
pub use server::{Request, Response};
