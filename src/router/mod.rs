//! # Router Module
//!
//! Path matching and route resolution. Registered path patterns are compiled
//! once into regex matchers; incoming method/path pairs are tested against the
//! table in registration order and the first match wins.
//!
//! ## Two-phase approach
//!
//! 1. **Compilation**: at registration, patterns like `/pets/{id}` are
//!    converted into the contract matcher string (`\/pets\/(.+)\/?`) with the
//!    parameter names recorded in left-to-right order.
//! 2. **Matching**: per request, the anchored matcher is tested against the
//!    path; captured groups zip positionally with the recorded names to
//!    produce the route parameters.
//!
//! The compiled matcher string is a compatibility contract shared with other
//! implementations of this dispatch core, not an implementation detail; see
//! [`Route::regex_pattern`].

mod core;

pub use core::{Handler, Route, Router};
