//! HTTP transport layer
//!
//! Route handlers and fallbacks for the public API surface.

pub mod handlers;
