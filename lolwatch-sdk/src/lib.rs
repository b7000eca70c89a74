//! Wire objects and HTTP clients for the services lolwatch talks to.
//!
//! The `objects` module is always available. The typed HTTP clients live in
//! `client` and are gated behind the `client` cargo feature.

#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
