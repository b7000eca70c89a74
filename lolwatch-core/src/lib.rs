#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod config;
pub mod detector;
pub mod entities;
pub mod persistence;
pub mod processors;
pub mod registry;
pub mod report;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;
