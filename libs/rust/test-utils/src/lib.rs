//! Shared test utilities for the Webflow provider crates.
//!
//! This crate provides:
//! - Proptest generators for identifiers, paths, tokens and field data
//! - A scripted in-memory [`webflow_client::Transport`]
//! - Test fixtures with sample API payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{ScriptedTransport, empty_response, json_response, rate_limited};
