//! Browser adapters for the nova-core ports.
//!
//! HTTP goes through `fetch()` via gloo-net, persistence through
//! `localStorage` (or memory when it is unavailable), navigation through
//! the location hash.

pub mod http;
pub mod navigator;
pub mod storage;
