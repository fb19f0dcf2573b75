//! API Client Module
//!
//! HTTP communication with the load monitor.

mod client;

pub use client::*;
