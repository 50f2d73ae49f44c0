//! TwinCore firmware library.
//!
//! Exposes the pipeline (protocol, inter-core channel, both loops) and the
//! drivers for integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod channel;
pub mod config;
pub mod error;
pub mod protocol;

pub mod pins;

// ESP-IDF-backed modules; the host build uses the simulation branches.
pub mod adapters;
pub mod drivers;
pub mod sensors;
