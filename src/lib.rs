//! AlphaPilot core: market snapshots, indicators, and DCA signals
//!
//! The pure pieces live in `indicators` and `signals`; everything around
//! them (gateway, store, server, jobs) is plumbing that feeds or renders
//! their output.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notifications;
pub mod services;
pub mod signals;

pub use error::CoreError;
