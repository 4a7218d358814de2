//! Core application primitives (server, scheduler)

pub mod http;
pub mod scheduler;

pub use http::*;
pub use scheduler::*;
