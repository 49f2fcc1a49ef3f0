//! # CalSift Domain
//!
//! Business domain types for calendar availability and client-meeting
//! resolution.
//!
//! This crate contains:
//! - Resolution results (busy intervals, client meetings, windows)
//! - Provider-shaped records exchanged with the gateway port
//! - Error taxonomy and Result definition
//! - OAuth credential parsing and resolver settings
//! - Provider limits and the free-email domain list
//!
//! ## Architecture
//! - No dependencies on other CalSift crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod time;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
