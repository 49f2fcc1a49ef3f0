//! # CalSift Core
//!
//! Pure resolution logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the token endpoint and calendar API
//! - Window partitioning, busy-interval mapping and event classification
//! - The aggregating [`AvailabilityResolver`]
//!
//! ## Architecture Principles
//! - Only depends on `calsift-domain`
//! - No HTTP, storage or platform code
//! - All provider access via traits

pub mod busy;
pub mod classifier;
pub mod events;
pub mod partition;
pub mod ports;
pub mod resolver;

pub use busy::{busy_intervals_from_response, fetch_busy_intervals};
pub use classifier::{ClientIdentity, MatchRule};
pub use events::fetch_window_events;
pub use partition::partition_window;
pub use ports::{CalendarGateway, TokenSource};
pub use resolver::{merge_busy_intervals, merge_client_meetings, AvailabilityResolver};
