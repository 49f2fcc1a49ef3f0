//! Domain data types

pub mod calendar;
pub mod provider;
pub mod query;

pub use calendar::*;
pub use provider::*;
pub use query::*;
