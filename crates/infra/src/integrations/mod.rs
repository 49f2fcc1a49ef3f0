//! Calendar provider integrations.

pub mod google;
