//! Configuration module for Folio
//!
//! This module holds the persistent settings store (window geometry and
//! layout, the recent-files list and user preferences) and the typed values
//! kept in it.

mod persistence;
mod settings;
mod store;

pub use settings::*;
pub use store::*;
