//! File operations module for Folio
//!
//! Native open and save dialogs.

pub mod dialogs;
