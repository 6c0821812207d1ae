//! Multi-window session management for Folio
//!
//! This module holds the window registry and the per-window bookkeeping it
//! coordinates: document state, close confirmation and the recent-files list.

mod close;
mod document;
mod recent;
mod registry;
mod window;

pub use close::CloseChoice;
pub use document::UNTITLED;
pub use registry::{CloseOutcome, WindowRegistry};
pub use window::{DocumentWindow, SaveTarget, SearchOverlay, WindowId};
