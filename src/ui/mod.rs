//! UI components for Folio
//!
//! Widgets drawn inside a document window. None of them touch the window
//! registry; they report [`WindowAction`]s or small output structs that the
//! application executes after the frame is drawn.

mod about;
mod actions;
mod dialogs;
mod document_view;
mod icons;
mod menu;
mod search_bar;
mod settings;
mod status_bar;
mod toolbar;

pub use about::AboutPanel;
pub use actions::{poll_shortcuts, WindowAction};
pub use dialogs::{confirm_close_dialog, error_dialog};
pub use document_view::document_view;
pub use icons::get_app_icon;
pub use menu::menu_bar;
pub use search_bar::search_bar;
pub use settings::SettingsPanel;
pub use status_bar::status_bar;
pub use toolbar::{toolbar, ToolbarState};
