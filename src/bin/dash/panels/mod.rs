//! Dashboard panels - Modular UI components
//!
//! Each panel is a self-contained module responsible for rendering one
//! aspect of the console.
//!
//! Current panels:
//! - Status: loop toggles, reset action, connection/freshness indicators
//! - Articles: recent articles with classification results
//! - Settings: dismissible drawer for backend configuration

pub mod articles;
pub mod settings;
pub mod status;

pub use articles::ArticlesPanel;
pub use settings::{FocusField, SettingsPanel};
pub use status::StatusPanel;
