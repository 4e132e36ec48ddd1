//! Reusable dashboard widgets
//!
//! Common UI components shared by the panels:
//! - State indicators (color-coded status badges)

pub mod state_indicator;

pub use state_indicator::{StateIndicator, StateType};
